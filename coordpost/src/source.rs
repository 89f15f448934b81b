//! Where lines come from.
//!
//! The real thing is a serial port opened through `serialport`, tests feed any `BufRead`.
//!
//! The serial port is opened with a short read timeout.  A timeout is not an error, it is only
//! the moment where we look at the stop token before blocking again.  Whatever was read before
//! the timeout stays in the line buffer.
//!

use std::io::{BufRead, BufReader, ErrorKind};
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, trace, warn};

use crate::{ForwardError, StopToken};

/// Line delimiter
const EOL: u8 = b'\n';

/// Anything able to hand us one raw line at a time.
///
pub trait LineSource {
    /// Block until a full line, delimiter included, is available.
    ///
    /// Returns `Ok(None)` if the stop token was raised while waiting.
    ///
    fn read_line(&mut self, stop: &StopToken) -> Result<Option<Vec<u8>>, ForwardError>;
}

/// Line reader over any buffered stream.
///
#[derive(Debug)]
pub struct LineReader<R> {
    /// Device name, used in errors
    port: String,
    inner: R,
}

/// What `open()` gives back.
///
pub type SerialSource = LineReader<BufReader<Box<dyn SerialPort>>>;

impl<R: BufRead> LineReader<R> {
    pub fn new(port: &str, inner: R) -> Self {
        Self {
            port: port.to_string(),
            inner,
        }
    }

    fn disconnected(&self, source: std::io::Error) -> ForwardError {
        ForwardError::DeviceDisconnected {
            port: self.port.clone(),
            source,
        }
    }
}

impl<R: BufRead> LineSource for LineReader<R> {
    #[tracing::instrument(skip(self, stop), fields(port = %self.port))]
    fn read_line(&mut self, stop: &StopToken) -> Result<Option<Vec<u8>>, ForwardError> {
        let mut buf = Vec::new();

        loop {
            match self.inner.read_until(EOL, &mut buf) {
                // End of stream, the device is gone
                Ok(0) => {
                    if !buf.is_empty() {
                        warn!("dropping {} bytes of unterminated line", buf.len());
                    }
                    return Err(self.disconnected(ErrorKind::UnexpectedEof.into()));
                }
                Ok(n) => {
                    trace!("{n} bytes read");
                    if buf.last() == Some(&EOL) {
                        return Ok(Some(buf));
                    }
                    // Partial line right before EOF, next read tells us.
                }
                Err(e) if e.kind() == ErrorKind::TimedOut || e.kind() == ErrorKind::WouldBlock => {
                    if stop.is_stopped() {
                        debug!("stop requested while waiting for data");
                        return Ok(None);
                    }
                }
                Err(e) => return Err(self.disconnected(e)),
            }
        }
    }
}

/// Open the serial device at `port` in 8N1 mode, no flow control.
///
/// On Unix the port is opened in exclusive mode so a device already held by someone else
/// fails here.
///
#[tracing::instrument]
pub fn open(port: &str, baud: u32, timeout: Duration) -> Result<SerialSource, ForwardError> {
    let handle = serialport::new(port, baud)
        .timeout(timeout)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .open()
        .map_err(|source| ForwardError::DeviceUnavailable {
            port: port.to_string(),
            source,
        })?;
    debug!("{port} opened at {baud} bauds");

    Ok(LineReader::new(port, BufReader::new(handle)))
}
