//! The forwarding loop itself.
//!
//! read line -> parse -> build payload -> post, again and again.  There is no retry, the first
//! error ends the run.  The only clean way out is the stop token, checked before every line and
//! while the source waits for data.
//!

use std::fmt::{Display, Formatter};
use std::time::Instant;

use tracing::{info, trace};

use crate::{build_payload, parse, ForwardError, LineSource, Payload, Sink, StopToken};

/// Session statistics
///
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Elapsed time in seconds
    pub tm: u64,
    /// Lines read
    pub lines: u32,
    /// Payloads posted
    pub posted: u32,
    /// Bytes read
    pub bytes: u64,
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "time={}s lines={} posted={} bytes={}",
            self.tm, self.lines, self.posted, self.bytes
        )
    }
}

#[derive(Debug)]
pub struct Forwarder<S, K> {
    source: S,
    sink: K,
    stop: StopToken,
    stats: Stats,
}

impl<S: LineSource, K: Sink> Forwarder<S, K> {
    pub fn new(source: S, sink: K, stop: StopToken) -> Self {
        Self {
            source,
            sink,
            stop,
            stats: Stats::default(),
        }
    }

    /// One iteration.  `Ok(None)` means we were asked to stop while waiting for a line.
    ///
    pub fn step(&mut self) -> Result<Option<Payload>, ForwardError> {
        let raw = match self.source.read_line(&self.stop)? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        self.stats.lines += 1;
        self.stats.bytes += raw.len() as u64;

        let line = String::from_utf8_lossy(&raw);
        let payload = build_payload(&parse(&line))?;
        info!("{payload}");

        self.sink.post(&payload)?;
        self.stats.posted += 1;
        info!("Posted.");

        Ok(Some(payload))
    }

    /// Loop until stopped or until something breaks.
    ///
    #[tracing::instrument(skip(self))]
    pub fn run(&mut self) -> Result<Stats, ForwardError> {
        trace!("forwarder::run");

        let start = Instant::now();
        let res = self.run_loop();
        self.stats.tm = start.elapsed().as_secs();
        res.map(|_| self.stats.clone())
    }

    fn run_loop(&mut self) -> Result<(), ForwardError> {
        while !self.stop.is_stopped() {
            if self.step()?.is_none() {
                break;
            }
        }
        Ok(())
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }
}
