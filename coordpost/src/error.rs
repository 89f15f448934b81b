//! Error module
//!
//! Every one of these ends the forwarding loop, nothing is retried.
//!

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("Can not open serial device {port}: {source}")]
    DeviceUnavailable {
        port: String,
        #[source]
        source: serialport::Error,
    },
    #[error("Serial device {port} disconnected: {source}")]
    DeviceDisconnected {
        port: String,
        #[source]
        source: io::Error,
    },
    #[error("Malformed coordinate line {0:?}")]
    MalformedCoordinate(String),
    #[error("POST failed: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("POST to {url} returned status {status}")]
    BadStatus { url: String, status: u16 },
}
