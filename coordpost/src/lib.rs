//! Library part of the `coordpost` utility.
//!
//! `coordpost` reads `<lat>,<lng>` lines from a serial device (usually a GPS attached to a
//! microcontroller) and posts every one of them, form-encoded, to an HTTP endpoint.
//!
//! The loop is generic over a `LineSource` and a `Sink` so it can be driven by something other
//! than a real serial port and a real server.  A `StopToken` ends it cleanly.
//!

/// Re-export
///
pub use cli::*;
pub use cmds::*;
pub use config::*;
pub use coordinate::*;
pub use error::*;
pub use forwarder::*;
pub use sink::*;
pub use source::*;
pub use stop::*;

mod cli;
mod cmds;
mod config;
mod coordinate;
mod error;
mod forwarder;
mod sink;
mod source;
mod stop;
