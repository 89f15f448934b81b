//! Stop token shared between the signal handlers and the forwarding loop.
//!

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::consts::TERM_SIGNALS;
use signal_hook::flag;
use tracing::trace;

#[derive(Clone, Debug, Default)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to end after the current step.
    ///
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Raise the token on SIGINT/SIGTERM/SIGQUIT.
    ///
    /// NOTE: a second signal while the token is already raised exits right away.
    ///
    pub fn register_signals(&self) -> io::Result<()> {
        trace!("register signals");

        for sig in TERM_SIGNALS {
            flag::register_conditional_shutdown(*sig, 1, Arc::clone(&self.0))?;
            flag::register(*sig, Arc::clone(&self.0))?;
        }
        Ok(())
    }
}
