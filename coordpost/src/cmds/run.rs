use tracing::{info, trace};

use crate::{open, Config, ForwardError, Forwarder, HttpSink, Stats, StopToken};

/// Open both ends described by `cfg` and forward until `stop` is raised or something fails.
///
/// Statistics are printed on the way out, error or not.
///
#[tracing::instrument(skip(stop))]
pub fn forward_from_config(cfg: &Config, stop: StopToken) -> Result<Stats, ForwardError> {
    trace!("forward_from_config");

    let sink = HttpSink::new(&cfg.http.url, cfg.http_timeout(), cfg.policy())?;
    let source = open(&cfg.serial.port, cfg.serial.baud, cfg.read_timeout())?;

    info!(
        "Forwarding from {} ({} bauds) to {}",
        cfg.serial.port,
        cfg.serial.baud,
        sink.url()
    );

    let mut fwd = Forwarder::new(source, sink, stop);
    let res = fwd.run();
    eprintln!("\nSession: {}", fwd.stats());
    res
}
