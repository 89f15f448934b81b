//! Common logging initializer
//!
//! `RUST_LOG` always wins; without it the level is derived from the number of `-v` given.
//!

use std::path::PathBuf;

use eyre::Result;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_tree::HierarchicalLayer;

/// Map a verbosity count into a default filter directive.
///
pub fn level_from(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

pub fn init_logging(
    name: &'static str,
    verbose: u8,
    use_tree: bool,
    use_file: Option<PathBuf>,
) -> Result<()> {
    // Initialise logging early
    //
    // Load filters from environment, fallback on verbosity
    //
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level_from(verbose))?,
    };

    // Do we want hierarchical output?
    //
    let (tree, compact) = if use_tree {
        let tree = HierarchicalLayer::new(2)
            .with_ansi(true)
            .with_span_retrace(true)
            .with_span_modes(true)
            .with_targets(true)
            .with_bracketed_fields(true);
        (Some(tree), None)
    } else {
        let compact = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact();
        (None, Some(compact))
    };

    // Log to file?
    //
    let file = use_file.map(|dir| {
        // Basic append-only rolling file for all traces.
        //
        let file_appender = tracing_appender::rolling::hourly(dir, name);
        fmt::layer().with_ansi(false).with_writer(file_appender)
    });

    // Combine filters & exporters
    //
    tracing_subscriber::registry()
        .with(filter)
        .with(tree)
        .with(compact)
        .with(file)
        .try_init()?;

    Ok(())
}
