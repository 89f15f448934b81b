use std::io;

use clap::{crate_authors, crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use tracing::{info, trace};

use coordpost::{forward_from_config, list_ports, Config, Opts, StopToken, SubCommand};
use coordpost_common::init_logging;

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging.
    //
    init_logging(NAME, opts.verbose, opts.tree, opts.log_dir.clone())?;

    handle_subcmd(&opts)
}

pub fn handle_subcmd(opts: &Opts) -> Result<()> {
    match &opts.subcmd {
        // Handle `run`
        //
        SubCommand::Run(ropts) => {
            trace!("run");

            banner()?;

            let cfg = Config::load(opts.config.as_deref())?.merge(ropts);

            let stop = StopToken::new();
            stop.register_signals()?;

            let stats = forward_from_config(&cfg, stop)?;
            info!("Stopped after {} posts.", stats.posted);
        }

        // Standalone `ports` command
        //
        SubCommand::Ports => {
            info!("Listing all serial ports:");

            let str = list_ports()?;
            eprintln!("{}", str);
        }

        // Standalone completion generation
        //
        // NOTE: you can generate UNIX shells completion on Windows and vice-versa.  Not worth
        //       trying to limit depending on the OS.
        //
        SubCommand::Completion(copts) => {
            let generator = copts.shell;
            generate(generator, &mut Opts::command(), NAME, &mut io::stdout());
        }

        // Standalone `version` command
        //
        SubCommand::Version => {
            eprintln!("Modules: ");
            eprintln!("\t{}", version());
            eprintln!("\t{}", coordpost_common::version());
        }
    }
    Ok(())
}

/// Return our version number
///
#[inline]
pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}
