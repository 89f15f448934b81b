//! Module describing all possible commands and sub-commands to the `coordpost` main driver
//!
//! We have these commands:
//!
//! - `run`
//! - `ports`
//! - `completion`
//! - `version`
//!
//! `run` opens the serial device and forwards every `<lat>,<lng>` line it reads to the HTTP
//! endpoint until it is interrupted or something fails.
//!
//! `ports` lists the serial devices the system knows about, handy to find which one is the GPS.
//!
//! `completion` is here just to configure the various shells completion system.
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};
use clap_complete::shells::Shell;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// Verbose mode, repeat for more.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Hierarchical log output.
    #[clap(long)]
    pub tree: bool,
    /// Also log into hourly files in this directory.
    #[clap(long)]
    pub log_dir: Option<PathBuf>,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `completion SHELL`
/// `ports`
/// `run [-p PORT] [-b BAUD] [-u URL] [--strict]`
/// `version`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// List serial ports
    Ports,
    /// Forward coordinates from the serial device
    Run(RunOpts),
    /// List all package versions
    Version,
}

// ------

/// Every field here overrides the configuration file.
///
#[derive(Debug, Default, Parser)]
pub struct RunOpts {
    /// Serial device.
    #[clap(short = 'p', long)]
    pub port: Option<String>,
    /// Baud rate.
    #[clap(short = 'b', long)]
    pub baud: Option<u32>,
    /// Serial read polling interval in ms.
    #[clap(long)]
    pub read_timeout: Option<u64>,
    /// Endpoint URL.
    #[clap(short = 'u', long)]
    pub url: Option<String>,
    /// HTTP timeout in seconds, 0 means none.
    #[clap(long)]
    pub http_timeout: Option<u64>,
    /// Fail on non-2xx replies.
    #[clap(long)]
    pub strict: bool,
}

// ------

/// Options to generate completion files at runtime
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}
