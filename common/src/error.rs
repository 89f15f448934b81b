//! Error module
//!

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Status {
    #[error("Bad file version {found}, expected {want}")]
    BadFileVersion { found: usize, want: usize },
    #[error("Unknown config file {0}")]
    MissingConfig(String),
}
