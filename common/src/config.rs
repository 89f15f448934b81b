//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default location for the configuration file of a given tool.
//! This is a configuration file/struct neutral loading engine, storing only the base directory
//! and with `load()` read the proper file or the default one.
//!
//! This encapsulates the configuration, available with `.inner()` or `.into_inner()`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use eyre::Result;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::{makepath, Status};

/// Config filename
const CONFIG: &str = "config.hcl";

/// Every configuration file carries a `version` field we check against what the tool expects.
///
pub trait Versioned {
    /// Version of the format this tool understands
    const VERSION: usize;

    /// Version found in the loaded file
    fn version(&self) -> usize;
}

/// Configuration for a tool, loaded from HCL.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + Default + DeserializeOwned + Versioned> {
    /// Tag is the project name.
    tag: String,
    /// This is the base directory for all files.
    basedir: PathBuf,
    inner: T,
}

impl<T> ConfigFile<T>
where
    T: Debug + Default + DeserializeOwned + Versioned,
{
    #[tracing::instrument]
    fn new(tag: &str) -> Self {
        let basedir: PathBuf = match BaseDirs::new() {
            Some(base) => {
                #[cfg(unix)]
                let base = base.home_dir().join(".config");

                #[cfg(windows)]
                let base = base.data_local_dir().to_path_buf();

                debug!("base = {base:?}");
                makepath!(base, tag)
            }
            // No home directory at all, use the current one.
            None => makepath!(".", tag),
        };
        ConfigFile {
            tag: String::from(tag),
            basedir,
            inner: T::default(),
        }
    }

    /// Returns the path of the default config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the default config file
    ///
    pub fn default_file(&self) -> PathBuf {
        let cfg = self.config_path().join(CONFIG);
        debug!("default = {cfg:?}");
        cfg
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI, which must exist
    /// - default basedir (base on $HOME or $LOCALAPPDATA), if absent we use `T::default()`
    ///
    #[tracing::instrument]
    pub fn load(tag: &str, fname: Option<&Path>) -> Result<ConfigFile<T>> {
        let mut cfg = ConfigFile::<T>::new(tag);

        let fname = match fname {
            Some(fname) => {
                if !fname.exists() {
                    return Err(Status::MissingConfig(fname.to_string_lossy().to_string()).into());
                }
                fname.to_path_buf()
            }
            None => {
                let def = cfg.default_file();
                if !def.exists() {
                    debug!("no {def:?}, using defaults for {}", cfg.tag);
                    return Ok(cfg);
                }
                def
            }
        };

        // Use a full path
        //
        let fname = fname.canonicalize()?;
        trace!("Loading config file {fname:?}");

        let data = fs::read_to_string(&fname)?;
        let data: T = hcl::from_str(&data)?;
        debug!("struct data = {data:?}");

        if data.version() != T::VERSION {
            return Err(Status::BadFileVersion {
                found: data.version(),
                want: T::VERSION,
            }
            .into());
        }

        cfg.inner = data;
        Ok(cfg)
    }

    /// Return the inner configuration
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}
