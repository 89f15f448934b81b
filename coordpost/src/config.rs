//! Configuration of the forwarder.
//!
//! Built-in defaults, overridden by `config.hcl`, overridden by the `run` flags.
//!
//! ```hcl
//! version = 1
//!
//! serial {
//!   port    = "/dev/ttyACM0"
//!   baud    = 115200
//!   timeout = 1000
//! }
//!
//! http {
//!   url     = "http://localhost:8080/"
//!   timeout = 0
//!   strict  = false
//! }
//! ```
//!

use std::path::Path;
use std::time::Duration;

use eyre::Result;
use serde::Deserialize;
use tracing::debug;

use coordpost_common::{ConfigFile, Versioned};

use crate::{RunOpts, StatusPolicy};

/// Directory name under `~/.config`
const TAG: &str = "coordpost";
/// Current version
pub const CVERSION: usize = 1;

/// Defaults of the first deployment.
const DEF_PORT: &str = "/dev/tty.usbmodem1451";
const DEF_BAUD: u32 = 115_200;
const DEF_URL: &str = "http://citizenscode-gpstracker-api.herokuapp.com/";
/// Serial read polling interval in ms
const DEF_READ_TIMEOUT: u64 = 1_000;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    pub version: usize,
    #[serde(default)]
    pub serial: SerialConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Serial side
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SerialConfig {
    /// Device path
    pub port: String,
    pub baud: u32,
    /// Read polling interval in ms
    pub timeout: u64,
}

/// HTTP side
///
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    /// Endpoint
    pub url: String,
    /// Request timeout in seconds, 0 is none
    pub timeout: u64,
    /// Require a 2xx status
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CVERSION,
            serial: SerialConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: DEF_PORT.to_string(),
            baud: DEF_BAUD,
            timeout: DEF_READ_TIMEOUT,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            url: DEF_URL.to_string(),
            timeout: 0,
            strict: false,
        }
    }
}

impl Versioned for Config {
    const VERSION: usize = CVERSION;

    fn version(&self) -> usize {
        self.version
    }
}

impl Config {
    /// Load the given file or the default one, falling back on built-in defaults.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<Self> {
        let cfg = ConfigFile::<Config>::load(TAG, fname)?;
        Ok(cfg.into_inner())
    }

    /// Apply `run` flags on top.
    ///
    pub fn merge(mut self, opts: &RunOpts) -> Self {
        if let Some(port) = &opts.port {
            self.serial.port = port.clone();
        }
        if let Some(baud) = opts.baud {
            self.serial.baud = baud;
        }
        if let Some(timeout) = opts.read_timeout {
            self.serial.timeout = timeout;
        }
        if let Some(url) = &opts.url {
            self.http.url = url.clone();
        }
        if let Some(timeout) = opts.http_timeout {
            self.http.timeout = timeout;
        }
        if opts.strict {
            self.http.strict = true;
        }
        debug!("merged config = {self:?}");
        self
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.serial.timeout)
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        match self.http.timeout {
            0 => None,
            n => Some(Duration::from_secs(n)),
        }
    }

    pub fn policy(&self) -> StatusPolicy {
        if self.http.strict {
            StatusPolicy::RequireSuccess
        } else {
            StatusPolicy::Ignore
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn load_str(body: &str) -> Result<Config> {
        let dir = TempDir::new()?;
        let fname = dir.path().join("config.hcl");
        fs::write(&fname, body)?;
        Config::load(Some(fname.as_path()))
    }

    #[test]
    fn test_config_defaults() {
        let cfg = Config::default();

        assert_eq!(DEF_PORT, cfg.serial.port);
        assert_eq!(115_200, cfg.serial.baud);
        assert_eq!(DEF_URL, cfg.http.url);
        assert_eq!(None, cfg.http_timeout());
        assert_eq!(Duration::from_secs(1), cfg.read_timeout());
        assert_eq!(StatusPolicy::Ignore, cfg.policy());
    }

    #[test]
    fn test_config_load_full() -> Result<()> {
        let cfg = load_str(
            r##"
version = 1

serial {
  port    = "/dev/ttyACM0"
  baud    = 9600
  timeout = 250
}

http {
  url     = "http://localhost:8080/track"
  timeout = 10
  strict  = true
}
"##,
        )?;

        assert_eq!("/dev/ttyACM0", cfg.serial.port);
        assert_eq!(9600, cfg.serial.baud);
        assert_eq!(Duration::from_millis(250), cfg.read_timeout());
        assert_eq!("http://localhost:8080/track", cfg.http.url);
        assert_eq!(Some(Duration::from_secs(10)), cfg.http_timeout());
        assert_eq!(StatusPolicy::RequireSuccess, cfg.policy());
        Ok(())
    }

    #[test]
    fn test_config_load_partial() -> Result<()> {
        let cfg = load_str(
            r##"
version = 1

http {
  url = "http://example.net/"
}
"##,
        )?;

        assert_eq!(SerialConfig::default(), cfg.serial);
        assert_eq!("http://example.net/", cfg.http.url);
        assert!(!cfg.http.strict);
        Ok(())
    }

    #[test]
    fn test_config_load_bad_version() {
        assert!(load_str("version = 3\n").is_err());
    }

    #[test]
    fn test_config_merge() {
        let opts = RunOpts {
            port: Some("/dev/ttyUSB0".to_string()),
            baud: None,
            read_timeout: None,
            url: Some("http://localhost/".to_string()),
            http_timeout: Some(5),
            strict: true,
        };
        let cfg = Config::default().merge(&opts);

        assert_eq!("/dev/ttyUSB0", cfg.serial.port);
        assert_eq!(DEF_BAUD, cfg.serial.baud);
        assert_eq!("http://localhost/", cfg.http.url);
        assert_eq!(Some(Duration::from_secs(5)), cfg.http_timeout());
        assert_eq!(StatusPolicy::RequireSuccess, cfg.policy());
    }
}
