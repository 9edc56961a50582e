//! Controller connection settings.
//!
//! The controller address and credentials come from the environment, the
//! same way the shell helpers around this tool expect them:
//!
//! ```shell
//! export NDFC_IP4=10.1.1.1
//! export NDFC_USERNAME=admin     # defaults to admin
//! export NDFC_PASSWORD=my_password
//! export NDFC_DOMAIN=local       # defaults to local
//! ```
//!
//! # Examples
//!
//! ```
//! use ndfc_docgen_core::config::Config;
//!
//! let mut config = Config::new("10.1.1.1", "admin", "secret");
//! config.request_timeout = 30;
//! assert_eq!(config.domain, "local");
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::time::Duration;

// External imports (alphabetized)
use url::Url;

use crate::Error;

pub const ENV_IP4: &str = "NDFC_IP4";
pub const ENV_USERNAME: &str = "NDFC_USERNAME";
pub const ENV_PASSWORD: &str = "NDFC_PASSWORD";
pub const ENV_DOMAIN: &str = "NDFC_DOMAIN";

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 20;

/// Connection settings for an NDFC controller
#[derive(Clone)]
pub struct Config {
    /// IPv4 address (or host name) of the controller
    pub ip4: String,

    /// Login user name
    pub username: String,

    /// Login password
    pub password: String,

    /// Login domain
    pub domain: String,

    /// Timeout, in seconds, applied to every request
    pub request_timeout: u64,

    /// Verify the controller's TLS certificate
    pub request_verify: bool,
}

impl Config {
    /// Create a new Config with default values
    pub fn new(
        ip4: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            ip4: ip4.into(),
            username: username.into(),
            password: password.into(),
            domain: default_domain(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            request_verify: false,
        }
    }

    /// Load the settings from the process environment
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the settings through an arbitrary variable lookup.
    ///
    /// `NDFC_IP4` and `NDFC_PASSWORD` are required. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let ip4 = read(ENV_IP4).ok_or_else(|| {
            Error::config(format!(
                "Unable to read {ENV_IP4} from the environment. \
                 Please set it and try again. (e.g. export {ENV_IP4}=10.1.1.1)"
            ))
        })?;
        let password = read(ENV_PASSWORD).ok_or_else(|| {
            Error::config(format!(
                "Unable to read {ENV_PASSWORD} from the environment. \
                 Please set it and try again. (e.g. export {ENV_PASSWORD}=mypassword)"
            ))
        })?;
        let username = read(ENV_USERNAME).unwrap_or_else(default_username);

        let mut config = Self::new(ip4, username, password);
        if let Some(domain) = read(ENV_DOMAIN) {
            config.domain = domain;
        }
        Ok(config)
    }

    /// Base URL of the controller, e.g. `https://10.1.1.1`
    pub fn base_url(&self) -> crate::Result<Url> {
        let raw = format!("https://{}", self.ip4.trim());
        Url::parse(&raw)
            .map_err(|e| Error::config(format!("Invalid controller address {}: {}", self.ip4, e)))
    }

    /// The request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("ip4", &self.ip4)
            .field("username", &self.username)
            .field("password", &"********")
            .field("domain", &self.domain)
            .field("request_timeout", &self.request_timeout)
            .field("request_verify", &self.request_verify)
            .finish()
    }
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_domain() -> String {
    "local".to_string()
}
