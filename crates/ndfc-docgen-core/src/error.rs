//! Error handling for the NDFC documentation generator.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! Two broad families exist. Usage errors (`Usage`, `Config`) mean a caller
//! skipped a mandatory setup step or supplied an invalid value. Transport
//! errors (`Http`, `Request`, `Auth`) come from talking to the controller.
//! Neither is retried.
//!
//! # Examples
//!
//! ```
//! use ndfc_docgen_core::error::{Error, Result};
//!
//! fn might_fail(name: Option<&str>) -> Result<&str> {
//!     name.ok_or_else(|| Error::usage("set module_name before calling commit()"))
//! }
//! assert!(might_fail(None).is_err());
//! ```

use thiserror::Error;

/// Result type for NDFC documentation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for NDFC documentation operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Transport level failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The controller answered with a non-200 status
    #[error("status {status} for {verb} url {url}")]
    Request {
        verb: String,
        url: String,
        status: u16,
    },

    /// Login did not yield a token
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A mandatory property was not set, or was set to an invalid value
    #[error("Usage error: {0}")]
    Usage(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new usage error
    pub fn usage<S: Into<String>>(msg: S) -> Self {
        Self::Usage(msg.into())
    }

    /// Create a new authentication error
    pub fn auth<S: Into<String>>(msg: S) -> Self {
        Self::Auth(msg.into())
    }
}
