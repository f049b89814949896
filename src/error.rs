//! Error types for the hosts-intercept crate.
//!
//! Only failures that abort a build pass are represented here. Recoverable
//! failures (a bad hosts line, a mirror fetch that times out, a cache write
//! that fails) are logged at the site and the build continues.

use thiserror::Error;

/// Fatal errors for a hosts-table build pass.
#[derive(Error, Debug)]
pub enum HostsError {
    /// The mandatory local override file could not be read.
    #[error("Failed to read hosts override file '{name}': {source}")]
    OverrideFile {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The settings file exists but could not be parsed or written.
    #[error("Settings file error at {path}: {message}")]
    Settings { path: String, message: String },

    /// I/O error wrapper.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HostsError {
    /// Creates a new settings file error.
    pub fn settings(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Settings {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias using HostsError.
pub type Result<T> = std::result::Result<T, HostsError>;
