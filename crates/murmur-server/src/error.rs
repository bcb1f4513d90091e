//! Server error types.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors loading a [`crate::ServerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file is not valid TOML or has unknown or mistyped fields.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field parsed but its value is unusable.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Errors that can occur while hosting sessions.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration error.
    ///
    /// Fatal at startup. Fix the file and restart.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The registry is full.
    ///
    /// The connection is refused before any store operation runs; existing
    /// sessions are unaffected.
    #[error("session limit of {max} reached")]
    SessionLimit {
        /// Configured maximum.
        max: usize,
    },

    /// The session's driver failed.
    ///
    /// Fatal for that session only.
    #[error("driver error: {0}")]
    Driver(String),
}
