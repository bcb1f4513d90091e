//! Server configuration.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration and a file only needs the fields it overrides:
//!
//! ```toml
//! banner = "Welcome back"
//! max_sessions = 16
//! log_level = "debug"
//! ```

use std::{fs, path::Path};

use murmur_app::{DEFAULT_BANNER, DEFAULT_SIZE, SessionParams};
use serde::Deserialize;

use crate::{ConfigError, Connection};

/// Levels accepted by `log_level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Host configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Text shown while a session waits for its identity lookup.
    pub banner: String,
    /// Maximum concurrently hosted sessions.
    pub max_sessions: usize,
    /// Width used when the transport does not report one.
    pub default_width: u16,
    /// Height used when the transport does not report one.
    pub default_height: u16,
    /// Default tracing filter. `RUST_LOG` takes precedence.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            banner: DEFAULT_BANNER.to_string(),
            max_sessions: 64,
            default_width: DEFAULT_SIZE.0,
            default_height: DEFAULT_SIZE.1,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Read and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml(&content)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_sessions == 0 {
            return Err(ConfigError::Invalid { field: "max_sessions", reason: "must be at least 1" });
        }
        if self.default_width == 0 || self.default_height == 0 {
            return Err(ConfigError::Invalid {
                field: "default_width/default_height",
                reason: "must be non-zero",
            });
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::Invalid {
                field: "log_level",
                reason: "expected one of trace, debug, info, warn, error",
            });
        }
        Ok(())
    }

    /// Session parameters for `connection`.
    ///
    /// The transport's window size wins; the configured default fills in when
    /// it has none.
    pub fn session_params(&self, connection: Connection) -> SessionParams {
        let (width, height) = connection.size.unwrap_or((self.default_width, self.default_height));
        SessionParams::new(connection.public_key)
            .with_size(width, height)
            .with_banner(self.banner.clone())
    }
}
