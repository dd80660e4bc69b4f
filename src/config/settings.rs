//! Plugin settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ConfigError, Result};
use crate::api::DEFAULT_TIMEOUT_SECS;

/// Settings read from `config.toml`.
///
/// A missing file yields the defaults; a present file may set any subset of
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load settings from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined, or the
    /// file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load settings from `path`, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let settings: Settings = toml::from_str(&contents).map_err(ConfigError::ParseError)?;
        settings.validate()?;

        debug!(path = %path.display(), ?settings, "Loaded settings");
        Ok(settings)
    }

    /// `<config dir>/llm-tools-jira/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("llm-tools-jira").join("config.toml"))
    }

    /// Check the settings for values the client cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
