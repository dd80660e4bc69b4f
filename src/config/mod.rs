//! Configuration for the Jira toolbox.
//!
//! This module resolves the credentials the toolbox authenticates with and
//! loads the optional settings file.

mod credentials;
mod settings;

use thiserror::Error;

pub use credentials::{CredentialOverrides, Credentials, API_TOKEN_KEY, EMAIL_KEY, SERVER_KEY};
pub use settings::Settings;

/// Errors that can occur while configuring the toolbox.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required credentials could not be resolved.
    #[error("{}", missing_credentials_message(.0))]
    MissingCredentials(Vec<&'static str>),

    /// The platform config directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The settings file could not be read.
    #[error("failed to read settings file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The settings file is not valid TOML for [`Settings`].
    #[error("failed to parse settings file: {0}")]
    ParseError(#[source] toml::de::Error),

    /// A setting has an unusable value.
    #[error("invalid settings: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

fn missing_credentials_message(keys: &[&'static str]) -> String {
    format!(
        "Missing Jira credentials: {}. Run `llm-tools-jira keys set <name> <value>` for each, \
         or pass them explicitly.",
        keys.join(", ")
    )
}
