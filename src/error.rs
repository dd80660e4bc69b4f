//! Centralized error types for the command-line host.
//!
//! The library modules each define their own `thiserror` enum. [`AppError`]
//! aggregates them for the binary and adds operator-facing messages.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::secrets::SecretError;
use crate::tools::ToolError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Tool registration or invocation errors.
    #[error("{0}")]
    Tool(ToolError),

    /// Secret store errors.
    #[error("{0}")]
    Secret(#[from] SecretError),

    /// Malformed JSON on the command line.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl From<ToolError> for AppError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::Config(e) => AppError::Config(e),
            ToolError::Api(e) => AppError::Api(e),
            other => AppError::Tool(other),
        }
    }
}

impl AppError {
    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::MissingCredentials(_) => e.to_string(),
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read the settings file. Please check it is readable.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Settings file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::Unauthorized => {
                    "Authentication failed. Please check your email and API token.".to_string()
                }
                ApiError::Forbidden(msg) => format!("Access denied: {}", msg),
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::BadRequest(msg) => format!("JIRA rejected the issue: {}", msg),
                ApiError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError(msg) => format!("JIRA server error: {}", msg),
                ApiError::Network(err) => format!("Connection failed: {}", err),
                ApiError::InvalidResponse(msg) => format!("Unexpected response from JIRA: {}", msg),
            },
            AppError::Tool(e) => e.to_string(),
            AppError::Secret(_) => {
                "Could not access secure storage. Is a keyring service running?".to_string()
            }
            AppError::Json(e) => format!("Arguments are not valid JSON: {}", e),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::MissingCredentials(_)) => {
                Some("Run 'llm-tools-jira keys set jira-server https://example.atlassian.net' (and likewise jira-email, jira-api-token).")
            }
            AppError::Api(ApiError::Unauthorized) => {
                Some("Check your API token at https://id.atlassian.com/manage-profile/security/api-tokens")
            }
            AppError::Api(ApiError::Network(_)) => Some("Check your internet connection and JIRA URL."),
            AppError::Tool(ToolError::UnknownTool(_)) => {
                Some("Run 'llm-tools-jira tools' to list available tools.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
