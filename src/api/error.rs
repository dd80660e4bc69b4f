//! API error types for the Jira client.

use thiserror::Error;

/// Errors that can occur when talking to the Jira REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed - invalid email or API token.
    #[error("Authentication failed: check your email and API token")]
    Unauthorized,

    /// Permission denied - the account cannot create issues here.
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The request was rejected, e.g. an unknown project key or issue type.
    #[error("Request rejected by JIRA: {0}")]
    BadRequest(String),

    /// Rate limited by the JIRA API.
    #[error("Rate limited: please wait before retrying")]
    RateLimited,

    /// JIRA server error.
    #[error("JIRA server error: {0}")]
    ServerError(String),

    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid response from the API.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            400 => ApiError::BadRequest(context.to_string()),
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(context.to_string()),
            404 => ApiError::NotFound(context.to_string()),
            429 => ApiError::RateLimited,
            402..=499 => ApiError::BadRequest(format!("HTTP {}: {}", status, context)),
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ApiError::ServerError(format!("Unexpected HTTP {}: {}", status, context)),
        }
    }
}
