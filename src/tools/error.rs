//! Errors raised while registering or invoking tools.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Errors that can occur at the tool-calling boundary.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No registered tool has this name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Two registered methods produce the same tool name.
    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    /// The arguments do not match the tool's declared parameters.
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments {
        /// The tool being called.
        tool: String,
        /// What was wrong with the arguments.
        message: String,
    },

    /// The toolbox could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The remote call failed. Passed through unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for tool operations.
pub type Result<T> = std::result::Result<T, ToolError>;
