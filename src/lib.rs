//! llm-tools-jira - Jira issue creation as an LLM tool.
//!
//! The crate publishes one toolbox, [`Jira`], with one tool,
//! `Jira_create_issue`. A host registers it through [`register_tools`] and
//! then dispatches [`ToolCall`]s through its [`ToolRegistry`].
//!
//! ```no_run
//! use llm_tools_jira::config::{CredentialOverrides, Settings};
//! use llm_tools_jira::secrets::KeyringStore;
//! use llm_tools_jira::{register_tools, Jira, ToolCall, ToolRegistry};
//!
//! # async fn run() -> Result<(), llm_tools_jira::ToolError> {
//! let jira = Jira::new(&CredentialOverrides::default(), &KeyringStore::new(), &Settings::default())?;
//! let mut registry = ToolRegistry::new();
//! register_tools(&mut registry, jira)?;
//!
//! let result = registry
//!     .call(ToolCall::new(
//!         "Jira_create_issue",
//!         serde_json::json!({"project_key": "ENG", "summary": "Fix login bug", "description": "Users cannot log in"}),
//!     ))
//!     .await?;
//! println!("{}", result.output);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod secrets;
pub mod tools;

pub use tools::{
    CreateIssueArgs, Jira, Method, ToolCall, ToolDefinition, ToolError, ToolRegistry, ToolResult,
    Toolbox,
};

/// Register this plugin's toolboxes with the host.
///
/// # Errors
///
/// Fails if the host already has a tool with the same name.
pub fn register_tools(registry: &mut ToolRegistry, jira: Jira) -> tools::Result<()> {
    registry.register(jira)
}
