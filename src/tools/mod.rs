//! The tool-calling boundary.
//!
//! A [`Toolbox`] is a named collection of methods. Each method is published to
//! the host as a tool named `<ToolboxName>_<methodName>` with a JSON Schema
//! describing its arguments. The [`ToolRegistry`] routes incoming
//! [`ToolCall`]s to the right toolbox and wraps the output in a
//! [`ToolResult`].

pub mod error;
mod jira;
mod registry;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use error::{Result, ToolError};
pub use jira::{CreateIssueArgs, Jira};
pub use registry::ToolRegistry;

#[cfg(test)]
pub(crate) use jira::stub as jira_stub;

/// One method of a toolbox, as declared by the toolbox itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    /// The method name, without the toolbox prefix.
    pub name: &'static str,
    /// What the method does, shown to the model.
    pub description: &'static str,
    /// JSON Schema of the method's arguments object.
    pub parameters: Value,
}

impl Method {
    /// Declare a method whose arguments deserialize into `T`.
    pub fn new<T: JsonSchema>(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            parameters: schemars::schema_for!(T).to_value(),
        }
    }

    /// The host-facing definition of this method on `toolbox`.
    pub fn definition(&self, toolbox: &str) -> ToolDefinition {
        ToolDefinition {
            name: tool_name(toolbox, self.name),
            description: self.description.to_string(),
            parameters: self.parameters.clone(),
        }
    }
}

/// A tool as presented to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// `<ToolboxName>_<methodName>`.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for the arguments.
    pub parameters: Value,
}

/// A request from the host to run a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// The tool name.
    pub name: String,
    /// Decoded arguments, normally a JSON object.
    #[serde(default)]
    pub arguments: Value,
    /// Host-managed call identifier, echoed back in the result.
    #[serde(default)]
    pub tool_call_id: Option<String>,
}

impl ToolCall {
    /// A call without an identifier.
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
            tool_call_id: None,
        }
    }

    /// Attach a call identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.tool_call_id = Some(id.into());
        self
    }
}

/// The output of a tool call, returned to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// The tool that ran.
    pub name: String,
    /// The tool's string output.
    pub output: String,
    /// Identifier of the call this answers.
    pub tool_call_id: Option<String>,
}

/// A named collection of callable methods.
#[async_trait]
pub trait Toolbox: Send + Sync {
    /// The toolbox name, used as the tool name prefix.
    fn name(&self) -> &'static str;

    /// The methods this toolbox exposes.
    fn methods(&self) -> Vec<Method>;

    /// Run `method` with the given arguments.
    async fn invoke(&self, method: &str, arguments: Value) -> Result<String>;
}

/// The host-facing name of a toolbox method.
pub fn tool_name(toolbox: &str, method: &str) -> String {
    format!("{}_{}", toolbox, method)
}

/// Decode a tool's arguments into its typed argument struct.
///
/// A missing (`null`) arguments value is treated as an empty object.
pub fn decode_arguments<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}
