//! Registry of toolboxes available to the host.
//!
//! Tool names are resolved once at registration time, so a call is a single
//! map lookup followed by the toolbox's own dispatch.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::{Result, ToolCall, ToolDefinition, ToolError, ToolResult, Toolbox};

/// Where a tool name points.
struct Route {
    /// Index into `toolboxes`.
    toolbox: usize,
    /// The method name within that toolbox.
    method: &'static str,
    /// What the host is shown.
    definition: ToolDefinition,
}

/// Registry of toolboxes and the tools they publish.
#[derive(Default)]
pub struct ToolRegistry {
    /// All registered toolboxes, in registration order.
    toolboxes: Vec<Arc<dyn Toolbox>>,
    /// Tool name to route.
    routes: BTreeMap<String, Route>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a toolbox; each of its methods becomes a tool.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::DuplicateTool`] if any resulting tool name is
    /// already taken. Nothing is registered in that case.
    pub fn register(&mut self, toolbox: impl Toolbox + 'static) -> Result<()> {
        let toolbox: Arc<dyn Toolbox> = Arc::new(toolbox);
        let index = self.toolboxes.len();

        let mut routes: Vec<(String, Route)> = Vec::new();
        for method in toolbox.methods() {
            let definition = method.definition(toolbox.name());
            let name = definition.name.clone();
            if self.routes.contains_key(&name) || routes.iter().any(|(n, _)| n == &name) {
                warn!(tool = %name, "Duplicate tool name");
                return Err(ToolError::DuplicateTool(name));
            }
            routes.push((
                name,
                Route {
                    toolbox: index,
                    method: method.name,
                    definition,
                },
            ));
        }

        info!(toolbox = toolbox.name(), tools = routes.len(), "Registered toolbox");
        self.routes.extend(routes);
        self.toolboxes.push(toolbox);
        Ok(())
    }

    /// Definitions of every registered tool, sorted by name.
    pub fn tools(&self) -> Vec<ToolDefinition> {
        self.routes
            .values()
            .map(|route| route.definition.clone())
            .collect()
    }

    /// Check if a tool is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Run a tool call and wrap its output.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] for unregistered names; otherwise
    /// whatever the toolbox returned.
    #[instrument(skip(self, call), fields(tool = %call.name, tool_call_id = ?call.tool_call_id))]
    pub async fn call(&self, call: ToolCall) -> Result<ToolResult> {
        let route = self
            .routes
            .get(&call.name)
            .ok_or_else(|| ToolError::UnknownTool(call.name.clone()))?;
        let toolbox = &self.toolboxes[route.toolbox];

        debug!("Invoking tool");
        let output = toolbox.invoke(route.method, call.arguments).await?;

        Ok(ToolResult {
            name: call.name,
            output,
            tool_call_id: call.tool_call_id,
        })
    }

    /// Run several calls in order, stopping at the first error.
    pub async fn call_all(&self, calls: Vec<ToolCall>) -> Result<Vec<ToolResult>> {
        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            results.push(self.call(call).await?);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::tools::jira_stub::StubClient;
    use crate::tools::{decode_arguments, tool_name, Jira, Method};
    use async_trait::async_trait;
    use schemars::JsonSchema;
    use serde::Deserialize;
    use serde_json::{json, Value};

    #[derive(Deserialize, JsonSchema)]
    struct SayArgs {
        text: String,
    }

    /// A two-method toolbox with no external dependencies.
    struct Echo;

    #[async_trait]
    impl Toolbox for Echo {
        fn name(&self) -> &'static str {
            "Echo"
        }

        fn methods(&self) -> Vec<Method> {
            vec![
                Method::new::<SayArgs>("say", "Repeat the text"),
                Method::new::<SayArgs>("shout", "Repeat the text loudly"),
            ]
        }

        async fn invoke(&self, method: &str, arguments: Value) -> Result<String> {
            let args: SayArgs = decode_arguments(&tool_name("Echo", method), arguments)?;
            match method {
                "say" => Ok(args.text),
                "shout" => Ok(args.text.to_uppercase()),
                _ => Err(ToolError::UnknownTool(method.to_string())),
            }
        }
    }

    fn jira_registry(stub: StubClient) -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Jira::with_client(stub)).unwrap();
        registry
    }

    #[test]
    fn test_one_tool_per_method() {
        let mut registry = ToolRegistry::new();
        registry.register(Echo).unwrap();

        let names: Vec<String> = registry.tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Echo_say", "Echo_shout"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_jira_registers_single_tool() {
        let registry = jira_registry(StubClient::always("ENG-1"));
        let tools = registry.tools();

        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "Jira_create_issue");
        assert!(tools[0].parameters["properties"]["project_key"].is_object());
    }

    #[test]
    fn test_duplicate_toolbox_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(Echo).unwrap();

        let err = registry.register(Echo).unwrap_err();
        assert!(matches!(err, ToolError::DuplicateTool(name) if name == "Echo_say"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains("Jira_create_issue"));
    }

    #[tokio::test]
    async fn test_call_routes_to_method() {
        let mut registry = ToolRegistry::new();
        registry.register(Echo).unwrap();

        let result = registry
            .call(ToolCall::new("Echo_shout", json!({"text": "hi"})).with_id("call-1"))
            .await
            .unwrap();

        assert_eq!(result.output, "HI");
        assert_eq!(result.tool_call_id.as_deref(), Some("call-1"));
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry
            .call(ToolCall::new("Jira_comment", json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(name) if name == "Jira_comment"));
    }

    #[tokio::test]
    async fn test_jira_create_issue_tool_results() {
        let registry = jira_registry(StubClient::always("ENG-123"));

        let calls: Vec<ToolCall> = serde_json::from_value(json!([
            {
                "name": "Jira_create_issue",
                "arguments": {
                    "project_key": "ENG",
                    "summary": "Example summary",
                    "description": "Example description"
                }
            }
        ]))
        .unwrap();

        let results = registry.call_all(calls).await.unwrap();

        assert_eq!(
            serde_json::to_value(&results).unwrap(),
            json!([
                {
                    "name": "Jira_create_issue",
                    "output": "ENG-123",
                    "tool_call_id": null
                }
            ])
        );
    }

    #[tokio::test]
    async fn test_remote_error_reaches_host_unchanged() {
        let registry = jira_registry(StubClient::failing(ApiError::Unauthorized));

        let err = registry
            .call(ToolCall::new(
                "Jira_create_issue",
                json!({"project_key": "ENG", "summary": "s", "description": "d"}),
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::Api(ApiError::Unauthorized)));
        assert_eq!(err.to_string(), ApiError::Unauthorized.to_string());
    }
}
