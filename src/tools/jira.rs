//! The `Jira` toolbox.
//!
//! Exposes one tool, `Jira_create_issue`, which creates an issue and returns
//! its key. The toolbox owns a single client for its whole lifetime.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{decode_arguments, tool_name, Method, Result, ToolError, Toolbox};
use crate::api::{self, CreateIssueRequest, IssueCreator, JiraClient, DEFAULT_ISSUE_TYPE};
use crate::config::{CredentialOverrides, Credentials, Settings};
use crate::secrets::SecretStore;

const CREATE_ISSUE: &str = "create_issue";

/// Arguments of `Jira_create_issue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreateIssueArgs {
    /// The target project key (e.g. "ENG").
    pub project_key: String,
    /// One-line summary of the issue.
    pub summary: String,
    /// Full description body.
    pub description: String,
    /// Issue type name such as "Task", "Bug" or "Story". Defaults to "Task".
    #[serde(default = "default_issue_type")]
    pub issue_type: String,
}

fn default_issue_type() -> String {
    DEFAULT_ISSUE_TYPE.to_string()
}

impl CreateIssueArgs {
    /// Arguments with the default issue type.
    pub fn new(
        project_key: impl Into<String>,
        summary: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            project_key: project_key.into(),
            summary: summary.into(),
            description: description.into(),
            issue_type: default_issue_type(),
        }
    }

    /// Set the issue type.
    pub fn issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = issue_type.into();
        self
    }
}

impl From<CreateIssueArgs> for CreateIssueRequest {
    fn from(args: CreateIssueArgs) -> Self {
        CreateIssueRequest::new(args.project_key, args.summary, args.description, args.issue_type)
    }
}

/// A toolbox that exposes Jira-related tools.
pub struct Jira {
    client: Box<dyn IssueCreator>,
}

impl std::fmt::Debug for Jira {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Jira").finish_non_exhaustive()
    }
}

impl Jira {
    /// The toolbox name.
    pub const NAME: &'static str = "Jira";

    /// Build the toolbox, resolving credentials from `overrides` and `store`.
    ///
    /// No request is sent here; invalid credentials surface on the first call.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Config`] if credentials are missing, or
    /// [`ToolError::Api`] if the HTTP client cannot be built.
    pub fn new(
        overrides: &CredentialOverrides,
        store: &dyn SecretStore,
        settings: &Settings,
    ) -> Result<Self> {
        let credentials = Credentials::resolve(overrides, store)?;
        let client = JiraClient::new(&credentials, settings.timeout())?;
        Ok(Self::with_client(client))
    }

    /// Build the toolbox around an existing client.
    pub fn with_client(client: impl IssueCreator + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// The tools this toolbox publishes. Needs no instance or credentials.
    pub fn manifest() -> Vec<Method> {
        vec![Method::new::<CreateIssueArgs>(
            CREATE_ISSUE,
            "Create an issue in Jira and return its key.",
        )]
    }

    /// Create an issue and return its key, e.g. `"ENG-1234"`.
    ///
    /// Not idempotent: each call creates a new issue.
    ///
    /// # Errors
    ///
    /// Any failure of the remote call is returned as-is.
    pub async fn create_issue(&self, args: CreateIssueArgs) -> api::error::Result<String> {
        let request = CreateIssueRequest::from(args);
        debug!(project = %request.project_key(), issue_type = %request.issue_type(), "create_issue");

        let issue = self.client.create_issue(&request).await?;
        Ok(issue.key)
    }
}

#[async_trait]
impl Toolbox for Jira {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn methods(&self) -> Vec<Method> {
        Self::manifest()
    }

    async fn invoke(&self, method: &str, arguments: Value) -> Result<String> {
        let tool = tool_name(Self::NAME, method);
        match method {
            CREATE_ISSUE => {
                let args: CreateIssueArgs = decode_arguments(&tool, arguments)?;
                self.create_issue(args).await.map_err(ToolError::from)
            }
            _ => Err(ToolError::UnknownTool(tool)),
        }
    }
}
