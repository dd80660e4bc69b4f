//! JIRA API request and response types for issue creation.
//!
//! These model `POST /rest/api/2/issue`. Version 2 of the API accepts the
//! description as a plain string, so no Atlassian Document Format conversion
//! is needed.

use serde::{Deserialize, Serialize};

/// The issue type used when the caller does not name one.
pub const DEFAULT_ISSUE_TYPE: &str = "Task";

/// Request body for creating an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIssueRequest {
    /// The fields of the new issue.
    pub fields: NewIssueFields,
}

impl CreateIssueRequest {
    /// Build a request from its four parts.
    pub fn new(
        project_key: impl Into<String>,
        summary: impl Into<String>,
        description: impl Into<String>,
        issue_type: impl Into<String>,
    ) -> Self {
        Self {
            fields: NewIssueFields {
                project: ProjectRef {
                    key: project_key.into(),
                },
                summary: summary.into(),
                description: description.into(),
                issuetype: IssueTypeRef {
                    name: issue_type.into(),
                },
            },
        }
    }

    /// The target project key.
    pub fn project_key(&self) -> &str {
        &self.fields.project.key
    }

    /// The issue type name.
    pub fn issue_type(&self) -> &str {
        &self.fields.issuetype.name
    }
}

/// Fields sent when creating an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIssueFields {
    /// The project, referenced by key.
    pub project: ProjectRef,
    /// One-line summary.
    pub summary: String,
    /// Free-text description.
    pub description: String,
    /// The issue type, referenced by name.
    pub issuetype: IssueTypeRef,
}

/// A project reference by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    /// The project key (e.g., "ENG").
    pub key: String,
}

/// An issue type reference by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTypeRef {
    /// The issue type name (e.g., "Task", "Bug").
    pub name: String,
}

/// Response returned after an issue is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// The issue ID.
    pub id: String,
    /// The issue key (e.g., "ENG-123").
    pub key: String,
    /// API URL of the new issue.
    #[serde(rename = "self", default)]
    pub self_url: String,
}
