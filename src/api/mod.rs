//! JIRA API client and types.
//!
//! This module provides the single remote call the plugin makes: issue creation
//! through the JIRA REST API.

mod auth;
mod client;
pub mod error;
pub mod types;

pub use auth::Auth;
pub use client::{IssueCreator, JiraClient, DEFAULT_TIMEOUT_SECS};
pub use error::ApiError;
pub use types::{CreateIssueRequest, CreatedIssue, DEFAULT_ISSUE_TYPE};
