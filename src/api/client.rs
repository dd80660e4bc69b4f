//! JIRA API client implementation.
//!
//! The client holds one reusable HTTP connection pool and a pre-encoded
//! authorization header. It performs exactly one request per call: there is
//! no retry and no error translation beyond mapping HTTP statuses to
//! [`ApiError`] variants.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, info, instrument, warn};

use super::auth::Auth;
use super::error::{ApiError, Result};
use super::types::{CreateIssueRequest, CreatedIssue};
use crate::config::Credentials;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The remote call the toolbox depends on.
///
/// [`JiraClient`] is the production implementation; tests substitute their
/// own to observe requests and script responses.
#[async_trait]
pub trait IssueCreator: Send + Sync {
    /// Create an issue and return what the server assigned to it.
    async fn create_issue(&self, request: &CreateIssueRequest) -> Result<CreatedIssue>;
}

/// The JIRA API client.
#[derive(Debug)]
pub struct JiraClient {
    /// The HTTP client.
    client: Client,
    /// The base URL for the JIRA instance.
    base_url: String,
    /// Authentication credentials.
    auth: Auth,
}

impl JiraClient {
    /// Create a client from resolved credentials.
    ///
    /// Does not contact the server; bad credentials surface on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(credentials: &Credentials, timeout: Duration) -> Result<Self> {
        let client = Self::build_http_client(timeout)?;
        let base_url = normalize_base_url(credentials.server());
        let auth = Auth::new(credentials.email(), credentials.api_token());

        info!(base_url = %base_url, email = %auth.email(), "Created JIRA client");

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    fn build_http_client(timeout: Duration) -> Result<Client> {
        Client::builder()
            .timeout(timeout)
            .user_agent(concat!("llm-tools-jira/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Network)
    }

    /// Create an issue.
    ///
    /// Calls `POST /rest/api/2/issue` and returns the created issue's id and key.
    #[instrument(skip(self, request), fields(project = %request.project_key(), issue_type = %request.issue_type()))]
    pub async fn create_issue(&self, request: &CreateIssueRequest) -> Result<CreatedIssue> {
        debug!("Creating issue");

        let url = format!("{}/rest/api/2/issue", self.base_url);
        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let issue: CreatedIssue = Self::handle_response(response).await?;
        info!(issue_key = %issue.key, "Created issue");
        Ok(issue)
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!(status = %status, "Error response body: {}", error_body);

            Err(Self::error_from_response(status, &url, &error_body))
        }
    }

    /// Create an appropriate error from an HTTP response.
    ///
    /// Jira reports failures as `{"errorMessages": [...], "errors": {field: msg}}`;
    /// both parts are folded into the error context when present.
    fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
        let mut parts: Vec<String> = Vec::new();

        if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(messages) = json.get("errorMessages").and_then(|m| m.as_array()) {
                parts.extend(messages.iter().filter_map(|v| v.as_str()).map(String::from));
            }
            if let Some(errors) = json.get("errors").and_then(|e| e.as_object()) {
                parts.extend(errors.iter().map(|(field, msg)| match msg.as_str() {
                    Some(text) => format!("{}: {}", field, text),
                    None => format!("{}: {}", field, msg),
                }));
            }
        }

        if parts.is_empty() {
            ApiError::from_status(status, url)
        } else {
            ApiError::from_status(status, &parts.join(", "))
        }
    }
}

#[async_trait]
impl IssueCreator for JiraClient {
    async fn create_issue(&self, request: &CreateIssueRequest) -> Result<CreatedIssue> {
        JiraClient::create_issue(self, request).await
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    // Plain HTTP is tolerated for local test servers only.
    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}
