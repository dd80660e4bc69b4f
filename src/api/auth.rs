//! Basic authentication for the Jira API.
//!
//! Jira Cloud accepts `email:api_token` as HTTP Basic credentials. The header
//! is encoded once when the client is built and reused for every request.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Authentication credentials for JIRA.
#[derive(Debug, Clone)]
pub struct Auth {
    /// The user's email address.
    email: String,
    /// The Base64-encoded authorization header value.
    auth_header: String,
}

impl Auth {
    /// Create new authentication credentials from email and token.
    ///
    /// The token is immediately encoded and the raw token is not stored.
    pub fn new(email: &str, token: &str) -> Self {
        let auth_header = build_auth_header(email, token);
        Self {
            email: email.to_string(),
            auth_header,
        }
    }

    /// Get the authorization header value for HTTP requests.
    ///
    /// Returns the complete "Basic ..." header value.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }

    /// Get the email address.
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Encodes "email:token" in Base64 and prepends "Basic ".
fn build_auth_header(email: &str, token: &str) -> String {
    let credentials = format!("{}:{}", email, token);
    let encoded = BASE64.encode(credentials.as_bytes());
    format!("Basic {}", encoded)
}
