//! Credential resolution.
//!
//! Explicit values win; anything not supplied is looked up in a
//! [`SecretStore`]. Resolution fails if any of the three values is still
//! missing afterwards.

use std::fmt;

use tracing::{debug, warn};

use super::{ConfigError, Result};
use crate::secrets::SecretStore;

/// Secret key holding the Jira server URL.
pub const SERVER_KEY: &str = "jira-server";
/// Secret key holding the account email.
pub const EMAIL_KEY: &str = "jira-email";
/// Secret key holding the API token.
pub const API_TOKEN_KEY: &str = "jira-api-token";

/// Explicit credential values supplied by the caller.
///
/// Any field left as `None` (or set to an empty string) falls back to the
/// secret store.
#[derive(Clone, Default)]
pub struct CredentialOverrides {
    /// The Jira server URL.
    pub server: Option<String>,
    /// The account email.
    pub email: Option<String>,
    /// The API token.
    pub api_token: Option<String>,
}

impl fmt::Debug for CredentialOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialOverrides")
            .field("server", &self.server)
            .field("email", &self.email)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CredentialOverrides {
    /// Overrides with all three values supplied.
    pub fn explicit(
        server: impl Into<String>,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            server: Some(server.into()),
            email: Some(email.into()),
            api_token: Some(api_token.into()),
        }
    }
}

/// Fully resolved Jira credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    server: String,
    email: String,
    api_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("server", &self.server)
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Create credentials from known values.
    pub fn new(
        server: impl Into<String>,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            email: email.into(),
            api_token: api_token.into(),
        }
    }

    /// Resolve credentials from overrides, falling back to `store`.
    ///
    /// The store is only consulted for values that were not supplied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] naming every key that could
    /// not be resolved.
    pub fn resolve(overrides: &CredentialOverrides, store: &dyn SecretStore) -> Result<Self> {
        let server = pick(overrides.server.as_deref(), SERVER_KEY, store);
        let email = pick(overrides.email.as_deref(), EMAIL_KEY, store);
        let api_token = pick(overrides.api_token.as_deref(), API_TOKEN_KEY, store);

        match (server, email, api_token) {
            (Some(server), Some(email), Some(api_token)) => Ok(Self {
                server,
                email,
                api_token,
            }),
            (server, email, api_token) => {
                let missing: Vec<&'static str> = [
                    (SERVER_KEY, server.is_none()),
                    (EMAIL_KEY, email.is_none()),
                    (API_TOKEN_KEY, api_token.is_none()),
                ]
                .into_iter()
                .filter_map(|(key, is_missing)| is_missing.then_some(key))
                .collect();
                Err(ConfigError::MissingCredentials(missing))
            }
        }
    }

    /// The Jira server URL.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// The account email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The API token.
    pub fn api_token(&self) -> &str {
        &self.api_token
    }
}

fn pick(explicit: Option<&str>, key: &str, store: &dyn SecretStore) -> Option<String> {
    if let Some(value) = explicit.filter(|v| !v.is_empty()) {
        return Some(value.to_string());
    }

    match store.get(key) {
        Ok(value) => {
            debug!(key, found = value.is_some(), "Looked up secret");
            value.filter(|v| !v.is_empty())
        }
        Err(e) => {
            warn!(key, error = %e, "Secret store lookup failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::{MemoryStore, SecretError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts lookups and never has a value.
    #[derive(Default)]
    struct CountingStore {
        lookups: AtomicUsize,
    }

    impl SecretStore for CountingStore {
        fn get(&self, _key: &str) -> std::result::Result<Option<String>, SecretError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    struct FailingStore;

    impl SecretStore for FailingStore {
        fn get(&self, _key: &str) -> std::result::Result<Option<String>, SecretError> {
            Err(SecretError::Unavailable("locked".to_string()))
        }
    }

    fn full_store() -> MemoryStore {
        MemoryStore::new()
            .with(SERVER_KEY, "https://stored.atlassian.net")
            .with(EMAIL_KEY, "stored@example.com")
            .with(API_TOKEN_KEY, "stored-token")
    }

    fn missing_keys(err: ConfigError) -> Vec<&'static str> {
        match err {
            ConfigError::MissingCredentials(keys) => keys,
            other => panic!("Expected MissingCredentials, got {:?}", other),
        }
    }

    #[test]
    fn test_explicit_values_skip_store() {
        let store = CountingStore::default();
        let overrides =
            CredentialOverrides::explicit("https://example.atlassian.net", "me@example.com", "dummy");

        let creds = Credentials::resolve(&overrides, &store).unwrap();

        assert_eq!(creds.server(), "https://example.atlassian.net");
        assert_eq!(creds.email(), "me@example.com");
        assert_eq!(creds.api_token(), "dummy");
        assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_falls_back_to_store() {
        let creds = Credentials::resolve(&CredentialOverrides::default(), &full_store()).unwrap();
        assert_eq!(creds.server(), "https://stored.atlassian.net");
        assert_eq!(creds.email(), "stored@example.com");
        assert_eq!(creds.api_token(), "stored-token");
    }

    #[test]
    fn test_explicit_overrides_stored_value() {
        let overrides = CredentialOverrides {
            email: Some("override@example.com".to_string()),
            ..Default::default()
        };
        let creds = Credentials::resolve(&overrides, &full_store()).unwrap();
        assert_eq!(creds.email(), "override@example.com");
        assert_eq!(creds.server(), "https://stored.atlassian.net");
    }

    #[test]
    fn test_all_missing_names_every_key() {
        let err = Credentials::resolve(&CredentialOverrides::default(), &MemoryStore::new())
            .unwrap_err();
        assert_eq!(missing_keys(err), vec![SERVER_KEY, EMAIL_KEY, API_TOKEN_KEY]);
    }

    #[test]
    fn test_each_subset_reports_exactly_the_missing_keys() {
        let keys = [SERVER_KEY, EMAIL_KEY, API_TOKEN_KEY];
        // Every non-full subset of keys present in the store.
        for mask in 0u8..7 {
            let mut store = MemoryStore::new();
            let mut expected = Vec::new();
            for (bit, key) in keys.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    store.set(*key, "value");
                } else {
                    expected.push(*key);
                }
            }

            let err = Credentials::resolve(&CredentialOverrides::default(), &store).unwrap_err();
            assert_eq!(missing_keys(err), expected, "mask {:03b}", mask);
        }
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let store = MemoryStore::new().with(SERVER_KEY, "");
        let overrides = CredentialOverrides {
            server: None,
            email: Some(String::new()),
            api_token: Some("t".to_string()),
        };

        let err = Credentials::resolve(&overrides, &store).unwrap_err();
        assert_eq!(missing_keys(err), vec![SERVER_KEY, EMAIL_KEY]);
    }

    #[test]
    fn test_store_failure_treated_as_missing() {
        let overrides = CredentialOverrides {
            server: Some("https://example.atlassian.net".to_string()),
            ..Default::default()
        };
        let err = Credentials::resolve(&overrides, &FailingStore).unwrap_err();
        assert_eq!(missing_keys(err), vec![EMAIL_KEY, API_TOKEN_KEY]);
    }

    #[test]
    fn test_missing_message_names_keys_and_remedy() {
        let err = Credentials::resolve(
            &CredentialOverrides::explicit("https://x", "", ""),
            &MemoryStore::new(),
        )
        .unwrap_err();
        let msg = err.to_string();

        assert!(msg.contains("jira-email"));
        assert!(msg.contains("jira-api-token"));
        assert!(!msg.contains("jira-server"));
        assert!(msg.contains("keys set"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let creds = Credentials::new("https://x", "me@example.com", "secret_token");
        let debug_output = format!("{:?}", creds);
        assert!(!debug_output.contains("secret_token"));
        assert!(debug_output.contains("me@example.com"));
    }

    #[test]
    fn test_overrides_debug_redacts_token() {
        let overrides =
            CredentialOverrides::explicit("https://x", "me@example.com", "secret_token");
        let debug_output = format!("{:?}", overrides);
        assert!(!debug_output.contains("secret_token"));
        assert!(debug_output.contains("<redacted>"));
        assert!(debug_output.contains("me@example.com"));

        let unset = format!("{:?}", CredentialOverrides::default());
        assert!(unset.contains("api_token: None"));
    }
}
