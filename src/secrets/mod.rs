//! Keyed secret storage.
//!
//! Credentials are looked up by name (`jira-server`, `jira-email`,
//! `jira-api-token`) through the [`SecretStore`] trait, so the resolver never
//! touches process-wide state directly.

mod keyring_store;

use std::collections::HashMap;

use thiserror::Error;

pub use keyring_store::{KeyringStore, KEYRING_SERVICE};

/// Errors raised by a secret store backend.
#[derive(Debug, Error)]
pub enum SecretError {
    /// The backend could not be reached or refused the operation.
    #[error("secret store unavailable: {0}")]
    Unavailable(String),
}

/// A keyed lookup of secret values.
pub trait SecretStore: Send + Sync {
    /// Get the value stored under `key`, or `None` if there is none.
    fn get(&self, key: &str) -> Result<Option<String>, SecretError>;
}

/// Secrets held in memory.
///
/// Useful for embedding hosts that already hold the values, and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, returning the store for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Insert or replace a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl SecretStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        Ok(self.values.get(key).cloned())
    }
}

/// Secrets read from environment variables.
///
/// A key maps to an upper-cased variable with `-` replaced by `_`, so
/// `jira-api-token` is read from `JIRA_API_TOKEN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvStore;

impl EnvStore {
    /// The environment variable consulted for `key`.
    pub fn var_name(key: &str) -> String {
        key.to_ascii_uppercase().replace('-', "_")
    }
}

impl SecretStore for EnvStore {
    fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        Ok(std::env::var(Self::var_name(key)).ok())
    }
}

/// Consults several stores in order and returns the first value found.
///
/// A failing store is skipped only if a later one has the value; otherwise
/// the first error is reported.
#[derive(Default)]
pub struct ChainStore {
    stores: Vec<Box<dyn SecretStore>>,
}

impl ChainStore {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a store to the end of the chain.
    pub fn push(mut self, store: impl SecretStore + 'static) -> Self {
        self.stores.push(Box::new(store));
        self
    }
}

impl SecretStore for ChainStore {
    fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        let mut first_error = None;
        for store in &self.stores {
            match store.get(key) {
                Ok(Some(value)) => return Ok(Some(value)),
                Ok(None) => {}
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct BrokenStore;

    impl SecretStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, SecretError> {
            Err(SecretError::Unavailable("no keyring daemon".to_string()))
        }
    }

    #[test]
    fn test_memory_store_get() {
        let store = MemoryStore::new().with("jira-email", "me@example.com");
        assert_eq!(
            store.get("jira-email").unwrap().as_deref(),
            Some("me@example.com")
        );
        assert!(store.get("jira-server").unwrap().is_none());
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(EnvStore::var_name("jira-api-token"), "JIRA_API_TOKEN");
        assert_eq!(EnvStore::var_name("jira-server"), "JIRA_SERVER");
    }

    #[test]
    #[serial]
    fn test_env_store_reads_variable() {
        std::env::set_var("JIRA_EMAIL", "env@example.com");
        let value = EnvStore.get("jira-email").unwrap();
        std::env::remove_var("JIRA_EMAIL");

        assert_eq!(value.as_deref(), Some("env@example.com"));
        assert!(EnvStore.get("jira-email").unwrap().is_none());
    }

    #[test]
    fn test_chain_store_first_hit_wins() {
        let chain = ChainStore::new()
            .push(MemoryStore::new().with("jira-server", "https://first"))
            .push(MemoryStore::new().with("jira-server", "https://second").with("jira-email", "b"));

        assert_eq!(chain.get("jira-server").unwrap().as_deref(), Some("https://first"));
        assert_eq!(chain.get("jira-email").unwrap().as_deref(), Some("b"));
        assert!(chain.get("jira-api-token").unwrap().is_none());
    }

    #[test]
    fn test_chain_store_skips_broken_backend() {
        let chain = ChainStore::new()
            .push(BrokenStore)
            .push(MemoryStore::new().with("jira-server", "https://x"));

        assert_eq!(chain.get("jira-server").unwrap().as_deref(), Some("https://x"));
        assert!(chain.get("jira-email").is_err());
    }
}
