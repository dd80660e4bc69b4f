//! OS keyring backed secret storage.

use super::{SecretError, SecretStore};

/// The keyring service name under which all secrets are stored.
pub const KEYRING_SERVICE: &str = "llm-tools-jira";

/// Secrets stored in the OS keyring, one entry per key.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    /// Create a store using the default service name.
    pub fn new() -> Self {
        Self {
            service: KEYRING_SERVICE.to_string(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry, SecretError> {
        keyring::Entry::new(&self.service, key)
            .map_err(|e| SecretError::Unavailable(format!("failed to access keyring: {}", e)))
    }

    /// Store a secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written to the keyring.
    pub fn set(&self, key: &str, value: &str) -> Result<(), SecretError> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| SecretError::Unavailable(format!("failed to store '{}': {}", key, e)))
    }

    /// Delete a secret. Deleting a key that was never set is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the keyring refuses the deletion.
    pub fn delete(&self, key: &str) -> Result<(), SecretError> {
        match self.entry(key)?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(SecretError::Unavailable(format!(
                "failed to delete '{}': {}",
                key, e
            ))),
        }
    }
}

impl SecretStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(SecretError::Unavailable(format!(
                "failed to retrieve '{}': {}",
                key, e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_service() {
        assert_eq!(KeyringStore::new().service, "llm-tools-jira");
        assert_eq!(KeyringStore::default().service, KEYRING_SERVICE);
    }
}
