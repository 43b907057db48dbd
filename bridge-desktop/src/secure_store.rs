//! Secure Credential Storage using OS Keychain

use async_trait::async_trait;
use bridge_traits::{
    error::{StorageError, StorageResult},
    storage::SecureStore,
};
use keyring::Entry;
use tracing::{debug, error};

const DEFAULT_SERVICE_NAME: &str = "session-core";

/// Keyring-based secure storage implementation
///
/// Uses platform-specific secure storage:
/// - macOS: Keychain
/// - Windows: Credential Manager (DPAPI)
/// - Linux: Secret Service (libsecret)
pub struct KeyringSecureStore {
    service_name: String,
}

impl KeyringSecureStore {
    /// Create a new secure store with default service name
    pub fn new() -> Self {
        Self::with_service_name(DEFAULT_SERVICE_NAME)
    }

    /// Create a new secure store with custom service name
    pub fn with_service_name(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    fn get_entry(&self, key: &str) -> StorageResult<Entry> {
        Entry::new(&self.service_name, key).map_err(|e| Self::map_keyring_error(key, e))
    }

    fn map_keyring_error(key: &str, e: keyring::Error) -> StorageError {
        match e {
            keyring::Error::NoEntry => StorageError::ItemNotFound(key.to_string()),
            keyring::Error::BadEncoding(_) => StorageError::DecodingFailed,
            keyring::Error::TooLong(..) => StorageError::EncodingFailed,
            other => StorageError::Backend(format!("Keyring error: {}", other)),
        }
    }
}

impl Default for KeyringSecureStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecureStore for KeyringSecureStore {
    async fn set_secret(&self, key: &str, value: &str) -> StorageResult<()> {
        let entry = self.get_entry(key)?;

        entry.set_password(value).map_err(|e| {
            error!(key = key, error = %e, "Failed to store secret in keyring");
            Self::map_keyring_error(key, e)
        })?;

        debug!(key = key, "Stored secret in keyring");
        Ok(())
    }

    async fn get_secret(&self, key: &str) -> StorageResult<String> {
        let entry = self.get_entry(key)?;

        match entry.get_password() {
            Ok(value) => {
                debug!(key = key, "Retrieved secret from keyring");
                Ok(value)
            }
            Err(keyring::Error::NoEntry) => {
                debug!(key = key, "Secret not found in keyring");
                Err(StorageError::ItemNotFound(key.to_string()))
            }
            Err(e) => Err(Self::map_keyring_error(key, e)),
        }
    }

    async fn delete_secret(&self, key: &str) -> StorageResult<()> {
        let entry = self.get_entry(key)?;

        match entry.delete_credential() {
            Ok(()) => {
                debug!(key = key, "Deleted secret from keyring");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => {
                debug!(key = key, "Secret not found (already deleted)");
                Ok(())
            }
            Err(e) => Err(Self::map_keyring_error(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_store_creation() {
        let store = KeyringSecureStore::new();
        assert_eq!(store.service_name, "session-core");
    }

    #[test]
    fn test_custom_service_name() {
        let store = KeyringSecureStore::with_service_name("test-service");
        assert_eq!(store.service_name, "test-service");
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            KeyringSecureStore::map_keyring_error("k", keyring::Error::NoEntry),
            StorageError::ItemNotFound("k".to_string())
        );
        assert_eq!(
            KeyringSecureStore::map_keyring_error("k", keyring::Error::BadEncoding(vec![0xff])),
            StorageError::DecodingFailed
        );
    }

    #[tokio::test]
    async fn test_set_and_get_secret() {
        let store = KeyringSecureStore::with_service_name("test-session-core");
        let key = "test-key-unique-123";

        let _ = store.delete_secret(key).await;

        match store.set_secret(key, "test-secret-value").await {
            Ok(()) => {}
            // Headless CI machines usually have no keyring daemon.
            Err(StorageError::Backend(e)) => {
                println!("Keyring not available ({}), skipping test", e);
                return;
            }
            Err(e) => panic!("unexpected keyring write failure: {}", e),
        }

        assert_eq!(store.get_secret(key).await.unwrap(), "test-secret-value");
        assert!(store.has_secret(key).await.unwrap());

        store.delete_secret(key).await.unwrap();
        // Deleting twice is still a success.
        store.delete_secret(key).await.unwrap();
        assert_eq!(
            store.get_secret(key).await,
            Err(StorageError::ItemNotFound(key.to_string()))
        );
    }
}
