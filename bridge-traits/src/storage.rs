//! Secure Storage Abstraction
//!
//! Durable, encrypted key/value storage for credentials. Keys are namespaced
//! strings chosen by the caller; values are opaque text.

use async_trait::async_trait;

use crate::error::{StorageError, StorageResult};

/// Secure credential storage trait
///
/// Abstracts secure storage mechanisms:
/// - macOS/iOS: Keychain
/// - Android: Keystore (hardware-backed when available)
/// - Windows: DPAPI
/// - Linux: Secret Service / libsecret
///
/// # Security Requirements
///
/// Implementations MUST:
/// - Encrypt data at rest
/// - Never log or expose stored values
/// - Make each individual `set_secret`/`delete_secret` atomic (last write wins)
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::SecureStore;
///
/// async fn store_token(store: &dyn SecureStore, token: &str) -> StorageResult<()> {
///     store.set_secret("com.example.accessToken", token).await
/// }
/// ```
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Store a secret value, replacing any previous value for `key`
    async fn set_secret(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Retrieve a secret value
    ///
    /// # Errors
    ///
    /// Fails with [`StorageError::ItemNotFound`] when nothing is stored under `key`.
    async fn get_secret(&self, key: &str) -> StorageResult<String>;

    /// Delete a secret
    ///
    /// Deleting an absent key is not an error.
    async fn delete_secret(&self, key: &str) -> StorageResult<()>;

    /// Check if a secret exists without handing its value to the caller
    async fn has_secret(&self, key: &str) -> StorageResult<bool> {
        match self.get_secret(key).await {
            Ok(_) => Ok(true),
            Err(StorageError::ItemNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
