//! In-process secure store.
//!
//! Holds secrets in a `HashMap` guarded by an async mutex. Nothing is
//! encrypted or persisted, so this is meant for tests and for hosts that
//! deliberately keep sessions ephemeral.

use async_trait::async_trait;
use bridge_traits::{
    error::{StorageError, StorageResult},
    storage::SecureStore,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
pub struct MemorySecureStore {
    storage: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySecureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.storage.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.storage.lock().await.is_empty()
    }
}

#[async_trait]
impl SecureStore for MemorySecureStore {
    async fn set_secret(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_secret(&self, key: &str) -> StorageResult<String> {
        self.storage
            .lock()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::ItemNotFound(key.to_string()))
    }

    async fn delete_secret(&self, key: &str) -> StorageResult<()> {
        self.storage.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_overwrite() {
        let store = MemorySecureStore::new();
        store.set_secret("a", "1").await.unwrap();
        store.set_secret("a", "2").await.unwrap();

        assert_eq!(store.get_secret("a").await.unwrap(), "2");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_key_is_not_found() {
        let store = MemorySecureStore::new();
        let err = store.get_secret("missing").await.unwrap_err();
        assert_eq!(err, StorageError::ItemNotFound("missing".to_string()));
        assert!(!store.has_secret("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemorySecureStore::new();
        store.set_secret("a", "1").await.unwrap();

        store.delete_secret("a").await.unwrap();
        store.delete_secret("a").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let store = MemorySecureStore::new();
        let clone = store.clone();
        clone.set_secret("shared", "yes").await.unwrap();
        assert_eq!(store.get_secret("shared").await.unwrap(), "yes");
    }
}
