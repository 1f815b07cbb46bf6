use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CartStorage;
use crate::cart_actor::StorageError;

/// In-process storage. Clones share the same map, so a test can keep one
/// handle and inspect what the cart wrote through another.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store, e.g. with a blob left behind by a previous session.
    pub async fn with_item(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.write().await.insert(key.into(), value.into());
        self
    }

    pub async fn remove_item(&self, key: &str) -> Option<String> {
        self.inner.write().await.remove(key)
    }
}

#[async_trait]
impl CartStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.inner.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
