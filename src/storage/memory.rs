//! In-memory storage backend.
//!
//! Used when no `DATABASE_URL` is configured and as the default test double.
//! Contents are lost on restart.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::RwLock;

use super::{ResourceKey, StorageClient, StorageError};

#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<ResourceKey, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `entries`.
    #[must_use]
    pub fn with_values(entries: impl IntoIterator<Item = (ResourceKey, Value)>) -> Self {
        Self { values: RwLock::new(entries.into_iter().collect()) }
    }
}

#[async_trait::async_trait]
impl StorageClient for MemoryStore {
    async fn get(&self, key: ResourceKey) -> Result<Option<Value>, StorageError> {
        Ok(self.values.read().await.get(&key).cloned())
    }

    async fn set(&self, key: ResourceKey, value: Value) -> Result<(), StorageError> {
        self.values.write().await.insert(key, value);
        Ok(())
    }
}
