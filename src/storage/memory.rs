use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ProgressRepository, StorageError};
use crate::types::{ContentId, ProgressRecord};

/// In-memory progress storage (non-persistent)
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    records: RwLock<HashMap<ContentId, ProgressRecord>>,
}

impl MemoryProgressStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    pub fn with_records(records: impl IntoIterator<Item = (ContentId, ProgressRecord)>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().collect()),
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ProgressRepository for MemoryProgressStore {
    async fn get(&self, content_id: &ContentId) -> Option<ProgressRecord> {
        self.records.read().await.get(content_id).copied()
    }

    async fn set(
        &self,
        content_id: &ContentId,
        record: ProgressRecord,
    ) -> Result<(), StorageError> {
        self.records
            .write()
            .await
            .insert(content_id.clone(), record);
        Ok(())
    }

    async fn remove(&self, content_id: &ContentId) -> Result<(), StorageError> {
        self.records.write().await.remove(content_id);
        Ok(())
    }

    async fn list(&self) -> Vec<ContentId> {
        self.records.read().await.keys().cloned().collect()
    }
}
