use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{ProgressRepository, StorageError};
use crate::types::{ContentId, ProgressRecord};

type Records = HashMap<ContentId, ProgressRecord>;

/// File-based progress storage
///
/// Keeps every record in memory and rewrites the whole JSON file after each
/// change, the way browser local storage holds the progress map as one
/// serialized value.
pub struct FileProgressStore {
    path: PathBuf,
    cache: Mutex<Records>,
}

impl FileProgressStore {
    /// Open file storage at the given path
    ///
    /// # Errors
    ///
    /// Returns error if directory cannot be created or file loaded
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let cache = Self::load_all(&path).await?;
        tracing::debug!(path = %path.display(), records = cache.len(), "Opened progress store");

        Ok(Self {
            path,
            cache: Mutex::new(cache),
        })
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_all(path: &Path) -> Result<Records, StorageError> {
        if !tokio::fs::try_exists(path).await? {
            return Ok(HashMap::new());
        }

        let bytes = tokio::fs::read(path).await?;
        if bytes.is_empty() {
            return Ok(HashMap::new());
        }

        let cache = tokio::task::spawn_blocking(move || serde_json::from_slice(&bytes))
            .await
            .map_err(|e| StorageError::Serialization(format!("Deserialization task failed: {e}")))?
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        Ok(cache)
    }

    async fn save_all(&self, cache: Records) -> Result<(), StorageError> {
        let path = self.path.clone();

        let bytes = tokio::task::spawn_blocking(move || serde_json::to_vec_pretty(&cache))
            .await
            .map_err(|e| StorageError::Serialization(format!("Serialization task failed: {e}")))?
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        tokio::fs::write(path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for FileProgressStore {
    async fn get(&self, content_id: &ContentId) -> Option<ProgressRecord> {
        self.cache.lock().await.get(content_id).copied()
    }

    async fn set(
        &self,
        content_id: &ContentId,
        record: ProgressRecord,
    ) -> Result<(), StorageError> {
        // Held across the write so concurrent saves land in call order.
        let mut cache = self.cache.lock().await;
        cache.insert(content_id.clone(), record);
        self.save_all(cache.clone()).await
    }

    async fn remove(&self, content_id: &ContentId) -> Result<(), StorageError> {
        let mut cache = self.cache.lock().await;
        if cache.remove(content_id).is_none() {
            return Ok(());
        }
        self.save_all(cache.clone()).await
    }

    async fn list(&self) -> Vec<ContentId> {
        self.cache.lock().await.keys().cloned().collect()
    }
}
