//! Progress persistence
//!
//! Sessions never reach for a global map. They receive a
//! [`ProgressRepository`] at mount and read from it once, then write to it
//! from the checkpoint task and on completion.

mod file;
mod memory;


use async_trait::async_trait;

use crate::types::{ContentId, ProgressRecord};

pub use file::FileProgressStore;
pub use memory::MemoryProgressStore;

/// Abstract storage interface for watch progress
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Load the record for a piece of content
    async fn get(&self, content_id: &ContentId) -> Option<ProgressRecord>;

    /// Create or overwrite the record for a piece of content
    ///
    /// # Errors
    ///
    /// Returns error if storage fails
    async fn set(&self, content_id: &ContentId, record: ProgressRecord)
    -> Result<(), StorageError>;

    /// Remove the record for a piece of content
    ///
    /// # Errors
    ///
    /// Returns error if removal fails
    async fn remove(&self, content_id: &ContentId) -> Result<(), StorageError>;

    /// List all content ids with stored progress
    async fn list(&self) -> Vec<ContentId>;
}

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored data could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The backing store cannot be used right now
    #[error("storage not available")]
    NotAvailable,
}
