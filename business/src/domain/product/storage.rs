use async_trait::async_trait;

use crate::domain::errors::StorageError;

/// Service port for the object store holding product images.
///
/// Adapters must report a missing object on `delete` as
/// `StorageError::NotFound` so callers can tell it apart from real failures.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes `bytes` at `path` and returns the object's public URL.
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError>;
    async fn make_public(&self, path: &str) -> Result<(), StorageError>;
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}
