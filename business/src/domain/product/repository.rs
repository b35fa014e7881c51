use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;

use super::model::{Product, ProductDraft};

/// Document repository for product records.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products ordered by name ascending.
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError>;
    /// Assigns a fresh identifier and writes the full record.
    async fn create(&self, draft: &ProductDraft) -> Result<Product, RepositoryError>;
    /// Replaces every mutable field. Fails with `NotFound` when `id` is unknown.
    async fn update(&self, id: Uuid, draft: &ProductDraft) -> Result<Product, RepositoryError>;
    /// Idempotent: returns true whether or not the record existed.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
