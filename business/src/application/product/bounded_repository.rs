use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::product::config::bounded;
use crate::domain::errors::RepositoryError;
use crate::domain::product::model::{Product, ProductDraft};
use crate::domain::product::repository::ProductRepository;

/// Wraps a repository so every call gives up after `timeout`.
///
/// Reads that time out surface as `DatabaseError`, writes as `Persistence`.
pub struct BoundedProductRepository {
    inner: Arc<dyn ProductRepository>,
    timeout: Duration,
}

impl BoundedProductRepository {
    pub fn new(inner: Arc<dyn ProductRepository>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl ProductRepository for BoundedProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        bounded(
            self.timeout,
            RepositoryError::DatabaseError,
            self.inner.get_all(),
        )
        .await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        bounded(
            self.timeout,
            RepositoryError::DatabaseError,
            self.inner.get_by_id(id),
        )
        .await
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        bounded(
            self.timeout,
            RepositoryError::Persistence,
            self.inner.create(draft),
        )
        .await
    }

    async fn update(&self, id: Uuid, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        bounded(
            self.timeout,
            RepositoryError::Persistence,
            self.inner.update(id, draft),
        )
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        bounded(
            self.timeout,
            RepositoryError::Persistence,
            self.inner.delete(id),
        )
        .await
    }
}
