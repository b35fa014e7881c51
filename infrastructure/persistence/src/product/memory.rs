use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::product::model::{Product, ProductDraft};
use business::domain::product::repository::ProductRepository;

/// Process-local product repository, for development and tests.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<Uuid, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut products: Vec<Product> = self.products.read().await.values().cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(products)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        let now = Utc::now();
        let product = Product::from_repository(Uuid::new_v4(), draft.clone(), now, now);
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: Uuid, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        let mut products = self.products.write().await;
        let stored = products.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        *stored = Product::from_repository(id, draft.clone(), stored.created_at, Utc::now());
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.products.write().await.remove(&id);
        Ok(true)
    }
}
