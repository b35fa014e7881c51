use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::product::errors::ProductError;

pub struct RemoveProductParams {
    pub id: Uuid,
}

#[async_trait]
pub trait RemoveProductUseCase: Send + Sync {
    /// Deletes the product and its images. Returns true once the product is gone,
    /// including when it never existed.
    async fn execute(&self, params: RemoveProductParams) -> Result<bool, ProductError>;
}
