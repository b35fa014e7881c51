use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::{Product, ProductFields};
use crate::domain::product::value_objects::ImageUpload;

pub struct SaveProductParams {
    pub fields: ProductFields,
    /// New image files in display order. Empty on update keeps the current images.
    pub images: Vec<ImageUpload>,
    /// Absent for a create, present for an update.
    pub existing_id: Option<Uuid>,
}

#[async_trait]
pub trait SaveProductUseCase: Send + Sync {
    async fn execute(&self, params: SaveProductParams) -> Result<Product, ProductError>;
}
