use std::sync::Arc;

use async_trait::async_trait;

use crate::application::product::image_gateway::ProductImageGateway;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::remove::{RemoveProductParams, RemoveProductUseCase};

pub struct RemoveProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub images: Arc<ProductImageGateway>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RemoveProductUseCase for RemoveProductUseCaseImpl {
    async fn execute(&self, params: RemoveProductParams) -> Result<bool, ProductError> {
        self.logger
            .info(&format!("Deleting product: {}", params.id));

        let Some(product) = self.repository.get_by_id(params.id).await? else {
            self.logger.warn(&format!(
                "Product {} not found for deletion, nothing to remove",
                params.id
            ));
            return Ok(true);
        };

        if !product.images.is_empty() {
            self.logger.info(&format!(
                "Deleting {} images of product {}",
                product.images.len(),
                product.id
            ));
            let failures = self.images.delete_all(&product.images).await;
            if failures > 0 {
                self.logger.warn(&format!(
                    "{} images of product {} could not be deleted",
                    failures, product.id
                ));
            }
        }

        self.repository.delete(product.id).await?;

        self.logger.info(&format!("Product deleted: {}", product.id));
        Ok(true)
    }
}
