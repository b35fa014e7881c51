use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::application::product::config::bounded;
use crate::domain::errors::StorageError;
use crate::domain::logger::Logger;
use crate::domain::product::storage::ObjectStore;
use crate::domain::product::value_objects::{ImageUpload, ProductImage};

/// Top-level prefix under which every product image is stored.
pub const PRODUCT_IMAGES_PREFIX: &str = "products";

/// Reduces an uploaded file name to a single safe key segment.
///
/// Directory components are dropped and whitespace runs become `_`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let sanitized = base.split_whitespace().collect::<Vec<_>>().join("_");

    if sanitized.is_empty() {
        "image".to_string()
    } else {
        sanitized
    }
}

/// Storage key of an image: `products/{owner_id}/{unique_suffix}-{name}`.
pub fn image_storage_key(owner_id: Uuid, unique_suffix: Uuid, sanitized_name: &str) -> String {
    format!("{PRODUCT_IMAGES_PREFIX}/{owner_id}/{unique_suffix}-{sanitized_name}")
}

/// Stores and removes product images on top of an [`ObjectStore`].
pub struct ProductImageGateway {
    store: Arc<dyn ObjectStore>,
    logger: Arc<dyn Logger>,
    timeout: Duration,
}

impl ProductImageGateway {
    pub fn new(store: Arc<dyn ObjectStore>, logger: Arc<dyn Logger>, timeout: Duration) -> Self {
        Self {
            store,
            logger,
            timeout,
        }
    }

    /// Uploads `file` under the namespace of `owner_id` and makes it publicly readable.
    ///
    /// On failure nothing is left visible: a blob written but not made public
    /// is removed again before the error is returned.
    pub async fn put(
        &self,
        owner_id: Uuid,
        file: &ImageUpload,
    ) -> Result<ProductImage, StorageError> {
        let name = sanitize_file_name(&file.file_name);
        let path = image_storage_key(owner_id, Uuid::new_v4(), &name);

        let url = bounded(
            self.timeout,
            StorageError::Write,
            self.store
                .put(&path, &file.bytes, file.effective_content_type()),
        )
        .await
        .map_err(|e| {
            self.logger
                .error(&format!("Failed to upload image {}: {}", path, e));
            StorageError::Write
        })?;

        if let Err(e) = bounded(
            self.timeout,
            StorageError::Write,
            self.store.make_public(&path),
        )
        .await
        {
            self.logger
                .error(&format!("Failed to make image {} public: {}", path, e));
            if let Err(cleanup) = self.delete(&path).await {
                self.logger.warn(&format!(
                    "Could not remove private image {}: {}",
                    path, cleanup
                ));
            }
            return Err(StorageError::Write);
        }

        self.logger.debug(&format!("Uploaded image {}", path));
        Ok(ProductImage {
            url,
            path,
            name: Some(name),
        })
    }

    /// Removes the blob at `path`. A blob that is already gone counts as removed.
    pub async fn delete(&self, path: &str) -> Result<(), StorageError> {
        match bounded(self.timeout, StorageError::Delete, self.store.delete(path)).await {
            Ok(()) => {
                self.logger.debug(&format!("Deleted image {}", path));
                Ok(())
            }
            Err(StorageError::NotFound) => {
                self.logger.warn(&format!(
                    "Image {} not found for deletion, already removed",
                    path
                ));
                Ok(())
            }
            Err(_) => Err(StorageError::Delete),
        }
    }

    /// Deletes every image, continuing past failures.
    ///
    /// Returns how many blobs could not be removed.
    pub async fn delete_all(&self, images: &[ProductImage]) -> usize {
        let mut failures = 0;
        for image in images {
            if let Err(e) = self.delete(&image.path).await {
                failures += 1;
                self.logger
                    .error(&format!("Failed to delete image {}: {}", image.path, e));
            }
        }
        failures
    }
}
