use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::product::config::ProductServiceConfig;
use crate::application::product::image_gateway::ProductImageGateway;
use crate::domain::logger::Logger;
use crate::domain::product::errors::{ProductError, not_found_as_product_error};
use crate::domain::product::model::{Product, ProductDraft, ProductFields};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::save::{SaveProductParams, SaveProductUseCase};
use crate::domain::product::value_objects::{ImageUpload, ProductImage};

/// Creates or updates a product together with its images.
///
/// Blobs are always written before the document that references them and
/// deleted only after the document stops referencing them, so an interrupted
/// save can leave orphaned blobs but never a product pointing at a missing one.
pub struct SaveProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub images: Arc<ProductImageGateway>,
    pub config: ProductServiceConfig,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SaveProductUseCase for SaveProductUseCaseImpl {
    async fn execute(&self, params: SaveProductParams) -> Result<Product, ProductError> {
        params.fields.validate()?;

        if params.images.len() > self.config.max_images {
            return Err(ProductError::TooManyImages);
        }

        match params.existing_id {
            None => self.create(params.fields, params.images).await,
            Some(id) => self.update(id, params.fields, params.images).await,
        }
    }
}

impl SaveProductUseCaseImpl {
    async fn create(
        &self,
        fields: ProductFields,
        files: Vec<ImageUpload>,
    ) -> Result<Product, ProductError> {
        if files.is_empty() {
            return Err(ProductError::ImagesRequired);
        }

        // Namespaces the uploads only; the repository assigns the final id.
        let working_id = Uuid::new_v4();
        self.logger.info(&format!(
            "Creating product {}: uploading {} images under {}",
            fields.name,
            files.len(),
            working_id
        ));

        let images = self.upload_all(working_id, &files).await?;
        let draft = ProductDraft::new(fields, images);

        let product = self.repository.create(&draft).await.map_err(|e| {
            self.logger.warn(&format!(
                "Product create failed, {} uploaded images under {} are orphaned: {}",
                draft.images.len(),
                working_id,
                e
            ));
            ProductError::Repository(e)
        })?;

        self.logger
            .info(&format!("Product created with id: {}", product.id));
        Ok(product)
    }

    async fn update(
        &self,
        id: Uuid,
        fields: ProductFields,
        files: Vec<ImageUpload>,
    ) -> Result<Product, ProductError> {
        self.logger.info(&format!("Updating product: {}", id));

        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound)?;

        let replacing = !files.is_empty();
        let images = if replacing {
            self.upload_all(existing.id, &files).await?
        } else {
            existing.images.clone()
        };
        let draft = ProductDraft::new(fields, images);

        let updated = self.repository.update(id, &draft).await.map_err(|e| {
            if replacing {
                self.logger.warn(&format!(
                    "Product update failed, {} new images of {} are orphaned: {}",
                    draft.images.len(),
                    id,
                    e
                ));
            }
            not_found_as_product_error(e)
        })?;

        if replacing {
            self.logger.info(&format!(
                "Replaced images of product {}, deleting {} previous images",
                id,
                existing.images.len()
            ));
            let failures = self.images.delete_all(&existing.images).await;
            if failures > 0 {
                self.logger.warn(&format!(
                    "{} previous images of product {} could not be deleted",
                    failures, id
                ));
            }
        }

        self.logger.info(&format!("Product updated: {}", updated.id));
        Ok(updated)
    }

    /// Uploads `files` in order. Stops at the first failure without touching
    /// any document.
    async fn upload_all(
        &self,
        owner_id: Uuid,
        files: &[ImageUpload],
    ) -> Result<Vec<ProductImage>, ProductError> {
        let mut uploaded = Vec::with_capacity(files.len());
        for file in files {
            match self.images.put(owner_id, file).await {
                Ok(image) => uploaded.push(image),
                Err(e) => {
                    self.abandon_uploads(owner_id, &uploaded).await;
                    return Err(ProductError::Storage(e));
                }
            }
        }
        Ok(uploaded)
    }

    async fn abandon_uploads(&self, owner_id: Uuid, uploaded: &[ProductImage]) {
        if uploaded.is_empty() {
            return;
        }

        if self.config.compensate_failed_uploads {
            let failures = self.images.delete_all(uploaded).await;
            self.logger.warn(&format!(
                "Upload for {} aborted, removed {} of {} uploaded images",
                owner_id,
                uploaded.len() - failures,
                uploaded.len()
            ));
        } else {
            self.logger.warn(&format!(
                "Upload for {} aborted, {} uploaded images left orphaned",
                owner_id,
                uploaded.len()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{RepositoryError, StorageError};
    use crate::domain::product::storage::ObjectStore;
    use crate::domain::product::value_objects::ProductColor;
    use bigdecimal::BigDecimal;
    use chrono::Utc;
    use mockall::predicate::eq;
    use mockall::{Sequence, mock};
    use std::str::FromStr;
    use std::time::Duration;

    mock! {
        pub ProductRepo {}

        #[async_trait]
        impl ProductRepository for ProductRepo {
            async fn get_all(&self) -> Result<Vec<Product>, RepositoryError>;
            async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError>;
            async fn create(&self, draft: &ProductDraft) -> Result<Product, RepositoryError>;
            async fn update(&self, id: Uuid, draft: &ProductDraft) -> Result<Product, RepositoryError>;
            async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
        }
    }

    mock! {
        pub Store {}

        #[async_trait]
        impl ObjectStore for Store {
            async fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String, StorageError>;
            async fn make_public(&self, path: &str) -> Result<(), StorageError>;
            async fn delete(&self, path: &str) -> Result<(), StorageError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn use_case(
        repo: MockProductRepo,
        store: MockStore,
        config: ProductServiceConfig,
    ) -> SaveProductUseCaseImpl {
        let logger = mock_logger();
        SaveProductUseCaseImpl {
            repository: Arc::new(repo),
            images: Arc::new(ProductImageGateway::new(
                Arc::new(store),
                logger.clone(),
                Duration::from_secs(5),
            )),
            config,
            logger,
        }
    }

    fn fields() -> ProductFields {
        ProductFields {
            name: "Pleated Midi Skirt".to_string(),
            description: "Flowing satin skirt".to_string(),
            price: BigDecimal::from_str("79.00").unwrap(),
            category: "Skirts".to_string(),
            style: Some("Elegant".to_string()),
            sizes: vec!["S".to_string(), "M".to_string(), "L".to_string()],
            colors: vec![ProductColor::new("Emerald", "#50C878")],
            stock: 8,
            is_featured: true,
            seasonal_collection: Some("Spring".to_string()),
        }
    }

    fn upload(name: &str) -> ImageUpload {
        ImageUpload::new(name, "image/png", vec![0x89, 0x50, 0x4e, 0x47])
    }

    fn image(id: Uuid, file: &str) -> ProductImage {
        let path = format!("products/{id}/{file}");
        ProductImage {
            url: format!("https://cdn.test/{path}"),
            path,
            name: Some(file.to_string()),
        }
    }

    fn existing_product(id: Uuid) -> Product {
        let now = Utc::now();
        Product::from_repository(
            id,
            ProductDraft::new(
                fields(),
                vec![image(id, "old-1-front.png"), image(id, "old-2-back.png")],
            ),
            now,
            now,
        )
    }

    fn persisted(id: Uuid, draft: &ProductDraft) -> Product {
        let now = Utc::now();
        Product::from_repository(id, draft.clone(), now, now)
    }

    fn accept_uploads(store: &mut MockStore) {
        store
            .expect_put()
            .returning(|path, _, _| Ok(format!("https://cdn.test/{path}")));
        store.expect_make_public().returning(|_| Ok(()));
    }

    fn create_params(images: Vec<ImageUpload>) -> SaveProductParams {
        SaveProductParams {
            fields: fields(),
            images,
            existing_id: None,
        }
    }

    fn update_params(id: Uuid, images: Vec<ImageUpload>) -> SaveProductParams {
        SaveProductParams {
            fields: fields(),
            images,
            existing_id: Some(id),
        }
    }

    #[tokio::test]
    async fn should_reject_create_without_images() {
        let mut repo = MockProductRepo::new();
        repo.expect_create().never();
        let mut store = MockStore::new();
        store.expect_put().never();

        let result = use_case(repo, store, ProductServiceConfig::default())
            .execute(create_params(vec![]))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, ProductError::ImagesRequired));
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn should_reject_invalid_fields_before_uploading() {
        let mut repo = MockProductRepo::new();
        repo.expect_create().never();
        let mut store = MockStore::new();
        store.expect_put().never();

        let mut params = create_params(vec![upload("a.png")]);
        params.fields.name = " ".to_string();

        let result = use_case(repo, store, ProductServiceConfig::default())
            .execute(params)
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::NameEmpty));
    }

    #[tokio::test]
    async fn should_reject_more_images_than_allowed() {
        let mut store = MockStore::new();
        store.expect_put().never();

        let files = (0..6).map(|i| upload(&format!("{i}.png"))).collect();
        let result = use_case(MockProductRepo::new(), store, ProductServiceConfig::default())
            .execute(create_params(files))
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::TooManyImages));
    }

    #[tokio::test]
    async fn should_create_product_with_images_in_input_order() {
        let mut seq = Sequence::new();
        let mut store = MockStore::new();
        store
            .expect_put()
            .withf(|path, _, _| path.ends_with("-img1.png"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|path, _, _| Ok(format!("https://cdn.test/{path}")));
        store
            .expect_make_public()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        store
            .expect_put()
            .withf(|path, _, _| path.ends_with("-img2.png"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|path, _, _| Ok(format!("https://cdn.test/{path}")));
        store
            .expect_make_public()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let mut repo = MockProductRepo::new();
        repo.expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|draft| Ok(persisted(Uuid::new_v4(), draft)));

        let product = use_case(repo, store, ProductServiceConfig::default())
            .execute(create_params(vec![upload("img1.png"), upload("img2.png")]))
            .await
            .unwrap();

        assert_eq!(product.images.len(), 2);
        assert_eq!(product.images[0].name.as_deref(), Some("img1.png"));
        assert_eq!(product.images[1].name.as_deref(), Some("img2.png"));
        assert_eq!(product.name, "Pleated Midi Skirt");
    }

    #[tokio::test]
    async fn should_namespace_new_uploads_under_one_working_id() {
        let mut store = MockStore::new();
        accept_uploads(&mut store);
        let mut repo = MockProductRepo::new();
        repo.expect_create()
            .returning(|draft| Ok(persisted(Uuid::new_v4(), draft)));

        let product = use_case(repo, store, ProductServiceConfig::default())
            .execute(create_params(vec![upload("a.png"), upload("b.png")]))
            .await
            .unwrap();

        let owner_of = |path: &str| path.split('/').nth(1).map(str::to_string);
        assert!(product.images[0].path.starts_with("products/"));
        assert_eq!(
            owner_of(&product.images[0].path),
            owner_of(&product.images[1].path)
        );
    }

    #[tokio::test]
    async fn should_abort_create_when_an_upload_fails() {
        let mut store = MockStore::new();
        store
            .expect_put()
            .withf(|path, _, _| path.ends_with("-a.png"))
            .returning(|path, _, _| Ok(format!("https://cdn.test/{path}")));
        store
            .expect_put()
            .withf(|path, _, _| path.ends_with("-b.png"))
            .returning(|_, _, _| Err(StorageError::Write));
        store.expect_make_public().returning(|_| Ok(()));
        // Orphans stay in place under the default policy.
        store.expect_delete().never();

        let mut repo = MockProductRepo::new();
        repo.expect_create().never();

        let result = use_case(repo, store, ProductServiceConfig::default())
            .execute(create_params(vec![upload("a.png"), upload("b.png")]))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ProductError::Storage(StorageError::Write)
        ));
    }

    #[tokio::test]
    async fn should_remove_partial_uploads_when_compensation_enabled() {
        let mut store = MockStore::new();
        store
            .expect_put()
            .withf(|path, _, _| path.ends_with("-a.png"))
            .returning(|path, _, _| Ok(format!("https://cdn.test/{path}")));
        store
            .expect_put()
            .withf(|path, _, _| path.ends_with("-b.png"))
            .returning(|_, _, _| Err(StorageError::Write));
        store.expect_make_public().returning(|_| Ok(()));
        store
            .expect_delete()
            .withf(|path| path.ends_with("-a.png"))
            .times(1)
            .returning(|_| Ok(()));

        let mut repo = MockProductRepo::new();
        repo.expect_create().never();

        let config = ProductServiceConfig {
            compensate_failed_uploads: true,
            ..ProductServiceConfig::default()
        };
        let result = use_case(repo, store, config)
            .execute(create_params(vec![upload("a.png"), upload("b.png")]))
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::Storage(_)));
    }

    #[tokio::test]
    async fn should_keep_uploads_when_document_create_fails() {
        let mut store = MockStore::new();
        accept_uploads(&mut store);
        store.expect_delete().never();

        let mut repo = MockProductRepo::new();
        repo.expect_create()
            .returning(|_| Err(RepositoryError::Persistence));

        let config = ProductServiceConfig {
            compensate_failed_uploads: true,
            ..ProductServiceConfig::default()
        };
        let result = use_case(repo, store, config)
            .execute(create_params(vec![upload("a.png")]))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ProductError::Repository(RepositoryError::Persistence)
        ));
    }

    #[tokio::test]
    async fn should_keep_current_images_when_update_has_no_files() {
        let id = Uuid::new_v4();
        let existing = existing_product(id);
        let current_images = existing.images.clone();

        let mut repo = MockProductRepo::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(existing.clone())));
        let expected = current_images.clone();
        repo.expect_update()
            .withf(move |update_id, draft| *update_id == id && draft.images == expected)
            .times(1)
            .returning(|id, draft| Ok(persisted(id, draft)));

        let mut store = MockStore::new();
        store.expect_put().never();
        store.expect_delete().never();

        let mut params = update_params(id, vec![]);
        params.fields.stock = 2;
        let product = use_case(repo, store, ProductServiceConfig::default())
            .execute(params)
            .await
            .unwrap();

        assert_eq!(product.images, current_images);
        assert_eq!(product.stock, 2);
    }

    #[tokio::test]
    async fn should_replace_images_and_delete_old_ones_after_update() {
        let id = Uuid::new_v4();
        let existing = existing_product(id);
        let old_paths: Vec<String> = existing.images.iter().map(|i| i.path.clone()).collect();
        let new_prefix = format!("products/{id}/");

        let mut seq = Sequence::new();
        let mut repo = MockProductRepo::new();
        let mut store = MockStore::new();

        repo.expect_get_by_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(existing.clone())));
        store
            .expect_put()
            .withf(move |path, _, _| path.starts_with(&new_prefix) && path.ends_with("-img3.png"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|path, _, _| Ok(format!("https://cdn.test/{path}")));
        store
            .expect_make_public()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        repo.expect_update()
            .withf(|_, draft| draft.images.len() == 1)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|id, draft| Ok(persisted(id, draft)));
        store
            .expect_delete()
            .with(eq(old_paths[0].clone()))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        store
            .expect_delete()
            .with(eq(old_paths[1].clone()))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let product = use_case(repo, store, ProductServiceConfig::default())
            .execute(update_params(id, vec![upload("img3.png")]))
            .await
            .unwrap();

        assert_eq!(product.id, id);
        assert_eq!(product.images.len(), 1);
        assert_eq!(product.images[0].name.as_deref(), Some("img3.png"));
        assert!(!old_paths.contains(&product.images[0].path));
    }

    #[tokio::test]
    async fn should_fail_closed_when_updating_missing_product() {
        let mut repo = MockProductRepo::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_update().never();
        repo.expect_create().never();
        let mut store = MockStore::new();
        store.expect_put().never();

        let result = use_case(repo, store, ProductServiceConfig::default())
            .execute(update_params(Uuid::new_v4(), vec![upload("a.png")]))
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::NotFound));
    }

    #[tokio::test]
    async fn should_leave_document_untouched_when_replacement_upload_fails() {
        let id = Uuid::new_v4();
        let existing = existing_product(id);

        let mut repo = MockProductRepo::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update().never();

        let mut store = MockStore::new();
        store
            .expect_put()
            .returning(|_, _, _| Err(StorageError::Write));
        store.expect_delete().never();

        let result = use_case(repo, store, ProductServiceConfig::default())
            .execute(update_params(id, vec![upload("img3.png")]))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ProductError::Storage(StorageError::Write)
        ));
    }

    #[tokio::test]
    async fn should_not_delete_old_images_when_document_update_fails() {
        let id = Uuid::new_v4();
        let existing = existing_product(id);

        let mut repo = MockProductRepo::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update()
            .returning(|_, _| Err(RepositoryError::Persistence));

        let mut store = MockStore::new();
        accept_uploads(&mut store);
        store.expect_delete().never();

        let result = use_case(repo, store, ProductServiceConfig::default())
            .execute(update_params(id, vec![upload("img3.png")]))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ProductError::Repository(RepositoryError::Persistence)
        ));
    }

    #[tokio::test]
    async fn should_map_product_vanishing_during_update_to_not_found() {
        let id = Uuid::new_v4();
        let existing = existing_product(id);

        let mut repo = MockProductRepo::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update()
            .returning(|_, _| Err(RepositoryError::NotFound));

        let result = use_case(repo, MockStore::new(), ProductServiceConfig::default())
            .execute(update_params(id, vec![]))
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::NotFound));
    }

    #[tokio::test]
    async fn should_succeed_when_old_image_cleanup_fails() {
        let id = Uuid::new_v4();
        let existing = existing_product(id);
        let first_old = existing.images[0].path.clone();
        let second_old = existing.images[1].path.clone();

        let mut repo = MockProductRepo::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update()
            .returning(|id, draft| Ok(persisted(id, draft)));

        let mut store = MockStore::new();
        accept_uploads(&mut store);
        store
            .expect_delete()
            .with(eq(first_old))
            .times(1)
            .returning(|_| Err(StorageError::Delete));
        store
            .expect_delete()
            .with(eq(second_old))
            .times(1)
            .returning(|_| Err(StorageError::NotFound));

        let result = use_case(repo, store, ProductServiceConfig::default())
            .execute(update_params(id, vec![upload("img3.png")]))
            .await;

        assert!(result.is_ok());
    }
}
