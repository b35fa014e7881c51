use std::sync::Arc;

use logger::TracingLogger;

use business::application::product::bounded_repository::BoundedProductRepository;
use business::application::product::config::ProductServiceConfig;
use business::application::product::get_all::GetAllProductsUseCaseImpl;
use business::application::product::get_by_id::GetProductByIdUseCaseImpl;
use business::application::product::image_gateway::ProductImageGateway;
use business::application::product::remove::RemoveProductUseCaseImpl;
use business::application::product::save::SaveProductUseCaseImpl;
use business::domain::logger::Logger;
use business::domain::product::repository::ProductRepository;
use business::domain::product::storage::ObjectStore;
use business::domain::product::use_cases::get_all::GetAllProductsUseCase;
use business::domain::product::use_cases::get_by_id::GetProductByIdUseCase;
use business::domain::product::use_cases::remove::RemoveProductUseCase;
use business::domain::product::use_cases::save::SaveProductUseCase;

use crate::api::health::routes::HealthApi;
use crate::api::product::routes::ProductApi;

/// The product use cases wired over a repository and an object store.
pub struct ProductUseCases {
    pub save: Arc<dyn SaveProductUseCase>,
    pub remove: Arc<dyn RemoveProductUseCase>,
    pub get_all: Arc<dyn GetAllProductsUseCase>,
    pub get_by_id: Arc<dyn GetProductByIdUseCase>,
}

impl ProductUseCases {
    pub fn wire(
        repository: Arc<dyn ProductRepository>,
        store: Arc<dyn ObjectStore>,
        config: ProductServiceConfig,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let repository: Arc<dyn ProductRepository> = Arc::new(BoundedProductRepository::new(
            repository,
            config.repository_timeout,
        ));
        let images = Arc::new(ProductImageGateway::new(
            store,
            logger.clone(),
            config.storage_timeout,
        ));

        let save = Arc::new(SaveProductUseCaseImpl {
            repository: repository.clone(),
            images: images.clone(),
            config,
            logger: logger.clone(),
        });
        let remove = Arc::new(RemoveProductUseCaseImpl {
            repository: repository.clone(),
            images,
            logger: logger.clone(),
        });
        let get_all = Arc::new(GetAllProductsUseCaseImpl {
            repository: repository.clone(),
            logger: logger.clone(),
        });
        let get_by_id = Arc::new(GetProductByIdUseCaseImpl { repository, logger });

        Self {
            save,
            remove,
            get_all,
            get_by_id,
        }
    }
}

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub product_api: ProductApi,
}

impl DependencyContainer {
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        store: Arc<dyn ObjectStore>,
        config: ProductServiceConfig,
    ) -> Self {
        let logger = Arc::new(TracingLogger::new("products"));
        let use_cases = ProductUseCases::wire(repository, store, config, logger);

        let product_api = ProductApi::new(
            use_cases.save,
            use_cases.remove,
            use_cases.get_all,
            use_cases.get_by_id,
        );

        Self {
            health_api: HealthApi,
            product_api,
        }
    }
}
