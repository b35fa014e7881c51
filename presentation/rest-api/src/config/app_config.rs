use poem::middleware::Cors;

use business::application::product::config::ProductServiceConfig;

use super::{
    cors_config, database_config::CatalogConfig, server_config::ServerConfig,
    service_config::load_service_config, storage_config::StorageConfig,
};

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
    pub service: ProductServiceConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            cors: cors_config::init_cors(),
            catalog: CatalogConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            service: load_service_config()?,
        })
    }
}
