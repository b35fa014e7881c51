use dotenvy::dotenv;

mod api {
    pub mod error;
    pub mod tags;
    pub mod health {
        pub mod routes;
    }
    pub mod product {
        pub mod dto;
        pub mod error_mapper;
        pub mod form;
        pub mod routes;
    }
}
mod config {
    pub mod app_config;
    pub mod cors_config;
    pub mod database_config;
    pub mod env;
    pub mod server_config;
    pub mod service_config;
    pub mod storage_config;
}
mod setup {
    pub mod dependency_injection;
    pub mod server;
}

use config::{app_config::AppConfig, database_config, storage_config};
use setup::{dependency_injection::DependencyContainer, server::Server};

/// REST API Entry Point
///
/// Loads configuration, connects the catalog and object stores, wires the
/// product use cases and starts the HTTP server.
///
/// - config/: environment-driven configuration (server, CORS, catalog, storage, service)
/// - setup/: dependency injection and server setup
/// - api/: route handlers, DTOs and multipart form parsing
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 2. Load environment variables
    dotenv().ok();

    // 3. Load configuration
    let config = AppConfig::from_env()?;

    // 4. Initialize the document and object stores
    let repository = database_config::init_repository(&config.catalog).await?;
    let store = storage_config::init_object_store(&config.storage).await?;

    // 5. Wire dependencies
    let container = DependencyContainer::new(repository, store, config.service.clone());

    // 6. Run server
    Server::run(config, container).await?;

    Ok(())
}
