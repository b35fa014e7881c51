use std::sync::Arc;

use anyhow::bail;

use business::domain::product::repository::ProductRepository;
use persistence::db::{DatabaseConfig, create_postgres_pool, run_migrations};
use persistence::product::memory::InMemoryProductRepository;
use persistence::product::repository::ProductRepositoryPostgres;

use super::env::read;

const DEFAULT_MIGRATIONS_PATH: &str = "infrastructure/persistence/migrations";

/// Where product documents are kept.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogConfig {
    Postgres {
        database_url: String,
        migrations_path: String,
    },
    /// Process-local store; contents are lost on restart.
    Memory,
}

impl CatalogConfig {
    /// Environment variables:
    /// - CATALOG_BACKEND: "postgres" (default) or "memory"
    /// - DATABASE_URL: PostgreSQL connection string (required for postgres)
    /// - MIGRATIONS_PATH: migrations directory (default: "infrastructure/persistence/migrations")
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_values(
            read("CATALOG_BACKEND"),
            read("DATABASE_URL"),
            read("MIGRATIONS_PATH"),
        )
    }

    fn from_values(
        backend: Option<String>,
        database_url: Option<String>,
        migrations_path: Option<String>,
    ) -> anyhow::Result<Self> {
        match backend.as_deref().map(str::trim) {
            None | Some("postgres") => {
                let Some(database_url) = database_url else {
                    bail!("DATABASE_URL must be set when CATALOG_BACKEND is postgres");
                };
                Ok(Self::Postgres {
                    database_url,
                    migrations_path: migrations_path
                        .unwrap_or_else(|| DEFAULT_MIGRATIONS_PATH.to_string()),
                })
            }
            Some("memory") => Ok(Self::Memory),
            Some(other) => {
                bail!("Unsupported CATALOG_BACKEND {other:?}, expected postgres or memory")
            }
        }
    }
}

/// Builds the product repository for the configured backend.
///
/// # Errors
/// Returns error if the database connection or the migrations fail
pub async fn init_repository(
    config: &CatalogConfig,
) -> anyhow::Result<Arc<dyn ProductRepository>> {
    match config {
        CatalogConfig::Postgres {
            database_url,
            migrations_path,
        } => {
            let pool = create_postgres_pool(&DatabaseConfig::new(database_url.clone())).await?;
            run_migrations(&pool, migrations_path).await?;
            Ok(Arc::new(ProductRepositoryPostgres::new(pool)))
        }
        CatalogConfig::Memory => {
            tracing::warn!("Using the in-memory catalog, products are lost on restart");
            Ok(Arc::new(InMemoryProductRepository::new()))
        }
    }
}
