use std::sync::Arc;

use anyhow::{Context, bail};
use url::Url;

use business::domain::product::storage::ObjectStore;
use storage::client::{S3Settings, build_s3_client};
use storage::memory::InMemoryObjectStore;
use storage::s3::S3ObjectStore;

use super::env::read;

const DEFAULT_REGION: &str = "us-east-1";

/// Where product images are kept.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfig {
    S3(S3Settings),
    /// Process-local store; contents are lost on restart.
    Memory,
}

impl StorageConfig {
    /// Environment variables:
    /// - OBJECT_STORE: "s3" (default) or "memory"
    /// - STORAGE_BUCKET: bucket name (required for s3)
    /// - AWS_REGION: bucket region (default: "us-east-1")
    /// - STORAGE_ENDPOINT: custom S3-compatible endpoint, e.g. MinIO
    /// - STORAGE_PUBLIC_BASE_URL: base URL for public image links
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_values(
            read("OBJECT_STORE"),
            read("STORAGE_BUCKET"),
            read("AWS_REGION"),
            read("STORAGE_ENDPOINT"),
            read("STORAGE_PUBLIC_BASE_URL"),
        )
    }

    fn from_values(
        backend: Option<String>,
        bucket: Option<String>,
        region: Option<String>,
        endpoint: Option<String>,
        public_base_url: Option<String>,
    ) -> anyhow::Result<Self> {
        match backend.as_deref().map(str::trim) {
            None | Some("s3") => {
                let Some(bucket) = bucket else {
                    bail!("STORAGE_BUCKET must be set when OBJECT_STORE is s3");
                };
                Ok(Self::S3(S3Settings {
                    bucket,
                    region: region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
                    endpoint,
                    public_base_url,
                }))
            }
            Some("memory") => Ok(Self::Memory),
            Some(other) => bail!("Unsupported OBJECT_STORE {other:?}, expected s3 or memory"),
        }
    }
}

/// Builds the object store for the configured backend.
pub async fn init_object_store(config: &StorageConfig) -> anyhow::Result<Arc<dyn ObjectStore>> {
    match config {
        StorageConfig::S3(settings) => {
            let public_base = Url::parse(&settings.resolved_public_base_url())
                .context("STORAGE_PUBLIC_BASE_URL must be an absolute URL")?;
            let client = build_s3_client(settings).await;
            Ok(Arc::new(S3ObjectStore::new(
                client,
                settings.bucket.clone(),
                public_base,
            )))
        }
        StorageConfig::Memory => {
            tracing::warn!("Using the in-memory object store, images are lost on restart");
            Ok(Arc::new(InMemoryObjectStore::default()))
        }
    }
}
