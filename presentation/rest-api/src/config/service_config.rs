use std::time::Duration;

use business::application::product::config::ProductServiceConfig;

use super::env::{parse_or, read};

/// Loads the product service tuning
///
/// Environment variables:
/// - STORAGE_TIMEOUT_SECS: per object store call (default: 30)
/// - REPOSITORY_TIMEOUT_SECS: per repository call (default: 10)
/// - MAX_PRODUCT_IMAGES: images accepted per save (default: 5)
/// - COMPENSATE_FAILED_UPLOADS: delete blobs of a partially failed upload batch (default: false)
pub fn load_service_config() -> anyhow::Result<ProductServiceConfig> {
    service_config_from_values(
        read("STORAGE_TIMEOUT_SECS"),
        read("REPOSITORY_TIMEOUT_SECS"),
        read("MAX_PRODUCT_IMAGES"),
        read("COMPENSATE_FAILED_UPLOADS"),
    )
}

fn service_config_from_values(
    storage_timeout: Option<String>,
    repository_timeout: Option<String>,
    max_images: Option<String>,
    compensate_failed_uploads: Option<String>,
) -> anyhow::Result<ProductServiceConfig> {
    let defaults = ProductServiceConfig::default();

    Ok(ProductServiceConfig {
        storage_timeout: Duration::from_secs(parse_or(
            "STORAGE_TIMEOUT_SECS",
            storage_timeout,
            defaults.storage_timeout.as_secs(),
        )?),
        repository_timeout: Duration::from_secs(parse_or(
            "REPOSITORY_TIMEOUT_SECS",
            repository_timeout,
            defaults.repository_timeout.as_secs(),
        )?),
        max_images: parse_or("MAX_PRODUCT_IMAGES", max_images, defaults.max_images)?,
        compensate_failed_uploads: parse_or(
            "COMPENSATE_FAILED_UPLOADS",
            compensate_failed_uploads,
            defaults.compensate_failed_uploads,
        )?,
    })
}
