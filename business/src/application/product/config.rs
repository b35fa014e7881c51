use std::future::Future;
use std::time::Duration;

/// Tuning for the product persistence use cases.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductServiceConfig {
    /// Upper bound for a single object store call.
    pub storage_timeout: Duration,
    /// Upper bound for a single document repository call.
    pub repository_timeout: Duration,
    /// Maximum number of image files accepted by one save.
    pub max_images: usize,
    /// When an upload fails midway through a save, delete the blobs that the
    /// same save already uploaded. When off, those blobs are logged and left
    /// as orphans; no document references them either way.
    pub compensate_failed_uploads: bool,
}

impl Default for ProductServiceConfig {
    fn default() -> Self {
        Self {
            storage_timeout: Duration::from_secs(30),
            repository_timeout: Duration::from_secs(10),
            max_images: 5,
            compensate_failed_uploads: false,
        }
    }
}

/// Runs `future` with a deadline, reporting `elapsed` when it is exceeded.
pub(crate) async fn bounded<T, E, F>(limit: Duration, elapsed: E, future: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    tokio::time::timeout(limit, future)
        .await
        .unwrap_or(Err(elapsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_five_images_without_compensation() {
        let config = ProductServiceConfig::default();
        assert_eq!(config.max_images, 5);
        assert!(!config.compensate_failed_uploads);
    }

    #[tokio::test(start_paused = true)]
    async fn should_report_elapsed_error_when_deadline_passes() {
        let result: Result<(), &str> = bounded(Duration::from_secs(1), "timeout", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        assert_eq!(result, Err("timeout"));
    }

    #[tokio::test]
    async fn should_pass_through_result_within_deadline() {
        let result: Result<u8, &str> =
            bounded(Duration::from_secs(1), "timeout", async { Ok(7) }).await;
        assert_eq!(result, Ok(7));
    }
}
