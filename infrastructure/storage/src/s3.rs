use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use url::Url;

use business::domain::errors::StorageError;
use business::domain::product::storage::ObjectStore;

/// Object store backed by an S3-compatible bucket.
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    public_base: Url,
}

impl S3ObjectStore {
    pub fn new(client: Client, bucket: String, public_base: Url) -> Self {
        Self {
            client,
            bucket,
            public_base,
        }
    }

    pub fn public_url(&self, path: &str) -> String {
        public_url(&self.public_base, path)
    }
}

/// Appends the key segments of `path` to `base`, percent-encoding each one.
fn public_url(base: &Url, path: &str) -> String {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(path.split('/'));
    }
    url.to_string()
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(ByteStream::from(bytes.to_vec()))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(path = %path, error = %DisplayErrorContext(&e), "S3 upload failed");
                StorageError::Write
            })?;

        Ok(self.public_url(path))
    }

    async fn make_public(&self, path: &str) -> Result<(), StorageError> {
        self.client
            .put_object_acl()
            .bucket(&self.bucket)
            .key(path)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(path = %path, error = %DisplayErrorContext(&e), "S3 ACL update failed");
                StorageError::Write
            })?;

        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        // S3 reports success for deletes of missing keys, so probe first.
        if let Err(e) = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
        {
            if e.as_service_error().is_some_and(|se| se.is_not_found()) {
                return Err(StorageError::NotFound);
            }
            tracing::error!(path = %path, error = %DisplayErrorContext(&e), "S3 lookup before delete failed");
            return Err(StorageError::Delete);
        }

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(path = %path, error = %DisplayErrorContext(&e), "S3 delete failed");
                StorageError::Delete
            })?;

        tracing::debug!(path = %path, "S3 object deleted");
        Ok(())
    }
}
