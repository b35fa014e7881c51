use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;

/// Connection settings for the S3-compatible bucket holding product images.
#[derive(Debug, Clone, PartialEq)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible services such as MinIO.
    pub endpoint: Option<String>,
    /// Base URL under which stored objects are publicly served.
    pub public_base_url: Option<String>,
}

impl S3Settings {
    /// Returns the public base URL, derived from the endpoint or the AWS
    /// virtual-hosted address when none is configured.
    pub fn resolved_public_base_url(&self) -> String {
        if let Some(base) = &self.public_base_url {
            return base.trim_end_matches('/').to_string();
        }
        match &self.endpoint {
            Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), self.bucket),
            None => format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region),
        }
    }
}

/// Builds an S3 client using the standard AWS credential chain.
pub async fn build_s3_client(settings: &S3Settings) -> Client {
    let shared = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()))
        .load()
        .await;

    let mut builder = aws_sdk_s3::config::Builder::from(&shared);
    if let Some(endpoint) = &settings.endpoint {
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }

    tracing::info!(bucket = %settings.bucket, region = %settings.region, "S3 client initialized");
    Client::from_conf(builder.build())
}
