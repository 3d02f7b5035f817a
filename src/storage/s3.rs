//! S3 storage client for product images
//!
//! Uses aws-sdk-s3 directly. With a custom endpoint the same client talks to
//! S3-compatible stores (MinIO, R2) using path-style addressing.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{
    Client as S3Client,
    config::{Builder, Credentials, Region},
    presigning::PresigningConfig,
    primitives::ByteStream,
};
use std::time::Duration;
use tracing::{debug, info, instrument};

use super::{ObjectKey, ObjectStore, StorageError};
use crate::config::{StorageSettings, UrlPolicy};

/// Bucket client that applies a single URL policy to every object it writes
#[derive(Clone)]
pub struct S3Store {
    client: S3Client,
    bucket: String,
    public_base_url: String,
    policy: UrlPolicy,
    presign_ttl: Duration,
}

impl S3Store {
    /// Create a new S3 client from settings
    ///
    /// Static credentials are used when an access key is configured;
    /// otherwise the default AWS provider chain resolves them.
    pub async fn new(settings: &StorageSettings) -> Result<Self, StorageError> {
        if settings.bucket.is_empty() {
            return Err(StorageError::NotConfigured("bucket name is empty".to_string()));
        }

        let region = Region::new(settings.region.clone());

        let access_key = non_blank(&settings.access_key_id);
        let secret_key = non_blank(&settings.secret_access_key);

        let mut builder = match (access_key, secret_key) {
            (Some(access_key), Some(secret_key)) => {
                let credentials = Credentials::new(
                    access_key,
                    secret_key,
                    non_blank(&settings.session_token).map(str::to_string),
                    None, // expiry
                    "catalog-static-credentials",
                );
                Builder::new()
                    .behavior_version(BehaviorVersion::latest())
                    .region(region)
                    .credentials_provider(credentials)
            }
            _ => {
                debug!("No static credentials configured, using default provider chain");
                let shared = aws_config::defaults(BehaviorVersion::latest())
                    .region(region)
                    .load()
                    .await;
                Builder::from(&shared)
            }
        };

        if let Some(ref endpoint) = settings.endpoint {
            debug!("Using custom S3 endpoint: {}", endpoint);
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let client = S3Client::from_conf(builder.build());

        let public_base_url = match (&settings.public_base_url, &settings.endpoint) {
            (Some(base), _) => base.trim_end_matches('/').to_string(),
            (None, Some(endpoint)) => {
                format!("{}/{}", endpoint.trim_end_matches('/'), settings.bucket)
            }
            (None, None) => format!(
                "https://{}.s3.{}.amazonaws.com",
                settings.bucket, settings.region
            ),
        };

        info!(
            bucket = %settings.bucket,
            region = %settings.region,
            policy = ?settings.url_policy,
            "S3 client ready"
        );

        Ok(Self {
            client,
            bucket: settings.bucket.clone(),
            public_base_url,
            policy: settings.url_policy,
            presign_ttl: Duration::from_secs(settings.presign_ttl_secs),
        })
    }

    /// Stable public URL of a key
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    /// Time-limited GET URL for a key
    #[instrument(skip(self))]
    pub async fn presigned_url(&self, key: &str) -> Result<String, StorageError> {
        let config = PresigningConfig::expires_in(self.presign_ttl)
            .map_err(|e| StorageError::SigningFailed(e.to_string()))?;

        let request = self.client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(config)
            .await
            .map_err(|e| StorageError::SigningFailed(format!("{:?}", e)))?;

        Ok(request.uri().to_string())
    }

    /// URL for a key under the configured policy
    pub async fn url_for(&self, key: &str) -> Result<String, StorageError> {
        match self.policy {
            UrlPolicy::Public => Ok(self.public_url(key)),
            UrlPolicy::Presigned => self.presigned_url(key).await,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[async_trait]
impl ObjectStore for S3Store {
    #[instrument(skip(self, key, data), fields(key = %key, size = data.len()))]
    async fn put(&self, key: &ObjectKey, data: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        let size = data.len();

        debug!("Uploading {} bytes to S3: {}", size, key);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key.as_str())
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(format!("{:?}", e)))?;

        info!("Uploaded to S3: {} ({} bytes)", key, size);
        Ok(())
    }

    fn reference_for(&self, key: &ObjectKey) -> String {
        match self.policy {
            UrlPolicy::Public => self.public_url(key.as_str()),
            UrlPolicy::Presigned => key.as_str().to_string(),
        }
    }

    async fn resolve(&self, reference: &str) -> Result<String, StorageError> {
        // Absolute references were written under the public policy (or by an
        // older deployment) and are served as-is.
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Ok(reference.to_string());
        }
        self.url_for(reference).await
    }
}
