//! Presigning client over the AWS SDK.

use std::time::Duration;

use aws_credential_types::Credentials;
use aws_sdk_s3::config::{BehaviorVersion, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use griot_core::storage::SignedUrlRequest;

use crate::config::StorageConfig;

/// Errors from the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested TTL is outside what presigning allows.
    #[error("Invalid presigning TTL: {0}")]
    InvalidTtl(#[from] aws_sdk_s3::presigning::PresigningConfigError),

    /// The SDK refused to sign the request.
    #[error("Failed to presign object {key}: {message}")]
    Sign { key: String, message: String },
}

/// Issues short-lived download URLs for objects in the audio bucket.
#[derive(Clone)]
pub struct StorageClient {
    client: Client,
}

impl StorageClient {
    /// Build a client from static credentials.
    ///
    /// `force_path_style` keeps bucket names in the URL path, which every
    /// S3-compatible store accepts.
    pub fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "storefront",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .behavior_version(BehaviorVersion::latest())
            .force_path_style(true);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint.clone());
        }

        Self {
            client: Client::from_conf(builder.build()),
        }
    }

    /// Produce a presigned GET URL for the requested object.
    pub async fn sign_url(&self, request: &SignedUrlRequest) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(Duration::from_secs(request.ttl_secs))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&request.bucket)
            .key(&request.object_key)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Sign {
                key: request.object_key.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            key = %request.object_key,
            ttl_secs = request.ttl_secs,
            "Issued presigned playback URL"
        );
        Ok(presigned.uri().to_string())
    }
}
