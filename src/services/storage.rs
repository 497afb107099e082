// src/services/storage.rs

use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

use crate::common::ApiError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Bucket provisioning failed: {0}")]
    ProvisioningFailed(String),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::StorageError(err.to_string())
    }
}

/// Connection settings for the S3-compatible object store
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
}

/// Client for the recipe image bucket
#[derive(Debug)]
pub struct RecipeStorage {
    client: S3Client,
    endpoint: String,
    bucket: String,
}

impl RecipeStorage {
    pub async fn connect(config: StorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "static",
        );

        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(credentials)
            .endpoint_url(format!("http://{}", config.endpoint))
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
            .force_path_style(true)
            .build();

        Self {
            client: S3Client::from_conf(s3_config),
            endpoint: config.endpoint,
            bucket: config.bucket,
        }
    }

    /// Upload an image and return its public URL
    pub async fn upload_image(
        &self,
        data: Vec<u8>,
        content_type: &str,
        object_key: &str,
    ) -> Result<String, StorageError> {
        let body = ByteStream::from(Bytes::from(data));

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(object_key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, key = %object_key, "Failed to upload object");
                StorageError::UploadFailed(e.to_string())
            })?;

        info!(key = %object_key, bucket = %self.bucket, "Object uploaded");

        Ok(format!(
            "http://{}/{}/{}",
            self.endpoint, self.bucket, object_key
        ))
    }

    /// Delete an object by key
    pub async fn delete_object(&self, object_key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(object_key)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, key = %object_key, "Failed to delete object");
                StorageError::DeleteFailed(e.to_string())
            })?;

        info!(key = %object_key, bucket = %self.bucket, "Object deleted");
        Ok(())
    }

    /// Create the bucket with a public-read policy if it doesn't exist yet
    pub async fn ensure_bucket(&self) -> Result<(), StorageError> {
        let buckets = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| StorageError::ProvisioningFailed(e.to_string()))?;

        let exists = buckets
            .buckets()
            .iter()
            .any(|b| b.name() == Some(self.bucket.as_str()));

        if exists {
            return Ok(());
        }

        self.client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| StorageError::ProvisioningFailed(e.to_string()))?;

        let policy = json!({
            "Version": "2012-10-17",
            "Statement": [{
                "Effect": "Allow",
                "Principal": "*",
                "Action": "s3:GetObject",
                "Resource": format!("arn:aws:s3:::{}/*", self.bucket),
            }],
        });

        self.client
            .put_bucket_policy()
            .bucket(&self.bucket)
            .policy(policy.to_string())
            .send()
            .await
            .map_err(|e| StorageError::ProvisioningFailed(e.to_string()))?;

        info!(bucket = %self.bucket, "Bucket created with public-read policy");
        Ok(())
    }
}

/// Object keys are the trailing path segment of a stored public URL
pub fn object_key_from_url(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
