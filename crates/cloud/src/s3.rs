//! Amazon S3 blob store.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::blob::{BlobError, BlobStore};

/// Objects are written as JSON documents.
const CONTENT_TYPE: &str = "application/json";

/// Blob store over one S3 bucket.
#[derive(Debug, Clone)]
pub struct S3BlobStore {
    client: Client,
    bucket: String,
}

impl S3BlobStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from the ambient AWS configuration (region,
    /// credentials) and bind it to `bucket`.
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), bucket)
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobError> {
        tracing::debug!(bucket = %self.bucket, key, "Getting object from S3");

        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    BlobError::NotFound {
                        key: key.to_string(),
                    }
                } else {
                    BlobError::Transport(service_err.to_string())
                }
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|err| BlobError::Transport(err.to_string()))?;
        Ok(data.into_bytes().to_vec())
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), BlobError> {
        tracing::debug!(bucket = %self.bucket, key, size = bytes.len(), "Putting object to S3");

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(CONTENT_TYPE)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|err| BlobError::Transport(err.into_service_error().to_string()))?;
        Ok(())
    }
}
