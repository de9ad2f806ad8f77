use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// No object exists under the key. Expected for unknown or unfinished
    /// import jobs.
    #[error("Object not found: {key}")]
    NotFound { key: String },

    #[error("Blob transport error: {0}")]
    Transport(String),
}

impl BlobError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Keyed byte storage.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the object under `key`, failing with [`BlobError::NotFound`] if
    /// absent.
    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobError>;

    /// Durably store `bytes` under `key`, replacing any previous object.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), BlobError>;
}
