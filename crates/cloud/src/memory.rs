use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::blob::{BlobError, BlobStore};

/// Process-local blob store.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently stored, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobError> {
        self.objects
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| BlobError::NotFound {
                key: key.to_string(),
            })
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), BlobError> {
        self.objects.write().await.insert(key.to_string(), bytes);
        Ok(())
    }
}
