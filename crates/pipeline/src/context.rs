use std::sync::Arc;

use roster_cloud::BlobStore;
use roster_core::config::ImportConfig;
use roster_db::RecordStore;

use crate::orchestrator::WriteStrategy;

/// Bucket name used in notifications when blobs are kept in memory.
pub const MEMORY_BUCKET: &str = "in-memory";

/// Stores and configuration shared by submissions and jobs.
///
/// Cheaply cloneable; every handle is behind an `Arc`. The event bus stays
/// outside: a runner stops once every bus handle is dropped, and runners
/// hold a context.
#[derive(Clone)]
pub struct ImportContext {
    pub records: Arc<dyn RecordStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub config: Arc<ImportConfig>,
}

impl ImportContext {
    pub fn new(
        records: Arc<dyn RecordStore>,
        blobs: Arc<dyn BlobStore>,
        config: ImportConfig,
    ) -> Self {
        Self {
            records,
            blobs,
            config: Arc::new(config),
        }
    }

    /// Name of the bucket request objects are stored in.
    pub fn bucket(&self) -> &str {
        self.config.bucket_name.as_deref().unwrap_or(MEMORY_BUCKET)
    }

    pub fn write_strategy(&self) -> WriteStrategy {
        WriteStrategy::from_concurrency(self.config.write_concurrency)
    }
}
