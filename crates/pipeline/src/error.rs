use roster_cloud::BlobError;
use roster_db::StoreError;
use roster_events::NotificationError;

/// Failures of an import job or submission.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// No request or report object exists for the import id.
    #[error("Import job not found: {import_id}")]
    JobNotFound { import_id: String },

    #[error("Record store failure: {0}")]
    Store(#[from] StoreError),

    #[error("Blob store failure: {0}")]
    Blob(#[from] BlobError),

    #[error("Malformed import payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    Notification(#[from] NotificationError),
}

impl ImportError {
    /// Map a blob read failure, turning `NotFound` into `JobNotFound`.
    pub(crate) fn from_read(err: BlobError, import_id: &str) -> Self {
        if err.is_not_found() {
            Self::JobNotFound {
                import_id: import_id.to_string(),
            }
        } else {
            Self::Blob(err)
        }
    }
}
