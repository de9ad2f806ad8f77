//! Accepting import submissions and serving their reports.
//!
//! A submission is checked up front (JSON array, size limit, every element
//! valid) so that only clean batches are queued. Accepted batches are stored
//! as request objects; the job that processes them is triggered by the
//! blob-created notification published here.

use roster_core::employee::{FilterMode, ValidatedItem};
use roster_core::keys;
use roster_core::report::ImportReport;
use roster_core::validation::validate;
use roster_events::{BlobCreated, EventBus};
use serde_json::Value;

use crate::context::ImportContext;
use crate::error::ImportError;

/// Outcome of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Stored and queued for processing under `import_id`.
    Accepted { import_id: String },
    /// Not a JSON array, empty, or above the configured size limit.
    BadShape { max_per_request: usize },
    /// At least one element failed validation; only the failing items are
    /// listed.
    Invalid { errors: Vec<ValidatedItem> },
}

/// Check a raw request body and, if clean, queue it as an import job.
pub async fn submit(
    ctx: &ImportContext,
    events: &EventBus,
    body: &[u8],
) -> Result<Submission, ImportError> {
    let max_per_request = ctx.config.max_per_request;

    let records = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Array(records)) if !records.is_empty() && records.len() <= max_per_request => {
            records
        }
        _ => return Ok(Submission::BadShape { max_per_request }),
    };

    let errors = validate(&records, FilterMode::Errors);
    if !errors.is_empty() {
        tracing::info!(
            invalid = errors.len(),
            total = records.len(),
            "Submission rejected"
        );
        return Ok(Submission::Invalid { errors });
    }

    let import_id = keys::new_import_id();
    let key = keys::request_key(&import_id);
    ctx.blobs.put(&key, serde_json::to_vec(&records)?).await?;
    events.publish(BlobCreated::new(ctx.bucket(), key));

    tracing::info!(%import_id, records = records.len(), "Import job request accepted");
    Ok(Submission::Accepted { import_id })
}

/// Load the report of a finished import job.
pub async fn fetch_report(
    ctx: &ImportContext,
    import_id: &str,
) -> Result<ImportReport, ImportError> {
    let bytes = ctx
        .blobs
        .get(&keys::response_key(import_id))
        .await
        .map_err(|err| ImportError::from_read(err, import_id))?;
    Ok(serde_json::from_slice(&bytes)?)
}
