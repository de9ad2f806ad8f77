//! Event-triggered import job.
//!
//! Loads a stored request, validates every element, imports the batch and
//! stores the resulting report next to the request.

use roster_core::employee::FilterMode;
use roster_core::keys;
use roster_core::report::ImportReport;
use roster_core::validation::validate;
use roster_events::{parse_s3_notification, BlobCreated};
use serde_json::Value;

use crate::context::ImportContext;
use crate::error::ImportError;
use crate::orchestrator::import_batch;

/// Run the import job for `import_id` and store its report.
///
/// A missing request object yields [`ImportError::JobNotFound`] and no
/// report. A store transport failure aborts the job before a report is
/// written, so a redelivered notification can run it again.
pub async fn process_request(
    ctx: &ImportContext,
    import_id: &str,
) -> Result<ImportReport, ImportError> {
    let request_key = keys::request_key(import_id);
    tracing::debug!(%import_id, key = %request_key, "Loading import request");

    let bytes = ctx
        .blobs
        .get(&request_key)
        .await
        .map_err(|err| ImportError::from_read(err, import_id))?;
    let records: Vec<Value> = serde_json::from_slice(&bytes)?;

    let items = validate(&records, FilterMode::All);
    let report = import_batch(ctx.records.as_ref(), items, ctx.write_strategy()).await?;

    if ctx.config.debug {
        for item in &report.errors {
            tracing::info!(%import_id, index = item.index, errors = ?item.errors, "Item not imported");
        }
    }

    ctx.blobs
        .put(&keys::response_key(import_id), serde_json::to_vec(&report)?)
        .await?;

    tracing::info!(
        %import_id,
        processed = report.processed_count,
        succeeded = report.success_count,
        failed = report.failure_count,
        "Import job completed"
    );
    Ok(report)
}

/// Run the job a blob-created notification points at.
///
/// Returns `Ok(None)` for notifications that are not import requests of
/// this context's bucket.
pub async fn handle_notification(
    ctx: &ImportContext,
    event: &BlobCreated,
) -> Result<Option<ImportReport>, ImportError> {
    let Some(import_id) = keys::import_id_from_request_key(&event.key) else {
        tracing::debug!(key = %event.key, "Ignoring non-request object");
        return Ok(None);
    };

    if event.bucket != ctx.bucket() {
        tracing::warn!(
            bucket = %event.bucket,
            expected = %ctx.bucket(),
            key = %event.key,
            "Ignoring notification for another bucket"
        );
        return Ok(None);
    }

    process_request(ctx, import_id).await.map(Some)
}

/// Run every import job named by an S3 event notification document.
///
/// Records for other buckets or prefixes are skipped. A failing job stops
/// the remaining ones so the whole notification can be redelivered.
pub async fn handle_s3_notification(
    ctx: &ImportContext,
    body: &[u8],
) -> Result<Vec<ImportReport>, ImportError> {
    let events = parse_s3_notification(body)?;
    tracing::debug!(records = events.len(), "Parsed S3 notification");

    let mut reports = Vec::with_capacity(events.len());
    for event in &events {
        if let Some(report) = handle_notification(ctx, event).await? {
            reports.push(report);
        }
    }
    Ok(reports)
}
