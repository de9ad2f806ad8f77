//! Handlers for import submissions and report retrieval.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use roster_core::employee::ValidatedItem;
use roster_core::report::ImportReport;
use roster_pipeline::{fetch_report, submit, ImportError, Submission};
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Response body shared by the import endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidatedItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ImportReport>,
}

impl ImportResponse {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            import_id: None,
            errors: None,
            report: None,
        }
    }
}

// ---------------------------------------------------------------------------
// POST /imports
// ---------------------------------------------------------------------------

/// Accept a JSON array of employees for asynchronous import.
///
/// Answers 202 with the import id when the whole batch is valid, 400 with
/// the failing items otherwise.
pub async fn create_import(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let submission = submit(&state.imports, &state.event_bus, &body).await?;

    let (status, body) = match submission {
        Submission::Accepted { import_id } => (
            StatusCode::ACCEPTED,
            ImportResponse {
                import_id: Some(import_id),
                ..ImportResponse::message(
                    "Import job request accepted. Processing will resume asynchronously",
                )
            },
        ),
        Submission::BadShape { max_per_request } => (
            StatusCode::BAD_REQUEST,
            ImportResponse::message(format!(
                "The request payload is not a valid JSON array, the array is empty or has more \
                 than {max_per_request} elements. Please review your request and try again."
            )),
        ),
        Submission::Invalid { errors } => {
            tracing::debug!(invalid = errors.len(), "Submission contains invalid items");
            (
                StatusCode::BAD_REQUEST,
                ImportResponse {
                    errors: Some(errors),
                    ..ImportResponse::message(
                        "The request payload contains at least one invalid employee item. \
                         Please review the error(s) and the corresponding item index(es), \
                         correct or remove the item(s) and try again.",
                    )
                },
            )
        }
    };

    Ok((status, Json(body)))
}

// ---------------------------------------------------------------------------
// GET /imports/{import_id}
// ---------------------------------------------------------------------------

/// Return the report of a finished import job.
pub async fn get_import(
    State(state): State<AppState>,
    Path(import_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    match fetch_report(&state.imports, &import_id).await {
        Ok(report) => Ok((
            StatusCode::OK,
            Json(ImportResponse {
                import_id: Some(import_id),
                report: Some(report),
                ..ImportResponse::message("Import job response found.")
            }),
        )),
        Err(ImportError::JobNotFound { import_id }) => {
            tracing::debug!(%import_id, "Import report not available");
            Ok((
                StatusCode::NOT_FOUND,
                Json(ImportResponse {
                    import_id: Some(import_id),
                    ..ImportResponse::message(
                        "The requested import id is invalid or the import job has not yet been \
                         started/completed. Please review the provided import job id and try \
                         again later.",
                    )
                }),
            ))
        }
        Err(e) => Err(e.into()),
    }
}
