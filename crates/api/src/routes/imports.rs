//! Route definitions for employee imports.
//!
//! ```text
//! POST /                 create_import
//! GET  /{import_id}      get_import
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::imports;
use crate::state::AppState;

/// Import routes, mounted at `/imports`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(imports::create_import))
        .route("/{import_id}", get(imports::get_import))
}
