use std::sync::Arc;

use roster_events::EventBus;
use roster_pipeline::ImportContext;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Record and blob stores plus import configuration.
    pub imports: ImportContext,
    /// Publishes a notification for every accepted submission.
    pub event_bus: Arc<EventBus>,
    pub config: Arc<ServerConfig>,
}
