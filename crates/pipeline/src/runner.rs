//! Background job runner.
//!
//! [`JobRunner`] subscribes to the [`EventBus`](roster_events::EventBus)
//! and runs one import job per request notification. Jobs run as separate
//! tasks; the runner drains them and exits once the bus is dropped.

use roster_events::BlobCreated;
use tokio::sync::broadcast;
use tokio::task::JoinSet;

use crate::context::ImportContext;
use crate::error::ImportError;
use crate::job::handle_notification;

pub struct JobRunner {
    ctx: ImportContext,
}

impl JobRunner {
    pub fn new(ctx: ImportContext) -> Self {
        Self { ctx }
    }

    /// Run until the notification channel closes.
    ///
    /// A failing job is logged and does not stop the runner.
    pub async fn run(self, mut receiver: broadcast::Receiver<BlobCreated>) {
        let mut jobs = JoinSet::new();

        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let ctx = self.ctx.clone();
                    jobs.spawn(async move { run_job(&ctx, &event).await });
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Job runner lagged, some import notifications were dropped"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, job runner shutting down");
                    break;
                }
            }

            while let Some(joined) = jobs.try_join_next() {
                log_join(joined);
            }
        }

        while let Some(joined) = jobs.join_next().await {
            log_join(joined);
        }
    }
}

async fn run_job(ctx: &ImportContext, event: &BlobCreated) {
    match handle_notification(ctx, event).await {
        Ok(_) => {}
        Err(ImportError::JobNotFound { import_id }) => {
            tracing::info!(%import_id, "The import job request object was not found");
        }
        Err(e) => {
            tracing::error!(error = %e, key = %event.key, "Import job failed");
        }
    }
}

fn log_join(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        tracing::error!(error = %e, "Import job task panicked");
    }
}
