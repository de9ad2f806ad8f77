/// Transport-level failures of a record store.
///
/// Condition failures are not errors; see
/// [`TransactOutcome::Rejected`](crate::store::TransactOutcome::Rejected).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Malformed store response: {0}")]
    Malformed(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
