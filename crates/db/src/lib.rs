//! Durable employee record storage.
//!
//! - [`RecordStore`]: atomic conditional transactions over primary and
//!   secondary employee records.
//! - [`PgRecordStore`]: PostgreSQL backend.
//! - [`InMemoryRecordStore`]: in-process backend for tests and local runs.

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::StoreError;
pub use memory::InMemoryRecordStore;
pub use postgres::PgRecordStore;
pub use store::{
    ConditionCheck, ConditionalPut, Precondition, RecordKey, RecordStore, StoredRecord,
    TransactOutcome,
};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
