use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster_api::config::ServerConfig;
use roster_api::router::build_app;
use roster_api::state::AppState;
use roster_cloud::{BlobStore, InMemoryBlobStore, S3BlobStore};
use roster_core::config::ImportConfig;
use roster_db::{InMemoryRecordStore, PgRecordStore, RecordStore};
use roster_events::EventBus;
use roster_pipeline::{ImportContext, JobRunner};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "roster_api=debug,roster_pipeline=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    let import_config = ImportConfig::from_env().expect("Invalid import configuration");
    tracing::info!(
        host = %config.host,
        port = config.port,
        max_per_request = import_config.max_per_request,
        write_concurrency = import_config.write_concurrency,
        "Loaded configuration"
    );

    // --- Record store ---
    let records: Arc<dyn RecordStore> = match &import_config.database_url {
        Some(database_url) => {
            let pool = roster_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            roster_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            roster_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgRecordStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, employee records are kept in memory");
            Arc::new(InMemoryRecordStore::new())
        }
    };

    // --- Blob store ---
    let blobs: Arc<dyn BlobStore> = match &import_config.bucket_name {
        Some(bucket) => {
            tracing::info!(%bucket, "Using S3 blob store");
            Arc::new(S3BlobStore::from_env(bucket.clone()).await)
        }
        None => {
            tracing::warn!("BUCKET_NAME not set, import requests and reports are kept in memory");
            Arc::new(InMemoryBlobStore::new())
        }
    };

    let imports = ImportContext::new(records, blobs, import_config);

    // --- Event bus and job runner ---
    let event_bus = Arc::new(EventBus::default());
    let runner_handle = tokio::spawn(JobRunner::new(imports.clone()).run(event_bus.subscribe()));
    tracing::info!("Import job runner started");

    // --- App state and router ---
    let state = AppState {
        imports,
        event_bus,
        config: Arc::new(config.clone()),
    };
    let app = build_app(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // The router owned the last bus handle; the runner now drains its jobs.
    tracing::info!("Server stopped accepting connections, waiting for import jobs");
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(drain, runner_handle).await.is_err() {
        tracing::warn!("Import jobs still running at shutdown");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
