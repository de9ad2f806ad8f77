#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use roster_api::config::ServerConfig;
use roster_api::router::build_app;
use roster_api::state::AppState;
use roster_cloud::InMemoryBlobStore;
use roster_core::config::ImportConfig;
use roster_db::InMemoryRecordStore;
use roster_events::EventBus;
use roster_pipeline::ImportContext;

/// Router plus handles on the in-memory collaborators behind it.
pub struct TestApp {
    pub app: Router,
    pub imports: ImportContext,
    pub event_bus: Arc<EventBus>,
}

/// Build the full application router over in-memory stores.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack.
pub fn build_test_app(max_per_request: usize) -> TestApp {
    let config = ImportConfig {
        max_per_request,
        ..Default::default()
    };
    let imports = ImportContext::new(
        Arc::new(InMemoryRecordStore::new()),
        Arc::new(InMemoryBlobStore::new()),
        config,
    );
    let event_bus = Arc::new(EventBus::default());

    let state = AppState {
        imports: imports.clone(),
        event_bus: Arc::clone(&event_bus),
        config: Arc::new(ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..Default::default()
        }),
    };

    TestApp {
        app: build_app(state),
        imports,
        event_bus,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &serde_json::Value) -> Response<Body> {
    post_raw(app, uri, &body.to_string()).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
