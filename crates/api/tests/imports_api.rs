//! HTTP-level integration tests for the `/imports` endpoints.
//!
//! Requests go straight to the router via `tower::ServiceExt`. Jobs are run
//! inline with `process_request` instead of the background runner so the
//! tests stay deterministic.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json, post_raw};
use roster_db::RecordKey;
use roster_pipeline::job::process_request;
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: POST /api/v1/imports accepts a clean batch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_submit_clean_batch_is_accepted() {
    let test = build_test_app(10);
    let mut notifications = test.event_bus.subscribe();

    let response = post_json(
        test.app,
        "/api/v1/imports",
        &json!([{ "empNo": "E1", "firstName": "A", "lastName": "B" }]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let json = body_json(response).await;
    let import_id = json["importId"].as_str().expect("importId should be a string");
    assert!(json.get("errors").is_none());

    let event = notifications.recv().await.unwrap();
    assert_eq!(event.key, format!("request/{import_id}"));
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/imports rejects invalid items with their errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_submit_with_invalid_items_lists_errors() {
    let test = build_test_app(10);

    let response = post_json(
        test.app,
        "/api/v1/imports",
        &json!([
            { "empNo": "E1", "firstName": "A", "lastName": "B" },
            { "empNo": "E2" }
        ]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json.get("importId").is_none());
    let errors = json["errors"].as_array().expect("errors should be an array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["index"], 1);
    assert_eq!(
        errors[0]["errors"],
        json!(["firstName is missing or empty", "lastName is missing or empty"])
    );
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/imports rejects bad payload shapes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_submit_bad_shapes_are_rejected() {
    let test = build_test_app(2);

    for body in ["{}", "[]", "not json", r#"[{"empNo":"1"},{"empNo":"2"},{"empNo":"3"}]"#] {
        let response = post_raw(test.app.clone(), "/api/v1/imports", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");

        let json = body_json(response).await;
        let message = json["message"].as_str().unwrap();
        assert!(message.contains("more than 2 elements"), "message: {message}");
    }
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/imports/{id} before the job ran is 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_unknown_import_is_not_found() {
    let test = build_test_app(10);

    let response = get(test.app, "/api/v1/imports/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["importId"], "does-not-exist");
    assert!(json.get("report").is_none());
}

// ---------------------------------------------------------------------------
// Test: submit, process, then read the report
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_full_import_round_trip() {
    let test = build_test_app(10);

    let response = post_json(
        test.app.clone(),
        "/api/v1/imports",
        &json!([
            { "empNo": "E1", "firstName": "A", "lastName": "B", "phNo": "555-1111" },
            { "empNo": "E2", "firstName": "C", "lastName": "D", "phNo": "555-2222" }
        ]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let import_id = body_json(response).await["importId"]
        .as_str()
        .unwrap()
        .to_string();

    process_request(&test.imports, &import_id).await.unwrap();

    let response = get(test.app, &format!("/api/v1/imports/{import_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["importId"], import_id.as_str());
    assert_eq!(
        json["report"],
        json!({ "processedCount": 2, "successCount": 2, "failureCount": 0, "errors": [] })
    );

    let phone = test
        .imports
        .records
        .get(&RecordKey::Phone("555-2222".into()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(phone.emp_no, "E2");
}

// ---------------------------------------------------------------------------
// Test: a second job for the same employees reports store conflicts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_phone_claimed_by_other_employee_is_reported() {
    let test = build_test_app(10);

    let first = post_json(
        test.app.clone(),
        "/api/v1/imports",
        &json!([{ "empNo": "E1", "firstName": "A", "lastName": "B", "phNo": "555" }]),
    )
    .await;
    let first_id = body_json(first).await["importId"].as_str().unwrap().to_string();
    process_request(&test.imports, &first_id).await.unwrap();

    let second = post_json(
        test.app.clone(),
        "/api/v1/imports",
        &json!([{ "empNo": "E2", "firstName": "C", "lastName": "D", "phNo": "555" }]),
    )
    .await;
    let second_id = body_json(second).await["importId"].as_str().unwrap().to_string();
    let report = process_request(&test.imports, &second_id).await.unwrap();

    assert_eq!(report.success_count, 0);
    assert_eq!(report.failure_count, 1);
    assert_eq!(report.errors[0].errors, vec!["Duplicate phNo value detected.".to_string()]);
}
