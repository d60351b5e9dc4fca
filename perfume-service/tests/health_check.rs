mod common;

use axum::http::StatusCode;
use common::{ensure_metrics_initialized, TestApp, UnreachableStore};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn root_reports_running() {
    let app = TestApp::spawn();

    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Perfume Store API is running");
}

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn();

    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["service"], "perfume-service");
}

#[tokio::test]
async fn health_check_fails_when_database_unreachable() {
    let app = TestApp::with_store(Arc::new(UnreachableStore));

    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["status"], "unhealthy");
}

#[tokio::test]
async fn diagnostics_lists_collections() {
    let app = TestApp::spawn();
    app.post("/api/seed").await;

    let response = app.get("/test").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["backend"], "Running");
    assert_eq!(response.body["connection_status"], "Connected");
    assert_eq!(response.body["database_url"], "Set");
    assert_eq!(response.body["database_name"], "Set");
    assert_eq!(response.body["collections"], json!(["perfume"]));
    assert!(response.body["database"]
        .as_str()
        .unwrap()
        .starts_with("Connected & Working"));
}

#[tokio::test]
async fn diagnostics_never_fails_when_database_unreachable() {
    let app = TestApp::with_store(Arc::new(UnreachableStore));

    let response = app.get("/test").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["database"]
        .as_str()
        .unwrap()
        .starts_with("Connected but Error"));
    assert_eq!(response.body["collections"], json!([]));
}

#[tokio::test]
async fn diagnostics_without_database_configuration() {
    let app = TestApp::without_store();

    let response = app.get("/test").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["database"], "Not Available");
    assert_eq!(response.body["connection_status"], "Not Connected");
    assert_eq!(response.body["database_url"], "Not Set");
    assert_eq!(response.body["database_name"], "Not Set");
}

#[tokio::test]
async fn metrics_endpoint_reports_created_perfumes() {
    ensure_metrics_initialized();
    let app = TestApp::spawn();

    let created = app
        .post_json("/api/perfumes", json!({ "name": "Violet Dawn", "price": 95.0 }))
        .await;
    assert_eq!(created.status, StatusCode::OK);

    let response = app.get("/metrics").await;

    assert_eq!(response.status, StatusCode::OK);
    let text = response.body.as_str().expect("metrics should be plain text");
    assert!(text.contains("perfumes_created_total"));
    assert!(text.contains("http_requests_total"));
}
