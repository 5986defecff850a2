//! Health, metrics and fallback tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::{assert_failure_envelope, TestApp};

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_liveness_returns_alive() {
    let app = TestApp::new();

    let response = app.server.get("/health/live").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "alive");
}

#[tokio::test]
async fn test_readiness_without_database_is_unavailable() {
    let app = TestApp::new();

    let response = app.server.get("/health/ready").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["database"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_unknown_route_returns_not_found_envelope() {
    let app = TestApp::new();

    let response = app.server.get("/does/not/exist").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_failure_envelope(&response.json(), "Not Found");
}

#[tokio::test]
async fn test_metrics_exposes_request_counters() {
    let app = TestApp::new();
    app.server.get("/health").await;

    let response = app.server.get("/metrics").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let text = response.text();
    assert!(text.contains("banter_http_requests_total"));
    assert!(text.contains("path=\"/health\""));
}
