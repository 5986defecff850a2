//! User API Tests

use axum::http::{header, HeaderValue, StatusCode};
use serde_json::json;
use uuid::Uuid;

use crate::common::{assert_failure_envelope, TestApp};

#[tokio::test]
async fn test_get_user_requires_token() {
    let app = TestApp::new();

    let response = app.server.get(&format!("/user/{}", Uuid::new_v4())).await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_failure_envelope(&response.json(), "Authentication Error");
}

#[tokio::test]
async fn test_get_user_rejects_garbage_token() {
    let app = TestApp::new();

    let response = app
        .server
        .get(&format!("/user/{}", Uuid::new_v4()))
        .authorization_bearer("not.a.jwt")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let message = assert_failure_envelope(&response.json(), "Authentication Error");
    assert_eq!(message, "Invalid token");
}

#[tokio::test]
async fn test_get_user_rejects_non_bearer_scheme() {
    let app = TestApp::new();
    let (_, token) = app.token();

    let response = app
        .server
        .get(&format!("/user/{}", Uuid::new_v4()))
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Token {}", token)).unwrap(),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_user_with_malformed_id() {
    let app = TestApp::new();
    let (_, token) = app.token();

    let response = app
        .server
        .get("/user/12345")
        .authorization_bearer(token)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_failure_envelope(&response.json(), "Invalid Input");
}

#[tokio::test]
async fn test_update_other_user_validates_body() {
    let app = TestApp::new();
    let (_, token) = app.token();

    let response = app
        .server
        .patch(&format!("/user/{}", Uuid::new_v4()))
        .authorization_bearer(token)
        .json(&json!({ "email": "nope" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let message = assert_failure_envelope(&response.json(), "Invalid Input");
    assert!(message.starts_with("email"));
}

#[tokio::test]
async fn test_update_self_with_invalid_mobile_number() {
    let app = TestApp::new();
    let (user_id, token) = app.token();

    let response = app
        .server
        .patch(&format!("/user/{}", user_id))
        .authorization_bearer(token)
        .json(&json!({ "mobile_number": "12-34" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let message = assert_failure_envelope(&response.json(), "Invalid Input");
    assert!(message.starts_with("mobile_number"));
}

#[tokio::test]
async fn test_update_with_malformed_id() {
    let app = TestApp::new();
    let (_, token) = app.token();

    let response = app
        .server
        .patch("/user/me")
        .authorization_bearer(token)
        .json(&json!({}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
