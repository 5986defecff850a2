//! Authentication API Tests

use axum::http::StatusCode;
use serde_json::json;
use test_case::test_case;

use crate::common::{assert_failure_envelope, valid_registration, TestApp};

#[test_case("username", json!("not_alnum!") ; "username with symbols")]
#[test_case("email", json!("not-an-email") ; "invalid email")]
#[test_case("password", json!("short") ; "short password")]
#[test_case("first_name", json!("J") ; "first name too short")]
#[test_case("last_name", json!("Sm1th") ; "last name with digit")]
#[test_case("date_of_birth", json!("1996-03-24") ; "iso date")]
#[test_case("gender", json!("unknown") ; "unknown gender")]
#[test_case("mobile_number", json!("12345") ; "short mobile number")]
#[tokio::test]
async fn test_register_rejects_invalid_field(field: &str, value: serde_json::Value) {
    let app = TestApp::new();
    let mut body = valid_registration();
    body[field] = value;

    let response = app.server.post("/auth/register").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let message = assert_failure_envelope(&response.json(), "Invalid Input");
    assert!(message.contains(field), "message: {}", message);
}

#[tokio::test]
async fn test_register_rejects_missing_field() {
    let app = TestApp::new();
    let mut body = valid_registration();
    body.as_object_mut().unwrap().remove("mobile_number");

    let response = app.server.post("/auth/register").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_failure_envelope(&response.json(), "Invalid Input");
}

#[tokio::test]
async fn test_register_rejects_malformed_json() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/auth/register")
        .bytes("{\"username\": ".into())
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_failure_envelope(&response.json(), "Invalid Input");
}

#[tokio::test]
async fn test_login_requires_email_or_username() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({ "password": "whatever123" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let message = assert_failure_envelope(&response.json(), "Invalid Input");
    assert_eq!(message, "Please provide username or email");
}

#[tokio::test]
async fn test_login_rejects_malformed_email() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({ "email": "nope", "password": "whatever123" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_failure_envelope(&response.json(), "Invalid Input");
}

#[tokio::test]
async fn test_login_requires_password() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({ "username": "alice" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_failure_envelope(&response.json(), "Invalid Input");
}

#[test_case(json!({ "email": "", "password": "whatever123" }) ; "empty email")]
#[test_case(json!({ "email": "", "username": "  ", "password": "whatever123" }) ; "blank email and username")]
#[tokio::test]
async fn test_login_blank_identifiers_count_as_missing(body: serde_json::Value) {
    let app = TestApp::new();

    let response = app.server.post("/auth/login").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let message = assert_failure_envelope(&response.json(), "Invalid Input");
    assert_eq!(message, "Please provide username or email");
}
