//! Conversation API Tests

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::common::{assert_failure_envelope, TestApp};

#[tokio::test]
async fn test_start_conversation_requires_token() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/conversation")
        .json(&json!({ "members": [Uuid::new_v4()] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_failure_envelope(&response.json(), "Authentication Error");
}

#[tokio::test]
async fn test_group_needs_three_members() {
    let app = TestApp::new();
    let (_, token) = app.token();

    let response = app
        .server
        .post("/conversation")
        .authorization_bearer(token)
        .json(&json!({
            "name": "pair",
            "is_group": true,
            "members": [Uuid::new_v4(), Uuid::new_v4()]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let message = assert_failure_envelope(&response.json(), "Invalid Input");
    assert!(message.contains("at least 3"));
}

#[tokio::test]
async fn test_duplicate_ids_do_not_satisfy_group_floor() {
    let app = TestApp::new();
    let (_, token) = app.token();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();

    let response = app
        .server
        .post("/conversation")
        .authorization_bearer(token)
        .json(&json!({ "is_group": true, "members": [a, b, a] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_start_conversation_requires_members() {
    let app = TestApp::new();
    let (_, token) = app.token();

    let response = app
        .server
        .post("/conversation")
        .authorization_bearer(token)
        .json(&json!({ "name": "nobody", "members": [] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_failure_envelope(&response.json(), "Invalid Input");
}

#[tokio::test]
async fn test_start_conversation_rejects_non_uuid_member() {
    let app = TestApp::new();
    let (_, token) = app.token();

    let response = app
        .server
        .post("/conversation")
        .authorization_bearer(token)
        .json(&json!({ "members": ["not-a-uuid"] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_failure_envelope(&response.json(), "Invalid Input");
}

#[tokio::test]
async fn test_start_conversation_rejects_long_name() {
    let app = TestApp::new();
    let (_, token) = app.token();

    let response = app
        .server
        .post("/conversation")
        .authorization_bearer(token)
        .json(&json!({ "name": "x".repeat(101), "members": [Uuid::new_v4()] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_conversation_ids_are_rejected() {
    let app = TestApp::new();
    let (_, token) = app.token();
    let user = Uuid::new_v4();

    let get = app
        .server
        .get("/conversation/abc")
        .authorization_bearer(token.clone())
        .await;
    assert_eq!(get.status_code(), StatusCode::BAD_REQUEST);

    let delete = app
        .server
        .delete("/conversation/abc")
        .authorization_bearer(token.clone())
        .await;
    assert_eq!(delete.status_code(), StatusCode::BAD_REQUEST);

    let add = app
        .server
        .post(&format!("/conversation/abc/member/{}", user))
        .authorization_bearer(token.clone())
        .await;
    assert_eq!(add.status_code(), StatusCode::BAD_REQUEST);

    let remove = app
        .server
        .delete(&format!("/conversation/{}/member/xyz", Uuid::new_v4()))
        .authorization_bearer(token)
        .await;
    assert_eq!(remove.status_code(), StatusCode::BAD_REQUEST);
    assert_failure_envelope(&remove.json(), "Invalid Input");
}

#[tokio::test]
async fn test_list_conversations_with_malformed_user_id() {
    let app = TestApp::new();
    let (_, token) = app.token();

    let response = app
        .server
        .get("/conversations/member/someone?page=1&limit=10")
        .authorization_bearer(token)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_failure_envelope(&response.json(), "Invalid Input");
}

#[tokio::test]
async fn test_membership_routes_require_token() {
    let app = TestApp::new();
    let path = format!("/conversation/{}/member/{}", Uuid::new_v4(), Uuid::new_v4());

    assert_eq!(
        app.server.post(&path).await.status_code(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.server.delete(&path).await.status_code(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.server
            .get(&format!("/conversations/member/{}", Uuid::new_v4()))
            .await
            .status_code(),
        StatusCode::UNAUTHORIZED
    );
}
