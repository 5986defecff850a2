//! User endpoints backed by a real database

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use super::seed_user;
use crate::common::{assert_failure_envelope, TestApp};

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_patch_unknown_user_is_not_found(pool: PgPool) {
    let app = TestApp::with_pool(pool);
    let (_, token) = app.token();

    let response = app
        .server
        .patch(&format!("/user/{}", Uuid::new_v4()))
        .authorization_bearer(token)
        .json(&json!({ "email": "x@y.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_failure_envelope(&response.json(), "Not Found");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_patch_updates_target_user(pool: PgPool) {
    let target = seed_user(&pool).await;
    let app = TestApp::with_pool(pool);
    let (_, token) = app.token();

    let response = app
        .server
        .patch(&format!("/user/{}", target.id))
        .authorization_bearer(token)
        .json(&json!({ "email": "renamed@example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["email"], "renamed@example.com");
    assert_eq!(body["data"]["username"], target.username.as_str());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_get_unknown_user_is_not_found(pool: PgPool) {
    let app = TestApp::with_pool(pool);
    let (_, token) = app.token();

    let response = app
        .server
        .get(&format!("/user/{}", Uuid::new_v4()))
        .authorization_bearer(token)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
