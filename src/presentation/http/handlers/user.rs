//! User Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::application::dto::request::UpdateUserRequest;
use crate::application::dto::response::UserResponse;
use crate::application::services::{UserService, UserServiceImpl};
use crate::infrastructure::repositories::PgUserRepository;
use crate::presentation::http::extractors::{parse_uuid, ValidatedJson};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::{ApiResponse, AppError};
use crate::startup::AppState;

fn user_service(state: &AppState) -> UserServiceImpl<PgUserRepository> {
    UserServiceImpl::new(Arc::new(PgUserRepository::new(state.db.clone())))
}

/// Get a user's public profile
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user_id = parse_uuid(&user_id, "user id")?;

    let user = user_service(&state).get_user(user_id).await?;

    Ok(ApiResponse::ok(UserResponse::from(user)))
}

/// Partially update a user's profile
pub async fn update_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user_id = parse_uuid(&user_id, "user id")?;

    let user = user_service(&state).update_user(user_id, body.into()).await?;

    Ok(ApiResponse::ok(UserResponse::from(user)))
}
