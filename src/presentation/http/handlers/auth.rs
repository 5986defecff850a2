//! Authentication Handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::request::{LoginRequest, RegisterRequest};
use crate::application::dto::response::{TokenResponse, UserResponse};
use crate::application::services::{AuthError, AuthService, AuthServiceImpl};
use crate::infrastructure::metrics::record_auth_attempt;
use crate::infrastructure::repositories::PgUserRepository;
use crate::presentation::http::extractors::ValidatedJson;
use crate::shared::error::{ApiResponse, AppError};
use crate::startup::AppState;

fn auth_service(state: &AppState) -> AuthServiceImpl<PgUserRepository> {
    let user_repo = Arc::new(PgUserRepository::new(state.db.clone()));
    AuthServiceImpl::new(user_repo, state.tokens.clone())
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    let user = auth_service(&state).register(body.into()).await?;

    Ok((StatusCode::CREATED, ApiResponse::ok(UserResponse::from(user))))
}

/// Login with email or username
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, AppError> {
    let result = auth_service(&state).login(body.into()).await;

    record_auth_attempt(match &result {
        Ok(_) => "success",
        Err(AuthError::InvalidCredentials) => "invalid_credentials",
        Err(AuthError::AccountBanned) => "banned",
        Err(AuthError::AccountInactive) => "inactive",
        Err(AuthError::MissingIdentifier) | Err(AuthError::InvalidInput(_)) => "invalid_request",
        Err(_) => "error",
    });

    Ok(ApiResponse::ok(TokenResponse::from(result?)))
}
