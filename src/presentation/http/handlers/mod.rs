//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod auth;
pub mod conversation;
pub mod health;
pub mod user;

use crate::shared::error::AppError;

/// Fallback for unmatched routes
pub async fn not_found() -> AppError {
    AppError::NotFound("The requested resource does not exist".into())
}
