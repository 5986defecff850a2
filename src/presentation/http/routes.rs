//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    http::header::CONTENT_TYPE,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{auth_middleware, track_metrics};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/auth", auth_routes())
        .merge(protected_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> Result<impl IntoResponse, AppError> {
    let body = metrics::gather_metrics()
        .map_err(|e| AppError::Internal(format!("Failed to encode metrics: {}", e)))?;

    Ok(([(CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")], body))
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
}

/// User and conversation routes (require a bearer token)
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/user/{user_id}",
            get(handlers::user::get_user).patch(handlers::user::update_user),
        )
        .route("/conversation", post(handlers::conversation::start_conversation))
        .route(
            "/conversation/{conversation_id}",
            get(handlers::conversation::get_conversation)
                .delete(handlers::conversation::delete_conversation),
        )
        .route(
            "/conversation/{conversation_id}/member/{user_id}",
            post(handlers::conversation::add_member)
                .delete(handlers::conversation::remove_member),
        )
        .route(
            "/conversations/member/{user_id}",
            get(handlers::conversation::list_member_conversations),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
