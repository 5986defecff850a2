//! Conversation Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{PaginationParams, StartConversationRequest};
use crate::application::dto::response::{
    ConversationWithMembersResponse, PaginatedConversationsResponse, StartConversationResponse,
};
use crate::application::services::{ConversationService, ConversationServiceImpl};
use crate::infrastructure::repositories::PgConversationRepository;
use crate::presentation::http::extractors::{parse_uuid, ValidatedJson};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::{ApiResponse, AppError, MessageBody};
use crate::startup::AppState;

fn conversation_service(state: &AppState) -> ConversationServiceImpl<PgConversationRepository> {
    ConversationServiceImpl::new(Arc::new(PgConversationRepository::new(state.db.clone())))
}

/// Start a direct or group conversation
pub async fn start_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<StartConversationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StartConversationResponse>>), AppError> {
    let started = conversation_service(&state)
        .start_conversation(body.into())
        .await?;

    tracing::debug!(
        user_id = %auth.user_id,
        conversation_id = %started.conversation.id,
        "Conversation started by user"
    );

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(StartConversationResponse::from(started)),
    ))
}

/// Get a conversation with its members
pub async fn get_conversation(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(conversation_id): Path<String>,
) -> Result<Json<ApiResponse<ConversationWithMembersResponse>>, AppError> {
    let conversation_id = parse_uuid(&conversation_id, "conversation id")?;

    let conversation = conversation_service(&state)
        .get_conversation(conversation_id)
        .await?;

    Ok(ApiResponse::ok(ConversationWithMembersResponse::from(
        conversation,
    )))
}

/// Soft-delete a conversation
pub async fn delete_conversation(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(conversation_id): Path<String>,
) -> Result<Json<ApiResponse<MessageBody>>, AppError> {
    let conversation_id = parse_uuid(&conversation_id, "conversation id")?;

    conversation_service(&state)
        .delete_conversation(conversation_id)
        .await?;

    Ok(ApiResponse::ok(MessageBody::new("Conversation deleted")))
}

/// List the conversations a user belongs to, newest first
pub async fn list_member_conversations(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedConversationsResponse>>, AppError> {
    let user_id = parse_uuid(&user_id, "user id")?;

    let page = conversation_service(&state)
        .list_user_conversations(user_id, params.into())
        .await?;

    Ok(ApiResponse::ok(PaginatedConversationsResponse::from(page)))
}

/// Add a user to a conversation
pub async fn add_member(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((conversation_id, user_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageBody>>, AppError> {
    let conversation_id = parse_uuid(&conversation_id, "conversation id")?;
    let user_id = parse_uuid(&user_id, "user id")?;

    conversation_service(&state)
        .add_member(conversation_id, user_id)
        .await?;

    Ok(ApiResponse::ok(MessageBody::new("Member added")))
}

/// Remove a user from a conversation
pub async fn remove_member(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((conversation_id, user_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageBody>>, AppError> {
    let conversation_id = parse_uuid(&conversation_id, "conversation id")?;
    let user_id = parse_uuid(&user_id, "user id")?;

    conversation_service(&state)
        .remove_member(conversation_id, user_id)
        .await?;

    Ok(ApiResponse::ok(MessageBody::new("Member removed")))
}
