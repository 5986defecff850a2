//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::application::services::{AuthToken, ConversationPage, StartedConversation};
use crate::domain::{Conversation, ConversationWithMembers, User};
use crate::shared::validation::format_date_of_birth;

/// Access token response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<AuthToken> for TokenResponse {
    fn from(token: AuthToken) -> Self {
        Self {
            token: token.token,
            token_type: token.token_type,
            expires_in: token.expires_in,
        }
    }
}

/// Sanitized user projection; never carries the password hash or storage paths
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// `DD-MM-YYYY`
    pub date_of_birth: String,
    pub gender: String,
    pub mobile_number: String,
    pub profile_photo_url: Option<String>,
    pub is_staff: bool,
    pub is_owner: bool,
    pub last_seen: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            date_of_birth: format_date_of_birth(user.date_of_birth),
            gender: user.gender.as_str().to_string(),
            mobile_number: user.mobile_number,
            profile_photo_url: user.profile_photo_url,
            is_staff: user.is_staff,
            is_owner: user.is_owner,
            last_seen: user.last_seen.map(|t| t.to_rfc3339()),
            status: user.status.as_str().to_string(),
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Conversation response
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub id: String,
    pub name: Option<String>,
    pub is_group: bool,
    pub group_photo_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Conversation> for ConversationResponse {
    fn from(conversation: Conversation) -> Self {
        Self {
            id: conversation.id.to_string(),
            name: conversation.name,
            is_group: conversation.is_group,
            group_photo_url: conversation.group_photo_url,
            created_at: conversation.created_at.to_rfc3339(),
            updated_at: conversation.updated_at.to_rfc3339(),
        }
    }
}

/// Conversation together with its members
#[derive(Debug, Serialize)]
pub struct ConversationWithMembersResponse {
    pub conversation: ConversationResponse,
    pub members: Vec<UserResponse>,
}

impl From<ConversationWithMembers> for ConversationWithMembersResponse {
    fn from(value: ConversationWithMembers) -> Self {
        Self {
            conversation: value.conversation.into(),
            members: value.members.into_iter().map(UserResponse::from).collect(),
        }
    }
}

/// Newly started conversation
#[derive(Debug, Serialize)]
pub struct StartConversationResponse {
    pub conversation: ConversationResponse,
    pub members_count: usize,
}

impl From<StartedConversation> for StartConversationResponse {
    fn from(started: StartedConversation) -> Self {
        Self {
            conversation: started.conversation.into(),
            members_count: started.members_count,
        }
    }
}

/// One page of a user's conversations
#[derive(Debug, Serialize)]
pub struct PaginatedConversationsResponse {
    pub conversations: Vec<ConversationWithMembersResponse>,
    pub current_page: i64,
    pub next_page: i64,
    pub has_next_page: bool,
}

impl From<ConversationPage> for PaginatedConversationsResponse {
    fn from(page: ConversationPage) -> Self {
        Self {
            conversations: page
                .conversations
                .into_iter()
                .map(ConversationWithMembersResponse::from)
                .collect(),
            current_page: page.current_page,
            next_page: page.next_page,
            has_next_page: page.has_next_page,
        }
    }
}
