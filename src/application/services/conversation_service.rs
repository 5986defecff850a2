//! Conversation Service
//!
//! Starting, reading, paging and deleting conversations, plus membership
//! changes guarded by the two-member floor.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    dedup_member_ids, Conversation, ConversationRepository, ConversationWithMembers,
    MemberRemoval, MEMBERSHIP_FLOOR, MIN_GROUP_MEMBERS,
};
use crate::shared::error::AppError;

/// Page size used when the client sends none (or a non-positive one)
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on page size
pub const MAX_PAGE_SIZE: i64 = 100;

/// Conversation service trait
#[async_trait]
pub trait ConversationService: Send + Sync {
    /// Create a conversation with its initial members
    async fn start_conversation(
        &self,
        input: StartConversationDto,
    ) -> Result<StartedConversation, ConversationError>;

    /// Get a conversation and its current members
    async fn get_conversation(&self, id: Uuid) -> Result<ConversationWithMembers, ConversationError>;

    /// One page of the conversations a user belongs to
    async fn list_user_conversations(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<ConversationPage, ConversationError>;

    /// Add a user to a conversation; re-adding an active member is a no-op
    async fn add_member(&self, conversation_id: Uuid, user_id: Uuid) -> Result<(), ConversationError>;

    /// Remove a user unless the conversation would drop below two members
    async fn remove_member(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), ConversationError>;

    /// Soft-delete a conversation together with its memberships
    async fn delete_conversation(&self, id: Uuid) -> Result<(), ConversationError>;
}

/// Input for starting a conversation
#[derive(Debug, Clone, Default)]
pub struct StartConversationDto {
    pub name: Option<String>,
    pub is_group: bool,
    pub members: Vec<Uuid>,
}

/// A freshly created conversation
#[derive(Debug, Clone)]
pub struct StartedConversation {
    pub conversation: Conversation,
    pub members_count: usize,
}

/// Normalized pagination parameters (1-based page)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Out-of-range values fall back to page 1 and the default size;
    /// oversized limits are capped.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(1);
        let limit = limit
            .filter(|l| *l >= 1)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);

        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of conversations
#[derive(Debug, Clone)]
pub struct ConversationPage {
    pub conversations: Vec<ConversationWithMembers>,
    pub current_page: i64,
    /// `0` when there is no next page
    pub next_page: i64,
    pub has_next_page: bool,
}

/// Conversation service errors
#[derive(Debug, thiserror::Error)]
pub enum ConversationError {
    #[error("Conversation not found")]
    NotFound,

    #[error("User is not a member of this conversation")]
    NotAMember,

    #[error("A conversation must keep at least 2 members")]
    MembershipFloor,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for ConversationError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(_) => ConversationError::NotFound,
            AppError::Validation(msg) => ConversationError::InvalidInput(msg),
            e => ConversationError::Internal(e.to_string()),
        }
    }
}

impl From<ConversationError> for AppError {
    fn from(err: ConversationError) -> Self {
        match err {
            ConversationError::NotFound | ConversationError::NotAMember => {
                AppError::NotFound(err.to_string())
            }
            ConversationError::MembershipFloor => AppError::Conflict(err.to_string()),
            ConversationError::InvalidInput(msg) => AppError::Validation(msg),
            ConversationError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// ConversationService implementation
pub struct ConversationServiceImpl<C>
where
    C: ConversationRepository,
{
    conversation_repo: Arc<C>,
}

impl<C> ConversationServiceImpl<C>
where
    C: ConversationRepository,
{
    pub fn new(conversation_repo: Arc<C>) -> Self {
        Self { conversation_repo }
    }

    async fn with_members(
        &self,
        conversation: Conversation,
    ) -> Result<ConversationWithMembers, ConversationError> {
        let members = self.conversation_repo.find_members(conversation.id).await?;
        Ok(ConversationWithMembers {
            conversation,
            members,
        })
    }
}

#[async_trait]
impl<C> ConversationService for ConversationServiceImpl<C>
where
    C: ConversationRepository + 'static,
{
    async fn start_conversation(
        &self,
        input: StartConversationDto,
    ) -> Result<StartedConversation, ConversationError> {
        let members = dedup_member_ids(&input.members);
        if members.is_empty() {
            return Err(ConversationError::InvalidInput(
                "members: at least one member is required".into(),
            ));
        }
        if input.is_group && members.len() < MIN_GROUP_MEMBERS {
            return Err(ConversationError::InvalidInput(format!(
                "A group conversation needs at least {} members",
                MIN_GROUP_MEMBERS
            )));
        }

        if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ConversationError::InvalidInput(
                "name: must not be blank".into(),
            ));
        }

        let conversation = Conversation::new(input.name, input.is_group);
        let created = self
            .conversation_repo
            .create_with_members(&conversation, &members)
            .await?;

        tracing::info!(
            conversation_id = %created.id,
            is_group = created.is_group,
            members = members.len(),
            "Conversation started"
        );

        Ok(StartedConversation {
            conversation: created,
            members_count: members.len(),
        })
    }

    async fn get_conversation(&self, id: Uuid) -> Result<ConversationWithMembers, ConversationError> {
        let conversation = self
            .conversation_repo
            .find_by_id(id)
            .await?
            .ok_or(ConversationError::NotFound)?;

        self.with_members(conversation).await
    }

    async fn list_user_conversations(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<ConversationPage, ConversationError> {
        let total = self.conversation_repo.count_for_member(user_id).await?;
        let rows = self
            .conversation_repo
            .list_for_member(user_id, page.limit, page.offset())
            .await?;

        let mut conversations = Vec::with_capacity(rows.len());
        for conversation in rows {
            conversations.push(self.with_members(conversation).await?);
        }

        let total_pages = (total + page.limit - 1) / page.limit;
        let has_next_page = page.page < total_pages;

        Ok(ConversationPage {
            conversations,
            current_page: page.page,
            next_page: if has_next_page { page.page + 1 } else { 0 },
            has_next_page,
        })
    }

    async fn add_member(&self, conversation_id: Uuid, user_id: Uuid) -> Result<(), ConversationError> {
        let inserted = self
            .conversation_repo
            .add_members(conversation_id, &[user_id])
            .await?
            .ok_or(ConversationError::NotFound)?;

        tracing::info!(%conversation_id, %user_id, inserted, "Member added");
        Ok(())
    }

    async fn remove_member(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), ConversationError> {
        match self
            .conversation_repo
            .remove_member(conversation_id, user_id, MEMBERSHIP_FLOOR)
            .await?
        {
            MemberRemoval::Removed => {
                tracing::info!(%conversation_id, %user_id, "Member removed");
                Ok(())
            }
            MemberRemoval::ConversationNotFound => Err(ConversationError::NotFound),
            MemberRemoval::NotAMember => Err(ConversationError::NotAMember),
            MemberRemoval::FloorReached { remaining } => {
                tracing::debug!(%conversation_id, remaining, "Member removal refused at floor");
                Err(ConversationError::MembershipFloor)
            }
        }
    }

    async fn delete_conversation(&self, id: Uuid) -> Result<(), ConversationError> {
        let deleted = self.conversation_repo.soft_delete(id).await?;
        if deleted {
            tracing::info!(conversation_id = %id, "Conversation deleted");
        } else {
            tracing::debug!(conversation_id = %id, "Delete of unknown conversation ignored");
        }
        Ok(())
    }
}
