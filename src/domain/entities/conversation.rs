//! Conversation and ConversationMember entities and repository trait.
//!
//! Maps to the `conversations` and `conversation_members` tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;
use crate::shared::error::AppError;

/// A group conversation must be started with at least this many members.
pub const MIN_GROUP_MEMBERS: usize = 3;

/// A conversation never drops below this many members.
pub const MEMBERSHIP_FLOOR: i64 = 2;

/// A direct or group chat container.
///
/// Maps to the `conversations` table:
/// - id: UUID PRIMARY KEY
/// - name: VARCHAR(100) NULL (meaningful for groups)
/// - is_group: BOOLEAN NOT NULL DEFAULT FALSE
/// - group_photo_path / group_photo_url: VARCHAR(1024) NULL
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - deleted_at: TIMESTAMPTZ NULL (soft delete marker)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    pub id: Uuid,
    pub name: Option<String>,
    pub is_group: bool,
    #[serde(skip_serializing)]
    pub group_photo_path: Option<String>,
    pub group_photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Conversation {
    /// Create a new, not yet persisted conversation.
    pub fn new(name: Option<String>, is_group: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            is_group,
            group_photo_path: None,
            group_photo_url: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Join row linking a conversation to one of its members.
///
/// Maps to the `conversation_members` table:
/// - id: UUID PRIMARY KEY
/// - conversation_id: UUID NOT NULL REFERENCES conversations(id)
/// - member_id: UUID NOT NULL REFERENCES users(id)
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - deleted_at: TIMESTAMPTZ NULL
///
/// At most one non-deleted row exists per (conversation_id, member_id).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationMember {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub member_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ConversationMember {
    pub fn new(conversation_id: Uuid, member_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            member_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

/// A conversation together with the users currently in it.
#[derive(Debug, Clone)]
pub struct ConversationWithMembers {
    pub conversation: Conversation,
    pub members: Vec<User>,
}

/// Outcome of a guarded member removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRemoval {
    Removed,
    ConversationNotFound,
    NotAMember,
    /// Removal refused; the conversation holds `remaining` members.
    FloorReached { remaining: i64 },
}

/// Remove `member_id` ids that appear more than once, keeping first occurrences.
pub fn dedup_member_ids(member_ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = std::collections::HashSet::with_capacity(member_ids.len());
    member_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Repository trait for conversation and membership data access.
///
/// Every read ignores soft-deleted conversations and memberships.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Insert a conversation and one membership row per member id, atomically.
    async fn create_with_members(
        &self,
        conversation: &Conversation,
        member_ids: &[Uuid],
    ) -> Result<Conversation, AppError>;

    /// Find a conversation by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Conversation>, AppError>;

    /// Users holding an active membership in the conversation.
    async fn find_members(&self, conversation_id: Uuid) -> Result<Vec<User>, AppError>;

    /// Number of conversations the user is an active member of.
    async fn count_for_member(&self, user_id: Uuid) -> Result<i64, AppError>;

    /// One page of the user's conversations, newest first.
    async fn list_for_member(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Conversation>, AppError>;

    /// Add memberships, skipping users that are already active members.
    ///
    /// Returns the number of rows inserted, or `None` when no live
    /// conversation has that id. The existence check and the insert are atomic.
    async fn add_members(
        &self,
        conversation_id: Uuid,
        member_ids: &[Uuid],
    ) -> Result<Option<u64>, AppError>;

    /// Remove one membership unless the conversation is at or below `floor`.
    ///
    /// The count and the delete happen atomically.
    async fn remove_member(
        &self,
        conversation_id: Uuid,
        member_id: Uuid,
        floor: i64,
    ) -> Result<MemberRemoval, AppError>;

    /// Soft-delete a conversation and all of its memberships atomically.
    ///
    /// Returns `false` when no live conversation had that id.
    async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError>;
}
