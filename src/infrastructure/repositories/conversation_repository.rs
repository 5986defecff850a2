//! Conversation Repository Implementation
//!
//! PostgreSQL implementation of the ConversationRepository trait. Membership
//! rows live in `conversation_members`; both tables are soft-deleted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::user_repository::{UserRow, USER_COLUMNS};
use crate::domain::{Conversation, ConversationRepository, MemberRemoval, User};
use crate::shared::error::AppError;

const CONVERSATION_COLUMNS: &str = "c.id, c.name, c.is_group, c.group_photo_path, \
    c.group_photo_url, c.created_at, c.updated_at, c.deleted_at";

/// Database row representation of the conversations table.
#[derive(Debug, sqlx::FromRow)]
struct ConversationRow {
    id: Uuid,
    name: Option<String>,
    is_group: bool,
    group_photo_path: Option<String>,
    group_photo_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl ConversationRow {
    fn into_conversation(self) -> Conversation {
        Conversation {
            id: self.id,
            name: self.name,
            is_group: self.is_group,
            group_photo_path: self.group_photo_path,
            group_photo_url: self.group_photo_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}

/// Unknown member or conversation ids surface as foreign key violations.
fn map_membership_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::Validation("One or more members do not exist".to_string())
        }
        _ => AppError::Database(e),
    }
}

/// PostgreSQL conversation repository implementation.
#[derive(Clone)]
pub struct PgConversationRepository {
    pool: PgPool,
}

impl PgConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    async fn create_with_members(
        &self,
        conversation: &Conversation,
        member_ids: &[Uuid],
    ) -> Result<Conversation, AppError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r#"
            WITH c AS (
                INSERT INTO conversations (id, name, is_group, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $4)
                RETURNING *
            )
            SELECT {CONVERSATION_COLUMNS} FROM c
            "#
        );
        let row = sqlx::query_as::<_, ConversationRow>(&sql)
            .bind(conversation.id)
            .bind(&conversation.name)
            .bind(conversation.is_group)
            .bind(conversation.created_at)
            .fetch_one(&mut *tx)
            .await?;

        let row_ids: Vec<Uuid> = member_ids.iter().map(|_| Uuid::new_v4()).collect();
        sqlx::query(
            r#"
            INSERT INTO conversation_members (id, conversation_id, member_id)
            SELECT m.id, $1, m.member_id
            FROM UNNEST($2::uuid[], $3::uuid[]) AS m(id, member_id)
            "#,
        )
        .bind(conversation.id)
        .bind(&row_ids)
        .bind(member_ids)
        .execute(&mut *tx)
        .await
        .map_err(map_membership_error)?;

        tx.commit().await?;

        Ok(row.into_conversation())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Conversation>, AppError> {
        let sql = format!(
            "SELECT {CONVERSATION_COLUMNS} FROM conversations c \
             WHERE c.id = $1 AND c.deleted_at IS NULL"
        );
        let row = sqlx::query_as::<_, ConversationRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ConversationRow::into_conversation))
    }

    async fn find_members(&self, conversation_id: Uuid) -> Result<Vec<User>, AppError> {
        let sql = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM conversation_members cm
            JOIN users u ON u.id = cm.member_id
            WHERE cm.conversation_id = $1
              AND cm.deleted_at IS NULL
              AND u.deleted_at IS NULL
            ORDER BY cm.created_at, u.id
            "#
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(conversation_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }

    async fn count_for_member(&self, user_id: Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM conversations c
            JOIN conversation_members cm ON cm.conversation_id = c.id
            WHERE cm.member_id = $1
              AND cm.deleted_at IS NULL
              AND c.deleted_at IS NULL
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn list_for_member(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Conversation>, AppError> {
        let sql = format!(
            r#"
            SELECT {CONVERSATION_COLUMNS}
            FROM conversations c
            JOIN conversation_members cm ON cm.conversation_id = c.id
            WHERE cm.member_id = $1
              AND cm.deleted_at IS NULL
              AND c.deleted_at IS NULL
            ORDER BY c.created_at DESC, c.id
            LIMIT $2 OFFSET $3
            "#
        );
        let rows = sqlx::query_as::<_, ConversationRow>(&sql)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ConversationRow::into_conversation).collect())
    }

    async fn add_members(
        &self,
        conversation_id: Uuid,
        member_ids: &[Uuid],
    ) -> Result<Option<u64>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Shared lock blocks a concurrent soft delete until the insert commits.
        let live = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM conversations WHERE id = $1 AND deleted_at IS NULL FOR SHARE",
        )
        .bind(conversation_id)
        .fetch_optional(&mut *tx)
        .await?;
        if live.is_none() {
            return Ok(None);
        }

        let row_ids: Vec<Uuid> = member_ids.iter().map(|_| Uuid::new_v4()).collect();
        let result = sqlx::query(
            r#"
            INSERT INTO conversation_members (id, conversation_id, member_id)
            SELECT m.id, $1, m.member_id
            FROM UNNEST($2::uuid[], $3::uuid[]) AS m(id, member_id)
            ON CONFLICT (conversation_id, member_id) WHERE deleted_at IS NULL DO NOTHING
            "#,
        )
        .bind(conversation_id)
        .bind(&row_ids)
        .bind(member_ids)
        .execute(&mut *tx)
        .await
        .map_err(map_membership_error)?;

        tx.commit().await?;
        Ok(Some(result.rows_affected()))
    }

    async fn remove_member(
        &self,
        conversation_id: Uuid,
        member_id: Uuid,
        floor: i64,
    ) -> Result<MemberRemoval, AppError> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent removals from the same conversation.
        let locked = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM conversations WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(conversation_id)
        .fetch_optional(&mut *tx)
        .await?;
        if locked.is_none() {
            return Ok(MemberRemoval::ConversationNotFound);
        }

        let remaining = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM conversation_members \
             WHERE conversation_id = $1 AND deleted_at IS NULL",
        )
        .bind(conversation_id)
        .fetch_one(&mut *tx)
        .await?;
        if remaining <= floor {
            return Ok(MemberRemoval::FloorReached { remaining });
        }

        let result = sqlx::query(
            r#"
            UPDATE conversation_members
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE conversation_id = $1 AND member_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(conversation_id)
        .bind(member_id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(MemberRemoval::NotAMember);
        }

        tx.commit().await?;
        Ok(MemberRemoval::Removed)
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE conversations SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            "UPDATE conversation_members SET deleted_at = NOW(), updated_at = NOW() \
             WHERE conversation_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}
