//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.
//! Maps between the database schema and domain User entity.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Gender, User, UserRepository, UserStatus};
use crate::shared::error::AppError;

/// Column list shared by every query that materializes a [`User`].
pub(crate) const USER_COLUMNS: &str = "u.id, u.username, u.email, u.password_hash, \
    u.first_name, u.last_name, u.date_of_birth, u.gender, u.mobile_number, \
    u.profile_photo_path, u.profile_photo_url, u.is_staff, u.is_owner, u.last_seen, \
    u.status, u.created_at, u.updated_at, u.deleted_at";

/// Database row representation of the users table.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    date_of_birth: NaiveDate,
    gender: String,
    mobile_number: String,
    profile_photo_path: Option<String>,
    profile_photo_url: Option<String>,
    is_staff: bool,
    is_owner: bool,
    last_seen: Option<DateTime<Utc>>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl UserRow {
    /// Convert database row to domain User entity.
    pub(crate) fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            gender: Gender::from_str(&self.gender),
            mobile_number: self.mobile_number,
            profile_photo_path: self.profile_photo_path,
            profile_photo_url: self.profile_photo_url,
            is_staff: self.is_staff,
            is_owner: self.is_owner,
            last_seen: self.last_seen,
            status: UserStatus::from_str(&self.status),
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}

fn map_write_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("User with this email or username already exists".to_string())
        }
        _ => AppError::Database(e),
    }
}

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one_by(&self, column: &str, value: &str) -> Result<Option<User>, AppError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users u WHERE u.{column} = $1 AND u.deleted_at IS NULL"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.id = $1 AND u.deleted_at IS NULL");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.find_one_by("email", email).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.find_one_by("username", username).await
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let sql = format!(
            r#"
            WITH u AS (
                INSERT INTO users (id, username, email, password_hash, first_name, last_name,
                                   date_of_birth, gender, mobile_number, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
            )
            SELECT {USER_COLUMNS} FROM u
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.date_of_birth)
            .bind(user.gender.as_str())
            .bind(&user.mobile_number)
            .bind(user.status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(row.into_user())
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let sql = format!(
            r#"
            WITH u AS (
                UPDATE users
                SET username = $2,
                    email = $3,
                    password_hash = $4,
                    first_name = $5,
                    last_name = $6,
                    date_of_birth = $7,
                    gender = $8,
                    mobile_number = $9,
                    updated_at = NOW()
                WHERE id = $1 AND deleted_at IS NULL
                RETURNING *
            )
            SELECT {USER_COLUMNS} FROM u
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.date_of_birth)
            .bind(user.gender.as_str())
            .bind(&user.mobile_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", user.id)))?;

        Ok(row.into_user())
    }

    async fn update_last_seen(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET last_seen = $2 WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
