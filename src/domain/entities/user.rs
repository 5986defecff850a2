//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Account status matching the database VARCHAR column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Banned,
}

impl UserStatus {
    /// Convert from database string representation.
    ///
    /// Unknown values are treated as inactive so they can never log in.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "active" => Self::Active,
            "banned" => Self::Banned,
            _ => Self::Inactive,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Banned => "banned",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

/// Represents a registered account and its profile.
///
/// Maps to the `users` table:
/// - id: UUID PRIMARY KEY
/// - username: VARCHAR(50) NOT NULL, unique among non-deleted rows
/// - email: VARCHAR(255) NOT NULL, unique among non-deleted rows
/// - password_hash: VARCHAR(255) NOT NULL
/// - first_name / last_name: VARCHAR(50)
/// - date_of_birth: DATE
/// - gender: VARCHAR(12)
/// - mobile_number: VARCHAR(15)
/// - profile_photo_path / profile_photo_url: VARCHAR(1024) NULL
/// - is_staff / is_owner: BOOLEAN DEFAULT FALSE
/// - last_seen: TIMESTAMPTZ NULL
/// - status: VARCHAR(15) DEFAULT 'active'
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - deleted_at: TIMESTAMPTZ NULL (soft delete marker)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    pub username: String,

    pub email: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub first_name: String,

    pub last_name: String,

    pub date_of_birth: NaiveDate,

    pub gender: Gender,

    pub mobile_number: String,

    /// Storage path of the profile photo (internal)
    #[serde(skip_serializing)]
    pub profile_photo_path: Option<String>,

    /// Public URL of the profile photo
    pub profile_photo_url: Option<String>,

    pub is_staff: bool,

    pub is_owner: bool,

    /// Updated on every successful login
    pub last_seen: Option<DateTime<Utc>>,

    #[serde(default)]
    pub status: UserStatus,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check whether the row has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Default for User {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::nil(),
            username: String::new(),
            email: String::new(),
            password_hash: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            date_of_birth: NaiveDate::default(),
            gender: Gender::default(),
            mobile_number: String::new(),
            profile_photo_path: None,
            profile_photo_url: None,
            is_staff: false,
            is_owner: false,
            last_seen: None,
            status: UserStatus::default(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

/// Repository trait for User data access operations.
///
/// Every lookup ignores soft-deleted rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Find a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Insert a new user. Duplicate username/email yields `AppError::Conflict`.
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Persist every mutable profile field of an existing user.
    async fn update(&self, user: &User) -> Result<User, AppError>;

    /// Record the time of the latest successful login.
    async fn update_last_seen(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), AppError>;
}
