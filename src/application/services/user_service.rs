//! User Service
//!
//! Profile lookup and partial profile updates.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Gender, User, UserRepository};
use crate::shared::error::AppError;
use crate::shared::password::hash_password;
use crate::shared::validation::parse_date_of_birth;

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, user_id: Uuid) -> Result<User, UserError>;

    /// Apply the supplied fields to the user's profile
    async fn update_user(&self, user_id: Uuid, update: UpdateUserDto) -> Result<User, UserError>;
}

/// Partial profile update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// `DD-MM-YYYY`
    pub date_of_birth: Option<String>,
    pub gender: Option<Gender>,
    pub mobile_number: Option<String>,
}

impl UpdateUserDto {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.date_of_birth.is_none()
            && self.gender.is_none()
            && self.mobile_number.is_none()
    }
}

/// User service errors
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for UserError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(_) => UserError::NotFound,
            AppError::Conflict(msg) => UserError::AlreadyExists(msg),
            AppError::Validation(msg) => UserError::InvalidInput(msg),
            e => UserError::Internal(e.to_string()),
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound => AppError::NotFound("User not found".into()),
            UserError::AlreadyExists(msg) => AppError::Conflict(msg),
            UserError::InvalidInput(msg) => AppError::Validation(msg),
            UserError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// UserService implementation
pub struct UserServiceImpl<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UserServiceImpl<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<U> UserService for UserServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn get_user(&self, user_id: Uuid) -> Result<User, UserError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)
    }

    async fn update_user(&self, user_id: Uuid, update: UpdateUserDto) -> Result<User, UserError> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)?;

        if update.is_empty() {
            return Ok(user);
        }

        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(password) = update.password {
            user.password_hash =
                hash_password(&password).map_err(|e| UserError::Internal(e.to_string()))?;
        }
        if let Some(first_name) = update.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name;
        }
        if let Some(date_of_birth) = update.date_of_birth {
            user.date_of_birth = parse_date_of_birth(&date_of_birth)?;
        }
        if let Some(gender) = update.gender {
            user.gender = gender;
        }
        if let Some(mobile_number) = update.mobile_number {
            user.mobile_number = mobile_number;
        }
        user.updated_at = Utc::now();

        let updated = self.user_repo.update(&user).await?;
        tracing::info!(user_id = %updated.id, "User profile updated");

        Ok(updated)
    }
}
