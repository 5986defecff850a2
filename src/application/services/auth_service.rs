//! Authentication Service
//!
//! Handles registration, credential checks and JWT issuance.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::domain::{Gender, User, UserRepository, UserStatus};
use crate::shared::error::AppError;
use crate::shared::password::{hash_password, verify_password};
use crate::shared::validation::parse_date_of_birth;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(&self, registration: RegistrationDto) -> Result<User, AuthError>;

    /// Authenticate by email or username and issue an access token
    async fn login(&self, credentials: LoginDto) -> Result<AuthToken, AuthError>;
}

/// Registration input, already shape-validated by the request schema
#[derive(Debug, Clone)]
pub struct RegistrationDto {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// `DD-MM-YYYY`
    pub date_of_birth: String,
    pub gender: Gender,
    pub mobile_number: String,
}

/// Login input; at least one of `email` / `username` must be present
#[derive(Debug, Clone, Default)]
pub struct LoginDto {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: String,
}

/// Issued access token
#[derive(Debug, Clone, Serialize)]
pub struct AuthToken {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Please provide username or email")]
    MissingIdentifier,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User account is banned")]
    AccountBanned,

    #[error("User account is inactive")]
    AccountInactive,

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Conflict(msg) => AuthError::AlreadyExists(msg),
            AppError::Validation(msg) => AuthError::InvalidInput(msg),
            e => AuthError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingIdentifier => AppError::Validation(err.to_string()),
            AuthError::InvalidInput(msg) => AppError::Validation(msg),
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid username, email or password".into())
            }
            AuthError::AccountBanned => AppError::Forbidden(err.to_string()),
            AuthError::AccountInactive => AppError::Unauthorized(err.to_string()),
            AuthError::AlreadyExists(msg) => AppError::Conflict(msg),
            AuthError::TokenExpired => AppError::Unauthorized("Token expired".into()),
            AuthError::InvalidToken => AppError::Unauthorized("Invalid token".into()),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Signs and verifies HS256 access tokens.
///
/// Built once at startup and shared between the login flow and the auth
/// middleware.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity: Duration,
}

impl TokenIssuer {
    pub fn new(settings: &JwtSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            validity: Duration::hours(settings.token_validity_hours),
        }
    }

    /// Issue a token whose subject is `user_id`
    pub fn issue(&self, user_id: Uuid) -> Result<AuthToken, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + self.validity).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AuthToken {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.validity.num_seconds(),
        })
    }

    /// Decode and validate a token, returning its claims
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;

        Ok(token_data.claims)
    }

    /// Validate a token and extract the user ID
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        let claims = self.decode(token)?;

        Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)
    }
}

/// AuthService implementation
pub struct AuthServiceImpl<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenIssuer>,
}

impl<U> AuthServiceImpl<U>
where
    U: UserRepository,
{
    /// Create a new AuthServiceImpl
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenIssuer>) -> Self {
        Self { user_repo, tokens }
    }

    /// Look up by email first, then by username.
    async fn find_login_user(
        &self,
        email: Option<&str>,
        username: Option<&str>,
    ) -> Result<Option<User>, AuthError> {
        if let Some(email) = email {
            if let Some(user) = self.user_repo.find_by_email(email).await? {
                return Ok(Some(user));
            }
        }

        if let Some(username) = username {
            if let Some(user) = self.user_repo.find_by_username(username).await? {
                return Ok(Some(user));
            }
        }

        Ok(None)
    }
}

#[async_trait]
impl<U> AuthService for AuthServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn register(&self, registration: RegistrationDto) -> Result<User, AuthError> {
        let date_of_birth = parse_date_of_birth(&registration.date_of_birth)?;

        let password_hash = hash_password(&registration.password)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: registration.username,
            email: registration.email,
            password_hash,
            first_name: registration.first_name,
            last_name: registration.last_name,
            date_of_birth,
            gender: registration.gender,
            mobile_number: registration.mobile_number,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
            ..User::default()
        };

        let created = self.user_repo.create(&user).await?;
        tracing::info!(user_id = %created.id, username = %created.username, "User registered");

        Ok(created)
    }

    async fn login(&self, credentials: LoginDto) -> Result<AuthToken, AuthError> {
        let email = credentials.email.as_deref().filter(|s| !s.is_empty());
        let username = credentials.username.as_deref().filter(|s| !s.is_empty());
        if email.is_none() && username.is_none() {
            return Err(AuthError::MissingIdentifier);
        }

        let user = self
            .find_login_user(email, username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Status is checked before the password so a banned account always
        // gets the banned error.
        match user.status {
            UserStatus::Banned => {
                tracing::warn!(user_id = %user.id, "Login attempt on banned account");
                return Err(AuthError::AccountBanned);
            }
            UserStatus::Inactive => {
                tracing::warn!(user_id = %user.id, "Login attempt on inactive account");
                return Err(AuthError::AccountInactive);
            }
            UserStatus::Active => {}
        }

        let password_ok = verify_password(&credentials.password, &user.password_hash)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        if !password_ok {
            tracing::warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id)?;

        self.user_repo.update_last_seen(user.id, Utc::now()).await?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(token)
    }
}
