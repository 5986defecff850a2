//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;

use crate::application::services::{
    LoginDto, PageRequest, RegistrationDto, StartConversationDto, UpdateUserDto,
};
use crate::domain::Gender;
use crate::shared::validation::{
    validate_alphabetic, validate_alphanumeric, validate_date_of_birth, validate_gender,
    validate_mobile_number,
};

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 1, max = 50, message = "Username must be 1-50 characters"),
        custom(function = "validate_alphanumeric")
    )]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 32, message = "Password must be 8-32 characters"))]
    pub password: String,

    #[validate(
        length(min = 2, max = 50, message = "First name must be 2-50 characters"),
        custom(function = "validate_alphabetic")
    )]
    pub first_name: String,

    #[validate(
        length(min = 2, max = 50, message = "Last name must be 2-50 characters"),
        custom(function = "validate_alphabetic")
    )]
    pub last_name: String,

    /// `DD-MM-YYYY`
    #[validate(custom(function = "validate_date_of_birth"))]
    pub date_of_birth: String,

    #[validate(custom(function = "validate_gender"))]
    pub gender: String,

    #[validate(custom(function = "validate_mobile_number"))]
    pub mobile_number: String,
}

impl From<RegisterRequest> for RegistrationDto {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            date_of_birth: req.date_of_birth,
            gender: Gender::from_str(&req.gender),
            mobile_number: req.mobile_number,
        }
    }
}

/// Empty or whitespace-only strings deserialize as absent.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Login request; either `email` or `username` identifies the account
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub username: Option<String>,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl From<LoginRequest> for LoginDto {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            username: req.username,
            password: req.password,
        }
    }
}

/// Update user request; every field is optional
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(
        length(min = 1, max = 50, message = "Username must be 1-50 characters"),
        custom(function = "validate_alphanumeric")
    )]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 32, message = "Password must be 8-32 characters"))]
    pub password: Option<String>,

    #[validate(
        length(min = 2, max = 50, message = "First name must be 2-50 characters"),
        custom(function = "validate_alphabetic")
    )]
    pub first_name: Option<String>,

    #[validate(
        length(min = 2, max = 50, message = "Last name must be 2-50 characters"),
        custom(function = "validate_alphabetic")
    )]
    pub last_name: Option<String>,

    pub date_of_birth: Option<String>,

    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,

    #[validate(custom(function = "validate_mobile_number"))]
    pub mobile_number: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUserDto {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            date_of_birth: req.date_of_birth,
            gender: req.gender.as_deref().map(Gender::from_str),
            mobile_number: req.mobile_number,
        }
    }
}

/// Start conversation request
#[derive(Debug, Deserialize, Validate)]
pub struct StartConversationRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[serde(default)]
    pub is_group: bool,

    #[validate(length(min = 1, max = 1024, message = "At least one member is required"))]
    pub members: Vec<Uuid>,
}

impl From<StartConversationRequest> for StartConversationDto {
    fn from(req: StartConversationRequest) -> Self {
        Self {
            name: req.name,
            is_group: req.is_group,
            members: req.members,
        }
    }
}

/// Pagination query parameters.
///
/// Kept as raw strings so malformed values fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl From<PaginationParams> for PageRequest {
    fn from(params: PaginationParams) -> Self {
        PageRequest::new(
            params.page.and_then(|p| p.trim().parse().ok()),
            params.limit.and_then(|l| l.trim().parse().ok()),
        )
    }
}
