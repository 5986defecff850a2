//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{
    LoginRequest, PaginationParams, RegisterRequest, StartConversationRequest, UpdateUserRequest,
};
pub use response::{
    ConversationResponse, ConversationWithMembersResponse, PaginatedConversationsResponse,
    StartConversationResponse, TokenResponse, UserResponse,
};
