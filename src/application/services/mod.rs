//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Registration, login, JWT issuance
//! - **UserService**: User profile lookup and updates
//! - **ConversationService**: Conversations and their membership

pub mod auth_service;
pub mod conversation_service;
pub mod user_service;


// Re-export auth service types
pub use auth_service::{
    AuthError, AuthService, AuthServiceImpl, AuthToken, Claims, LoginDto, RegistrationDto,
    TokenIssuer,
};

// Re-export user service types
pub use user_service::{UpdateUserDto, UserError, UserService, UserServiceImpl};

// Re-export conversation service types
pub use conversation_service::{
    ConversationError, ConversationPage, ConversationService, ConversationServiceImpl,
    PageRequest, StartConversationDto, StartedConversation, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
