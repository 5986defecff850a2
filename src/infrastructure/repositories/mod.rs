//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **UserRepository** - User accounts and profiles
//! - **ConversationRepository** - Conversations and their membership
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use banter::infrastructure::repositories::{PgConversationRepository, PgUserRepository};
//!
//! fn setup_repositories(pool: PgPool) {
//!     let user_repo = PgUserRepository::new(pool.clone());
//!     let conversation_repo = PgConversationRepository::new(pool);
//! }
//! ```

pub mod conversation_repository;
pub mod user_repository;

pub use conversation_repository::PgConversationRepository;
pub use user_repository::PgUserRepository;
