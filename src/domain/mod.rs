//! # Domain Layer
//!
//! Core entities of the service and the repository contracts used to load and
//! store them. Nothing here depends on HTTP or on a specific database driver.
//!
//! ## Structure
//!
//! - **entities**: User, Conversation, ConversationMember and their repository traits
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Soft-deleted rows are invisible through every repository read

pub mod entities;

// Re-export commonly used types
pub use entities::*;
