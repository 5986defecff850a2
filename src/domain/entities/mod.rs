//! # Domain Entities
//!
//! Core domain entities. All entities map directly to their database tables.
//!
//! - **User**: account credentials, profile and status
//! - **Conversation**: a direct or group chat container
//! - **ConversationMember**: a user's membership in a conversation
//!
//! ## Repository Traits
//!
//! Each aggregate has an associated repository trait defining data access
//! operations. These traits are implemented in the infrastructure layer.

mod conversation;
mod user;

// Re-export User entity and related types
pub use user::{Gender, User, UserRepository, UserStatus};

#[cfg(test)]
pub use user::MockUserRepository;

// Re-export Conversation entities and related types
pub use conversation::{
    dedup_member_ids, Conversation, ConversationMember, ConversationRepository,
    ConversationWithMembers, MemberRemoval, MEMBERSHIP_FLOOR, MIN_GROUP_MEMBERS,
};
