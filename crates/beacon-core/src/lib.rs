//! # beacon-core
//!
//! Domain layer containing entities, value objects, store traits, and domain events.
//! This crate has zero dependencies on infrastructure (web framework, runtime, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Category, Channel, ChannelType, FriendLink, FriendState, FriendStatus, Invite, Membership,
    Message, Reaction, ReactionCount, Server, User, generate_invite_code, MAX_MESSAGE_LEN,
};
pub use error::DomainError;
pub use events::DomainEvent;
pub use traits::{
    CategoryRepository, ChannelRepository, FriendRepository, InviteRepository,
    MembershipRepository, MessageQuery, MessageRepository, ReactionRepository, ServerRepository,
    StoreResult, UserRepository,
};
pub use value_objects::{
    evaluate_channel, evaluate_message, evaluate_server, ChannelAction, ChannelFacts, DenyReason,
    MessageAction, ServerAction, ServerFacts, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};
