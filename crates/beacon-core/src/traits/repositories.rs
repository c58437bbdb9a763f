//! Store traits (ports) - the interface the core expects from storage
//!
//! The domain layer defines what it needs; the storage layer provides
//! the implementation. Every method that creates a uniquely-keyed row
//! (membership pairs, DM pairs, friend pairs, email/tag) is specified
//! as an atomic conditional write: under concurrent calls exactly one
//! caller wins and the rest observe a conflict or the winner's row.

use async_trait::async_trait;

use crate::entities::{
    Category, Channel, FriendLink, Invite, Membership, Message, Reaction, Server, User,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for store operations
pub type StoreResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Find user by username and discriminator
    async fn find_by_tag(&self, username: &str, discriminator: &str) -> StoreResult<Option<User>>;

    /// Create a new user, enforcing email and username+tag uniqueness.
    /// Fails with `EmailAlreadyExists` or `TagAlreadyExists`.
    async fn create(&self, user: &User, password_hash: &str) -> StoreResult<()>;

    /// Update mutable profile fields of an existing user
    async fn update(&self, user: &User) -> StoreResult<()>;

    /// Get the password hash for authentication
    async fn password_hash(&self, id: Snowflake) -> StoreResult<Option<String>>;

    /// Next free discriminator for a username, or `InvalidUsername` when
    /// all tags are taken
    async fn next_discriminator(&self, username: &str) -> StoreResult<String>;
}

// ============================================================================
// Server Repository
// ============================================================================

#[async_trait]
pub trait ServerRepository: Send + Sync {
    /// Find server by ID
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Server>>;

    /// List all servers a user is a member of
    async fn find_by_member(&self, user_id: Snowflake) -> StoreResult<Vec<Server>>;

    /// Create a new server
    async fn create(&self, server: &Server) -> StoreResult<()>;

    /// Update an existing server
    async fn update(&self, server: &Server) -> StoreResult<()>;
}

// ============================================================================
// Category Repository
// ============================================================================

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find category by ID
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Category>>;

    /// List categories for a server, ordered by position
    async fn find_by_server(&self, server_id: Snowflake) -> StoreResult<Vec<Category>>;

    /// Create a new category
    async fn create(&self, category: &Category) -> StoreResult<()>;
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Find channel by ID
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Channel>>;

    /// List all channels in a server
    async fn find_by_server(&self, server_id: Snowflake) -> StoreResult<Vec<Channel>>;

    /// Create a new server channel
    async fn create(&self, channel: &Channel) -> StoreResult<()>;

    /// Find the DM channel for an unordered user pair
    async fn find_dm(&self, a: Snowflake, b: Snowflake) -> StoreResult<Option<Channel>>;

    /// Atomically look up or create the DM channel for an unordered
    /// pair. Under concurrent calls for the same pair, the first writer
    /// wins and every caller gets the same channel back.
    async fn open_dm(&self, channel: Channel, a: Snowflake, b: Snowflake) -> StoreResult<Channel>;

    /// Get the participant pair of a DM channel (None for server channels)
    async fn dm_participants(
        &self,
        channel_id: Snowflake,
    ) -> StoreResult<Option<(Snowflake, Snowflake)>>;

    /// List all DM channels a user participates in
    async fn find_dms_by_user(&self, user_id: Snowflake) -> StoreResult<Vec<Channel>>;
}

// ============================================================================
// Message Repository
// ============================================================================

/// Cursor options for message queries. Results are always ordered by
/// `(created_at, id)` ascending.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageQuery {
    /// Only messages strictly after this message (by sort key)
    pub after: Option<Snowflake>,
    /// Only messages strictly before this message (by sort key)
    pub before: Option<Snowflake>,
    pub limit: i64,
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Message>>;

    /// List messages in a channel with cursor pagination
    async fn find_by_channel(
        &self,
        channel_id: Snowflake,
        query: MessageQuery,
    ) -> StoreResult<Vec<Message>>;

    /// Append a new message to its channel's log
    async fn create(&self, message: &Message) -> StoreResult<()>;

    /// Replace message content (edit)
    async fn update(&self, message: &Message) -> StoreResult<()>;

    /// Hard-delete a message; it must never appear in subsequent reads.
    /// Returns false when the message did not exist.
    async fn delete(&self, id: Snowflake) -> StoreResult<bool>;
}

// ============================================================================
// Membership Repository
// ============================================================================

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Find membership by server and user ID
    async fn find(&self, server_id: Snowflake, user_id: Snowflake)
        -> StoreResult<Option<Membership>>;

    /// List all memberships of a server
    async fn find_by_server(&self, server_id: Snowflake) -> StoreResult<Vec<Membership>>;

    /// List all memberships of a user
    async fn find_by_user(&self, user_id: Snowflake) -> StoreResult<Vec<Membership>>;

    /// Check if a user is a member of a server
    async fn is_member(&self, server_id: Snowflake, user_id: Snowflake) -> StoreResult<bool>;

    /// Atomic conditional insert: fails with `AlreadyMember` if the
    /// pair already exists, including under concurrent calls.
    async fn create(&self, membership: &Membership) -> StoreResult<()>;

    /// Remove a membership. Returns false when no row existed.
    async fn delete(&self, server_id: Snowflake, user_id: Snowflake) -> StoreResult<bool>;
}

// ============================================================================
// Invite Repository
// ============================================================================

#[async_trait]
pub trait InviteRepository: Send + Sync {
    /// Find invite by code
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Invite>>;

    /// List invites for a server
    async fn find_by_server(&self, server_id: Snowflake) -> StoreResult<Vec<Invite>>;

    /// Create a new invite; fails with `InviteCodeExists` on collision
    async fn create(&self, invite: &Invite) -> StoreResult<()>;

    /// Increment the invite use counter
    async fn increment_uses(&self, code: &str) -> StoreResult<()>;

    /// Delete an invite
    async fn delete(&self, code: &str) -> StoreResult<()>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Add a reaction. Returns false when the same (user, emoji) row
    /// already existed; re-reacting is a no-op, not an error.
    async fn add(&self, reaction: &Reaction) -> StoreResult<bool>;

    /// Remove a reaction. Returns false when no row existed.
    async fn remove(&self, message_id: Snowflake, user_id: Snowflake, emoji: &str)
        -> StoreResult<bool>;

    /// All reactions on a message, in insertion order
    async fn find_by_message(&self, message_id: Snowflake) -> StoreResult<Vec<Reaction>>;

    /// Drop all reactions of a message (on message delete)
    async fn delete_by_message(&self, message_id: Snowflake) -> StoreResult<()>;
}

// ============================================================================
// Friend Repository
// ============================================================================

#[async_trait]
pub trait FriendRepository: Send + Sync {
    /// Find the link for an unordered user pair
    async fn find_pair(&self, a: Snowflake, b: Snowflake) -> StoreResult<Option<FriendLink>>;

    /// Atomic conditional insert keyed by the unordered pair. Fails with
    /// `AlreadyPending`/`AlreadyFriends` when a link already exists.
    async fn create(&self, link: &FriendLink) -> StoreResult<()>;

    /// Replace the stored link (state transition)
    async fn update(&self, link: &FriendLink) -> StoreResult<()>;

    /// Remove the link for an unordered pair. Returns false when no
    /// link existed (decline is no-op-safe).
    async fn delete_pair(&self, a: Snowflake, b: Snowflake) -> StoreResult<bool>;

    /// Every link touching a user
    async fn find_by_user(&self, user_id: Snowflake) -> StoreResult<Vec<FriendLink>>;
}
