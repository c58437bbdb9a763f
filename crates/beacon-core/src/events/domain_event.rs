//! Domain events - emitted when domain state changes
//!
//! Events form a closed set, exhaustively matched by the realtime
//! router. Each carries enough routing context (server id, channel id,
//! affected user ids) for the broadcaster to compute its recipient set
//! without loading additional state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// All possible domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    // Messages
    MessageCreated(MessageEvent),
    MessageEdited(MessageEvent),
    MessageDeleted(MessageDeletedEvent),

    // Reactions
    ReactionAdded(ReactionEvent),
    ReactionRemoved(ReactionEvent),

    // Membership
    MemberJoined(MemberEvent),
    MemberLeft(MemberEvent),

    // Servers and channels
    ServerUpdated(ServerUpdatedEvent),
    ChannelCreated(ChannelCreatedEvent),
    InviteCreated(InviteCreatedEvent),
    DmOpened(DmOpenedEvent),

    // Friend relationships
    FriendRequested(FriendLinkEvent),
    FriendAccepted(FriendLinkEvent),
    FriendRemoved(FriendLinkEvent),
}

impl DomainEvent {
    /// Get the event type name as sent over the wire
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::MessageCreated(_) => "MESSAGE_CREATED",
            Self::MessageEdited(_) => "MESSAGE_EDITED",
            Self::MessageDeleted(_) => "MESSAGE_DELETED",
            Self::ReactionAdded(_) => "REACTION_ADDED",
            Self::ReactionRemoved(_) => "REACTION_REMOVED",
            Self::MemberJoined(_) => "MEMBER_JOINED",
            Self::MemberLeft(_) => "MEMBER_LEFT",
            Self::ServerUpdated(_) => "SERVER_UPDATED",
            Self::ChannelCreated(_) => "CHANNEL_CREATED",
            Self::InviteCreated(_) => "INVITE_CREATED",
            Self::DmOpened(_) => "DM_OPENED",
            Self::FriendRequested(_) => "FRIEND_REQUESTED",
            Self::FriendAccepted(_) => "FRIEND_ACCEPTED",
            Self::FriendRemoved(_) => "FRIEND_REMOVED",
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::MessageCreated(e) | Self::MessageEdited(e) => e.timestamp,
            Self::MessageDeleted(e) => e.timestamp,
            Self::ReactionAdded(e) | Self::ReactionRemoved(e) => e.timestamp,
            Self::MemberJoined(e) | Self::MemberLeft(e) => e.timestamp,
            Self::ServerUpdated(e) => e.timestamp,
            Self::ChannelCreated(e) => e.timestamp,
            Self::InviteCreated(e) => e.timestamp,
            Self::DmOpened(e) => e.timestamp,
            Self::FriendRequested(e) | Self::FriendAccepted(e) | Self::FriendRemoved(e) => {
                e.timestamp
            }
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

/// Message created/edited. `server_id` is `None` for DM channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEvent {
    pub message_id: Snowflake,
    pub channel_id: Snowflake,
    pub server_id: Option<Snowflake>,
    pub author_id: Snowflake,
    pub content: String,
    pub edited_at: Option<DateTime<Utc>>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDeletedEvent {
    pub message_id: Snowflake,
    pub channel_id: Snowflake,
    pub server_id: Option<Snowflake>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionEvent {
    pub message_id: Snowflake,
    pub channel_id: Snowflake,
    pub server_id: Option<Snowflake>,
    pub user_id: Snowflake,
    pub emoji: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberEvent {
    pub server_id: Snowflake,
    pub user_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerUpdatedEvent {
    pub server_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelCreatedEvent {
    pub channel_id: Snowflake,
    pub server_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteCreatedEvent {
    pub code: String,
    pub server_id: Snowflake,
    pub created_by: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DmOpenedEvent {
    pub channel_id: Snowflake,
    pub participants: (Snowflake, Snowflake),
    pub timestamp: DateTime<Utc>,
}

/// Friend request lifecycle. Both parties receive these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendLinkEvent {
    pub requester_id: Snowflake,
    pub target_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Event Creation Helpers
// ============================================================================

impl MemberEvent {
    pub fn new(server_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            server_id,
            user_id,
            timestamp: Utc::now(),
        }
    }
}

impl FriendLinkEvent {
    pub fn new(requester_id: Snowflake, target_id: Snowflake) -> Self {
        Self {
            requester_id,
            target_id,
            timestamp: Utc::now(),
        }
    }
}

impl DmOpenedEvent {
    pub fn new(channel_id: Snowflake, participants: (Snowflake, Snowflake)) -> Self {
        Self {
            channel_id,
            participants,
            timestamp: Utc::now(),
        }
    }
}
