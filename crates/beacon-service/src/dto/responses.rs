//! Response DTOs
//!
//! Serialized views of domain entities. Ids are rendered as strings for
//! JSON safety; entity-to-response mapping lives next to each type.

use beacon_core::{
    Category, Channel, FriendStatus, Invite, Membership, Message, ReactionCount, Server,
    Snowflake, User,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Public view of a user
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub discriminator: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            discriminator: user.discriminator.clone(),
            display_name: user.display_name.clone(),
            about: user.about.clone(),
            created_at: user.created_at,
        }
    }
}

/// Registration/login result: the user plus a bearer token
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Flat view of a server
#[derive(Debug, Clone, Serialize)]
pub struct ServerResponse {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Server> for ServerResponse {
    fn from(server: &Server) -> Self {
        Self {
            id: server.id.to_string(),
            name: server.name.clone(),
            owner_id: server.owner_id.to_string(),
            created_at: server.created_at,
        }
    }
}

/// View of a channel
#[derive(Debug, Clone, Serialize)]
pub struct ChannelResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(rename = "type")]
    pub channel_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Channel> for ChannelResponse {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id.to_string(),
            server_id: channel.server_id.map(|id| id.to_string()),
            category_id: channel.category_id.map(|id| id.to_string()),
            channel_type: channel.channel_type.as_str(),
            name: channel.name.clone(),
            topic: channel.topic.clone(),
            created_at: channel.created_at,
        }
    }
}

/// A category together with its channels, ordered by position
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithChannels {
    pub id: String,
    pub name: String,
    pub position: i32,
    pub channels: Vec<ChannelResponse>,
}

impl CategoryWithChannels {
    pub fn new(category: &Category, channels: Vec<ChannelResponse>) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            position: category.position,
            channels,
        }
    }
}

/// A server with its categories → channels tree
#[derive(Debug, Clone, Serialize)]
pub struct ServerTreeResponse {
    #[serde(flatten)]
    pub server: ServerResponse,
    pub categories: Vec<CategoryWithChannels>,
    /// Channels that sit outside any category
    pub orphan_channels: Vec<ChannelResponse>,
}

/// Membership row joined with its user
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub user: UserResponse,
    pub joined_at: DateTime<Utc>,
    pub is_owner: bool,
}

impl MemberResponse {
    pub fn new(membership: &Membership, user: &User, owner_id: Snowflake) -> Self {
        Self {
            user: UserResponse::from(user),
            joined_at: membership.joined_at,
            is_owner: membership.user_id == owner_id,
        }
    }
}

/// Full invite view, returned to the creator
#[derive(Debug, Clone, Serialize)]
pub struct InviteResponse {
    pub code: String,
    pub server_id: String,
    pub created_by: String,
    pub uses: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&Invite> for InviteResponse {
    fn from(invite: &Invite) -> Self {
        Self {
            code: invite.code.clone(),
            server_id: invite.server_id.to_string(),
            created_by: invite.created_by.to_string(),
            uses: invite.uses,
            max_uses: invite.max_uses,
            expires_at: invite.expires_at,
            created_at: invite.created_at,
        }
    }
}

/// What a non-member sees when looking up an invite code
#[derive(Debug, Clone, Serialize)]
pub struct InviteSummaryResponse {
    pub code: String,
    pub server_id: String,
    pub server_name: String,
    pub member_count: usize,
}

/// Per-emoji reaction group on a message
#[derive(Debug, Clone, Serialize)]
pub struct ReactionGroupResponse {
    pub emoji: String,
    pub count: usize,
    pub user_ids: Vec<String>,
    pub me: bool,
}

impl From<&ReactionCount> for ReactionGroupResponse {
    fn from(count: &ReactionCount) -> Self {
        Self {
            emoji: count.emoji.clone(),
            count: count.user_ids.len(),
            user_ids: count.user_ids.iter().map(ToString::to_string).collect(),
            me: count.me,
        }
    }
}

/// Full message view with author and reactions
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub channel_id: String,
    pub author: UserResponse,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    pub reactions: Vec<ReactionGroupResponse>,
}

impl MessageResponse {
    pub fn new(message: &Message, author: &User, reactions: Vec<ReactionGroupResponse>) -> Self {
        Self {
            id: message.id.to_string(),
            channel_id: message.channel_id.to_string(),
            author: UserResponse::from(author),
            content: message.content.clone(),
            created_at: message.created_at,
            edited_at: message.edited_at,
            reactions,
        }
    }
}

/// One entry in a user's friend list
#[derive(Debug, Clone, Serialize)]
pub struct FriendEntryResponse {
    pub user: UserResponse,
    pub status: FriendStatus,
}
