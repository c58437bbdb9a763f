//! Channel entity - an ordered message log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Channel type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    /// Server text channel
    #[default]
    Text,
    /// Server voice channel
    Voice,
    /// Direct message between two users
    Dm,
}

impl ChannelType {
    /// Parse from the wire representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "voice" => Some(Self::Voice),
            "dm" => Some(Self::Dm),
            _ => None,
        }
    }

    /// Wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Voice => "voice",
            Self::Dm => "dm",
        }
    }
}

/// Channel entity
///
/// Server channels carry a `server_id` and usually a `category_id`;
/// DM channels carry neither and are addressed by their participant
/// pair instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: Snowflake,
    pub server_id: Option<Snowflake>,
    pub category_id: Option<Snowflake>,
    pub channel_type: ChannelType,
    pub name: Option<String>,
    pub topic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Channel {
    /// Create a new server channel of the given type
    #[must_use]
    pub fn new_server_channel(
        id: Snowflake,
        server_id: Snowflake,
        category_id: Option<Snowflake>,
        channel_type: ChannelType,
        name: String,
        topic: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            server_id: Some(server_id),
            category_id,
            channel_type,
            name: Some(name),
            topic,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new DM channel
    #[must_use]
    pub fn new_dm(id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            server_id: None,
            category_id: None,
            channel_type: ChannelType::Dm,
            name: None,
            topic: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this is a DM channel
    #[inline]
    #[must_use]
    pub fn is_dm(&self) -> bool {
        matches!(self.channel_type, ChannelType::Dm)
    }

    /// Check if this channel belongs to a server
    #[inline]
    #[must_use]
    pub fn is_server_channel(&self) -> bool {
        self.server_id.is_some()
    }

    /// Get display name (channel name or fallback for DMs)
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Direct Message")
    }
}
