//! Reaction entity - an emoji reaction on a message

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Reaction entity
///
/// One row per (message, user, emoji); re-reacting with the same emoji
/// is a no-op at the store level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub message_id: Snowflake,
    pub user_id: Snowflake,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(message_id: Snowflake, user_id: Snowflake, emoji: String) -> Self {
        Self {
            message_id,
            user_id,
            emoji,
            created_at: Utc::now(),
        }
    }
}

/// Aggregated per-emoji reaction view: the emoji, the set of reacting
/// users, and whether the requesting user is among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionCount {
    pub emoji: String,
    pub user_ids: Vec<Snowflake>,
    pub me: bool,
}

impl ReactionCount {
    /// Aggregate raw reaction rows into per-emoji groups, preserving
    /// first-seen emoji order.
    pub fn aggregate(reactions: &[Reaction], viewer: Snowflake) -> Vec<Self> {
        let mut groups: Vec<ReactionCount> = Vec::new();
        for reaction in reactions {
            match groups.iter_mut().find(|g| g.emoji == reaction.emoji) {
                Some(group) => {
                    group.user_ids.push(reaction.user_id);
                    group.me |= reaction.user_id == viewer;
                }
                None => groups.push(ReactionCount {
                    emoji: reaction.emoji.clone(),
                    user_ids: vec![reaction.user_id],
                    me: reaction.user_id == viewer,
                }),
            }
        }
        groups
    }
}
