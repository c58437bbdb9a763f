//! Access rules - pure allow/deny evaluation
//!
//! The permission model is deliberately small: a server has exactly one
//! owner, everyone else is a plain member, and messages belong to their
//! author. Evaluation is a pure function over facts the caller has
//! already loaded; nothing here touches the store, and results are
//! never cached across requests (membership can change between them).

use serde::Serialize;

use super::Snowflake;

/// Why an action was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenyReason {
    #[error("actor is not a member of the server")]
    NotMember,
    #[error("actor is not the message author")]
    NotAuthor,
    #[error("actor is not the server owner")]
    NotOwner,
}

/// Actions scoped to a server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerAction {
    Update,
    Delete,
    CreateChannel,
    CreateInvite,
}

/// Actions scoped to a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelAction {
    Send,
    Read,
    React,
}

/// Actions scoped to a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageAction {
    Edit,
    Delete,
}

/// Facts about a server relevant to access decisions
#[derive(Debug, Clone, Copy)]
pub struct ServerFacts {
    pub owner_id: Snowflake,
    /// Whether the acting user currently holds a membership
    pub actor_is_member: bool,
}

/// Facts about a channel relevant to access decisions
///
/// Exactly one of `actor_is_member` (server channels) or
/// `dm_participants` (DM channels) is meaningful; a DM channel has no
/// server and a server channel has no participant pair.
#[derive(Debug, Clone, Copy)]
pub struct ChannelFacts {
    pub actor_is_member: bool,
    pub dm_participants: Option<(Snowflake, Snowflake)>,
}

/// Evaluate an action against a server
pub fn evaluate_server(
    actor: Snowflake,
    facts: ServerFacts,
    action: ServerAction,
) -> Result<(), DenyReason> {
    match action {
        ServerAction::Update | ServerAction::Delete | ServerAction::CreateChannel => {
            if facts.owner_id == actor {
                Ok(())
            } else {
                Err(DenyReason::NotOwner)
            }
        }
        ServerAction::CreateInvite => {
            if facts.actor_is_member || facts.owner_id == actor {
                Ok(())
            } else {
                Err(DenyReason::NotMember)
            }
        }
    }
}

/// Evaluate an action against a channel
pub fn evaluate_channel(
    actor: Snowflake,
    facts: ChannelFacts,
    action: ChannelAction,
) -> Result<(), DenyReason> {
    match action {
        // Send, read, and react all share the same gate: hold a
        // membership on the channel's server, or be one of the two DM
        // participants.
        ChannelAction::Send | ChannelAction::Read | ChannelAction::React => {
            if let Some((a, b)) = facts.dm_participants {
                if actor == a || actor == b {
                    return Ok(());
                }
                return Err(DenyReason::NotMember);
            }
            if facts.actor_is_member {
                Ok(())
            } else {
                Err(DenyReason::NotMember)
            }
        }
    }
}

/// Evaluate an action against a message
///
/// Authorship only: owning the server grants no override.
pub fn evaluate_message(
    actor: Snowflake,
    author_id: Snowflake,
    action: MessageAction,
) -> Result<(), DenyReason> {
    match action {
        MessageAction::Edit | MessageAction::Delete => {
            if actor == author_id {
                Ok(())
            } else {
                Err(DenyReason::NotAuthor)
            }
        }
    }
}
