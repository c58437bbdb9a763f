//! Reaction service
//!
//! Adding and removing emoji reactions. Reacting requires the same
//! permission as posting in the channel; re-reacting is a no-op.

use beacon_core::events::ReactionEvent;
use beacon_core::traits::{MessageRepository, ReactionRepository};
use beacon_core::{ChannelAction, DomainError, DomainEvent, Reaction, Snowflake};
use chrono::Utc;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Longest accepted emoji value (covers multi-codepoint sequences)
const MAX_EMOJI_LEN: usize = 32;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a reaction. Re-reacting with the same emoji is a silent
    /// no-op and emits nothing.
    #[instrument(skip(self))]
    pub async fn react(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        actor: Snowflake,
        emoji: &str,
    ) -> ServiceResult<()> {
        validate_emoji(emoji)?;

        let channel = PermissionService::new(self.ctx)
            .require_channel(actor, channel_id, ChannelAction::React)
            .await?;
        self.message_in_channel(channel_id, message_id).await?;

        let inserted = self
            .ctx
            .reactions()
            .add(&Reaction::new(message_id, actor, emoji.to_string()))
            .await?;

        if inserted {
            info!(message_id = %message_id, emoji = %emoji, "Reaction added");
            self.ctx
                .bus()
                .publish(DomainEvent::ReactionAdded(ReactionEvent {
                    message_id,
                    channel_id,
                    server_id: channel.server_id,
                    user_id: actor,
                    emoji: emoji.to_string(),
                    timestamp: Utc::now(),
                }));
        }
        Ok(())
    }

    /// Remove the actor's own reaction. Removing a reaction that isn't
    /// there is a no-op.
    #[instrument(skip(self))]
    pub async fn unreact(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        actor: Snowflake,
        emoji: &str,
    ) -> ServiceResult<()> {
        validate_emoji(emoji)?;

        let channel = PermissionService::new(self.ctx)
            .require_channel(actor, channel_id, ChannelAction::React)
            .await?;
        self.message_in_channel(channel_id, message_id).await?;

        let removed = self.ctx.reactions().remove(message_id, actor, emoji).await?;

        if removed {
            info!(message_id = %message_id, emoji = %emoji, "Reaction removed");
            self.ctx
                .bus()
                .publish(DomainEvent::ReactionRemoved(ReactionEvent {
                    message_id,
                    channel_id,
                    server_id: channel.server_id,
                    user_id: actor,
                    emoji: emoji.to_string(),
                    timestamp: Utc::now(),
                }));
        }
        Ok(())
    }

    async fn message_in_channel(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> ServiceResult<()> {
        self.ctx
            .messages()
            .find_by_id(message_id)
            .await?
            .filter(|m| m.channel_id == channel_id)
            .ok_or(DomainError::MessageNotFound(message_id))?;
        Ok(())
    }
}

fn validate_emoji(emoji: &str) -> ServiceResult<()> {
    if emoji.is_empty() || emoji.chars().count() > MAX_EMOJI_LEN {
        return Err(ServiceError::validation("invalid emoji"));
    }
    Ok(())
}
