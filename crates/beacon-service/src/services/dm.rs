//! DM service
//!
//! Lazy, idempotent creation of DM channels addressed by user pair.

use beacon_core::events::DmOpenedEvent;
use beacon_core::traits::{ChannelRepository, UserRepository};
use beacon_core::{Channel, DomainError, DomainEvent, Snowflake};
use tracing::{info, instrument};

use crate::dto::ChannelResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// DM service
pub struct DmService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DmService<'a> {
    /// Create a new DmService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Open the DM channel with another user, creating it lazily.
    /// Re-opening the same pair (from either side, including
    /// concurrently) returns the existing channel.
    #[instrument(skip(self))]
    pub async fn open_dm(
        &self,
        actor: Snowflake,
        target: Snowflake,
    ) -> ServiceResult<ChannelResponse> {
        if actor == target {
            return Err(ServiceError::validation("cannot open a DM with yourself"));
        }

        self.ctx
            .users()
            .find_by_id(target)
            .await?
            .ok_or(DomainError::UserNotFound(target))?;

        // The store resolves the race: first writer wins, everyone gets
        // the winner's channel. A speculative id is burned on the losing
        // side, which is fine.
        let candidate = Channel::new_dm(self.ctx.generate_id());
        let candidate_id = candidate.id;
        let channel = self.ctx.channels().open_dm(candidate, actor, target).await?;

        if channel.id == candidate_id {
            info!(channel_id = %channel.id, a = %actor, b = %target, "DM channel created");
            self.ctx
                .bus()
                .publish(DomainEvent::DmOpened(DmOpenedEvent::new(
                    channel.id,
                    (actor, target),
                )));
        }

        Ok(ChannelResponse::from(&channel))
    }

    /// List the actor's DM channels
    #[instrument(skip(self))]
    pub async fn list_dms(&self, actor: Snowflake) -> ServiceResult<Vec<ChannelResponse>> {
        let channels = self.ctx.channels().find_dms_by_user(actor).await?;
        Ok(channels.iter().map(ChannelResponse::from).collect())
    }
}
