//! Channel service
//!
//! Creation of server channels (owner only). DM channels are created by
//! the DM service.

use beacon_core::events::ChannelCreatedEvent;
use beacon_core::traits::{CategoryRepository, ChannelRepository};
use beacon_core::{Channel, ChannelType, DomainEvent, ServerAction, Snowflake};
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::{ChannelResponse, CreateChannelRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Channel service
pub struct ChannelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelService<'a> {
    /// Create a new ChannelService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a channel in a server (owner only)
    #[instrument(skip(self, request))]
    pub async fn create_channel(
        &self,
        actor: Snowflake,
        server_id: Snowflake,
        request: CreateChannelRequest,
    ) -> ServiceResult<ChannelResponse> {
        PermissionService::new(self.ctx)
            .require_server(actor, server_id, ServerAction::CreateChannel)
            .await?;

        let channel_type = ChannelType::parse(&request.channel_type)
            .filter(|t| !matches!(t, ChannelType::Dm))
            .ok_or_else(|| {
                ServiceError::validation(format!(
                    "invalid channel type: {}",
                    request.channel_type
                ))
            })?;

        let category_id = match request.category_id {
            Some(raw) => {
                let id: Snowflake = raw
                    .parse()
                    .map_err(|_| ServiceError::validation("invalid category_id"))?;
                let category = self
                    .ctx
                    .categories()
                    .find_by_id(id)
                    .await?
                    .filter(|c| c.server_id == server_id)
                    .ok_or_else(|| ServiceError::not_found("Category", raw))?;
                Some(category.id)
            }
            // Default to the server's first category when one exists
            None => self
                .ctx
                .categories()
                .find_by_server(server_id)
                .await?
                .first()
                .map(|c| c.id),
        };

        let channel = Channel::new_server_channel(
            self.ctx.generate_id(),
            server_id,
            category_id,
            channel_type,
            request.name,
            request.topic,
        );
        self.ctx.channels().create(&channel).await?;

        info!(channel_id = %channel.id, server_id = %server_id, "Channel created");

        self.ctx
            .bus()
            .publish(DomainEvent::ChannelCreated(ChannelCreatedEvent {
                channel_id: channel.id,
                server_id,
                timestamp: Utc::now(),
            }));

        Ok(ChannelResponse::from(&channel))
    }
}
