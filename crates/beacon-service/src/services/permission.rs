//! Permission service
//!
//! Thin front-end over the pure access rules in `beacon-core`: loads
//! the facts (ownership, membership, DM participants, authorship) from
//! the store, evaluates, and converts denials into typed errors. Facts
//! are loaded fresh on every call; nothing is cached across requests.

use beacon_core::traits::{ChannelRepository, MembershipRepository, ServerRepository};
use beacon_core::{
    evaluate_channel, evaluate_message, evaluate_server, Channel, ChannelAction, ChannelFacts,
    DomainError, Message, MessageAction, Server, ServerAction, ServerFacts, Snowflake,
};
use tracing::instrument;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Permission service for access control
pub struct PermissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PermissionService<'a> {
    /// Create a new PermissionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load a server and evaluate an action against it.
    /// Returns the server so callers don't re-fetch it.
    #[instrument(skip(self))]
    pub async fn require_server(
        &self,
        actor: Snowflake,
        server_id: Snowflake,
        action: ServerAction,
    ) -> ServiceResult<Server> {
        let server = self
            .ctx
            .servers()
            .find_by_id(server_id)
            .await?
            .ok_or(DomainError::ServerNotFound(server_id))?;

        let facts = ServerFacts {
            owner_id: server.owner_id,
            actor_is_member: self.ctx.memberships().is_member(server_id, actor).await?,
        };
        evaluate_server(actor, facts, action).map_err(DomainError::from)?;
        Ok(server)
    }

    /// Load a channel and evaluate an action against it.
    /// Returns the channel so callers don't re-fetch it.
    #[instrument(skip(self))]
    pub async fn require_channel(
        &self,
        actor: Snowflake,
        channel_id: Snowflake,
        action: ChannelAction,
    ) -> ServiceResult<Channel> {
        let channel = self
            .ctx
            .channels()
            .find_by_id(channel_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;

        let facts = match channel.server_id {
            Some(server_id) => ChannelFacts {
                actor_is_member: self.ctx.memberships().is_member(server_id, actor).await?,
                dm_participants: None,
            },
            None => ChannelFacts {
                actor_is_member: false,
                dm_participants: self.ctx.channels().dm_participants(channel_id).await?,
            },
        };
        evaluate_channel(actor, facts, action).map_err(DomainError::from)?;
        Ok(channel)
    }

    /// Evaluate an authorship-gated action against a message
    pub fn require_message(
        &self,
        actor: Snowflake,
        message: &Message,
        action: MessageAction,
    ) -> ServiceResult<()> {
        evaluate_message(actor, message.author_id, action)
            .map_err(DomainError::from)
            .map_err(ServiceError::from)
    }

    /// Check membership without a full evaluation (for read-only
    /// listings scoped to members)
    #[instrument(skip(self))]
    pub async fn require_membership(
        &self,
        actor: Snowflake,
        server_id: Snowflake,
    ) -> ServiceResult<()> {
        if self.ctx.memberships().is_member(server_id, actor).await? {
            Ok(())
        } else {
            Err(DomainError::NotMember.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventBus;
    use beacon_common::TokenProvider;
    use beacon_core::{Membership, Server, SnowflakeGenerator};
    use beacon_store::MemoryStore;
    use std::sync::Arc;

    const OWNER: Snowflake = Snowflake::new(1);
    const MEMBER: Snowflake = Snowflake::new(2);
    const STRANGER: Snowflake = Snowflake::new(3);

    fn ctx() -> ServiceContext {
        ServiceContext::with_store(
            MemoryStore::new_shared(),
            Arc::new(TokenProvider::new("permission-test-secret-key", 900)),
            Arc::new(SnowflakeGenerator::new(0)),
            EventBus::new(8),
        )
    }

    async fn seed_server(ctx: &ServiceContext) -> Snowflake {
        let server = Server::new(Snowflake::new(10), "lounge".to_string(), OWNER);
        ctx.servers().create(&server).await.unwrap();
        ctx.memberships()
            .create(&Membership::new(server.id, OWNER))
            .await
            .unwrap();
        ctx.memberships()
            .create(&Membership::new(server.id, MEMBER))
            .await
            .unwrap();
        server.id
    }

    #[tokio::test]
    async fn owner_gate_is_loaded_fresh() {
        let ctx = ctx();
        let server_id = seed_server(&ctx).await;
        let perms = PermissionService::new(&ctx);

        assert!(perms
            .require_server(OWNER, server_id, ServerAction::Update)
            .await
            .is_ok());
        assert!(matches!(
            perms.require_server(MEMBER, server_id, ServerAction::Update).await,
            Err(ServiceError::Domain(DomainError::NotOwner))
        ));
    }

    #[tokio::test]
    async fn invite_gate_admits_members_only() {
        let ctx = ctx();
        let server_id = seed_server(&ctx).await;
        let perms = PermissionService::new(&ctx);

        assert!(perms
            .require_server(MEMBER, server_id, ServerAction::CreateInvite)
            .await
            .is_ok());
        assert!(matches!(
            perms
                .require_server(STRANGER, server_id, ServerAction::CreateInvite)
                .await,
            Err(ServiceError::Domain(DomainError::NotMember))
        ));
    }

    #[tokio::test]
    async fn missing_resources_are_not_found() {
        let ctx = ctx();
        let perms = PermissionService::new(&ctx);

        assert!(matches!(
            perms
                .require_server(OWNER, Snowflake::new(99), ServerAction::Update)
                .await,
            Err(ServiceError::Domain(DomainError::ServerNotFound(_)))
        ));
        assert!(matches!(
            perms
                .require_channel(OWNER, Snowflake::new(99), ChannelAction::Read)
                .await,
            Err(ServiceError::Domain(DomainError::ChannelNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn dm_channels_gate_on_participants() {
        let ctx = ctx();
        let channel = ctx
            .channels()
            .open_dm(Channel::new_dm(Snowflake::new(50)), OWNER, MEMBER)
            .await
            .unwrap();

        let perms = PermissionService::new(&ctx);
        assert!(perms
            .require_channel(MEMBER, channel.id, ChannelAction::Send)
            .await
            .is_ok());
        assert!(matches!(
            perms
                .require_channel(STRANGER, channel.id, ChannelAction::Send)
                .await,
            Err(ServiceError::Domain(DomainError::NotMember))
        ));
    }

    #[tokio::test]
    async fn message_gate_is_authorship_only() {
        let ctx = ctx();
        let message = Message::new(
            Snowflake::new(70),
            Snowflake::new(60),
            MEMBER,
            "mine".to_string(),
        );

        let perms = PermissionService::new(&ctx);
        assert!(perms.require_message(MEMBER, &message, MessageAction::Edit).is_ok());
        assert!(matches!(
            perms.require_message(OWNER, &message, MessageAction::Delete),
            Err(ServiceError::Domain(DomainError::NotAuthor))
        ));
    }
}
