//! Server service
//!
//! Server creation, the categories → channels tree, and owner-only
//! updates.

use beacon_core::events::ServerUpdatedEvent;
use beacon_core::traits::{
    CategoryRepository, ChannelRepository, MembershipRepository, ServerRepository,
};
use beacon_core::{
    Category, Channel, ChannelType, DomainError, Membership, Server, ServerAction, Snowflake,
    DomainEvent,
};
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::{
    CategoryWithChannels, ChannelResponse, CreateServerRequest, ServerResponse,
    ServerTreeResponse, UpdateServerRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::PermissionService;

/// Server service
pub struct ServerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ServerService<'a> {
    /// Create a new ServerService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a server owned by the actor, seeded with a default
    /// category and a #general text channel. The owner gets an explicit
    /// membership row.
    #[instrument(skip(self, request))]
    pub async fn create_server(
        &self,
        actor: Snowflake,
        request: CreateServerRequest,
    ) -> ServiceResult<ServerResponse> {
        let server = Server::new(self.ctx.generate_id(), request.name, actor);
        self.ctx.servers().create(&server).await?;

        self.ctx.memberships().create(&Membership::new(server.id, actor)).await?;

        let category = Category::new(
            self.ctx.generate_id(),
            server.id,
            "Text Channels".to_string(),
            0,
        );
        self.ctx.categories().create(&category).await?;

        let general = Channel::new_server_channel(
            self.ctx.generate_id(),
            server.id,
            Some(category.id),
            ChannelType::Text,
            "general".to_string(),
            None,
        );
        self.ctx.channels().create(&general).await?;

        info!(server_id = %server.id, owner_id = %actor, "Server created");

        Ok(ServerResponse::from(&server))
    }

    /// Get a server with its categories → channels tree (members only)
    #[instrument(skip(self))]
    pub async fn get_server(
        &self,
        actor: Snowflake,
        server_id: Snowflake,
    ) -> ServiceResult<ServerTreeResponse> {
        let server = self
            .ctx
            .servers()
            .find_by_id(server_id)
            .await?
            .ok_or(DomainError::ServerNotFound(server_id))?;

        PermissionService::new(self.ctx)
            .require_membership(actor, server_id)
            .await?;

        let categories = self.ctx.categories().find_by_server(server_id).await?;
        let channels = self.ctx.channels().find_by_server(server_id).await?;

        let mut tree = Vec::with_capacity(categories.len());
        for category in &categories {
            let members: Vec<ChannelResponse> = channels
                .iter()
                .filter(|c| c.category_id == Some(category.id))
                .map(ChannelResponse::from)
                .collect();
            tree.push(CategoryWithChannels::new(category, members));
        }
        let orphan_channels = channels
            .iter()
            .filter(|c| c.category_id.is_none())
            .map(ChannelResponse::from)
            .collect();

        Ok(ServerTreeResponse {
            server: ServerResponse::from(&server),
            categories: tree,
            orphan_channels,
        })
    }

    /// Update server fields (owner only)
    #[instrument(skip(self, request))]
    pub async fn update_server(
        &self,
        actor: Snowflake,
        server_id: Snowflake,
        request: UpdateServerRequest,
    ) -> ServiceResult<ServerResponse> {
        let mut server = PermissionService::new(self.ctx)
            .require_server(actor, server_id, ServerAction::Update)
            .await?;

        if let Some(name) = request.name {
            server.set_name(name);
        }
        self.ctx.servers().update(&server).await?;

        info!(server_id = %server_id, "Server updated");

        self.ctx
            .bus()
            .publish(DomainEvent::ServerUpdated(ServerUpdatedEvent {
                server_id,
                timestamp: Utc::now(),
            }));

        Ok(ServerResponse::from(&server))
    }

    /// List the servers the actor belongs to
    #[instrument(skip(self))]
    pub async fn list_servers(&self, actor: Snowflake) -> ServiceResult<Vec<ServerResponse>> {
        let servers = self.ctx.servers().find_by_member(actor).await?;
        Ok(servers.iter().map(ServerResponse::from).collect())
    }
}
