//! Member service
//!
//! Joining and leaving servers, and member listings.

use beacon_core::events::MemberEvent;
use beacon_core::traits::{MembershipRepository, ServerRepository, UserRepository};
use beacon_core::{DomainError, DomainEvent, Membership, Snowflake};
use tracing::{info, instrument};

use crate::dto::MemberResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::PermissionService;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Join a server. Joining twice is a conflict, not a no-op.
    #[instrument(skip(self))]
    pub async fn join(&self, server_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        // Server must exist before a membership may reference it
        self.ctx
            .servers()
            .find_by_id(server_id)
            .await?
            .ok_or(DomainError::ServerNotFound(server_id))?;

        // The store insert is the atomic arbiter under concurrent joins
        self.ctx
            .memberships()
            .create(&Membership::new(server_id, user_id))
            .await?;

        info!(server_id = %server_id, user_id = %user_id, "Member joined");

        self.ctx
            .bus()
            .publish(DomainEvent::MemberJoined(MemberEvent::new(server_id, user_id)));

        Ok(())
    }

    /// Leave a server. Leaving without a membership fails with
    /// `NotMember`. The owner may leave; `owner_id` then dangles and
    /// owner-gated actions simply have no eligible actor.
    #[instrument(skip(self))]
    pub async fn leave(&self, server_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let removed = self.ctx.memberships().delete(server_id, user_id).await?;
        if !removed {
            return Err(DomainError::NotMember.into());
        }

        info!(server_id = %server_id, user_id = %user_id, "Member left");

        self.ctx
            .bus()
            .publish(DomainEvent::MemberLeft(MemberEvent::new(server_id, user_id)));

        Ok(())
    }

    /// List the members of a server (members only)
    #[instrument(skip(self))]
    pub async fn list_members(
        &self,
        actor: Snowflake,
        server_id: Snowflake,
    ) -> ServiceResult<Vec<MemberResponse>> {
        let server = self
            .ctx
            .servers()
            .find_by_id(server_id)
            .await?
            .ok_or(DomainError::ServerNotFound(server_id))?;

        PermissionService::new(self.ctx)
            .require_membership(actor, server_id)
            .await?;

        let memberships = self.ctx.memberships().find_by_server(server_id).await?;

        let mut responses = Vec::with_capacity(memberships.len());
        for membership in &memberships {
            if let Some(user) = self.ctx.users().find_by_id(membership.user_id).await? {
                responses.push(MemberResponse::new(membership, &user, server.owner_id));
            }
        }
        Ok(responses)
    }
}
