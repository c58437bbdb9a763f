//! Invite service
//!
//! Invite creation (members only), lookup, and redemption.

use beacon_core::events::InviteCreatedEvent;
use beacon_core::traits::{InviteRepository, MembershipRepository, ServerRepository};
use beacon_core::{
    generate_invite_code, DomainError, DomainEvent, Invite, ServerAction, Snowflake,
};
use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::dto::{CreateInviteRequest, InviteResponse, InviteSummaryResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::member::MemberService;
use super::permission::PermissionService;

/// Invite service
pub struct InviteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InviteService<'a> {
    /// Create a new InviteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an invite for a server (requires membership)
    #[instrument(skip(self, request))]
    pub async fn create_invite(
        &self,
        actor: Snowflake,
        server_id: Snowflake,
        request: CreateInviteRequest,
    ) -> ServiceResult<InviteResponse> {
        PermissionService::new(self.ctx)
            .require_server(actor, server_id, ServerAction::CreateInvite)
            .await?;

        // Codes are random; a collision is possible, so retry a few
        // times before giving up.
        let mut last_err = None;
        for _ in 0..3 {
            let invite = Invite::new(generate_invite_code(), server_id, actor)
                .with_max_uses(request.max_uses)
                .with_max_age(request.max_age);

            match self.ctx.invites().create(&invite).await {
                Ok(()) => {
                    info!(code = %invite.code, server_id = %server_id, "Invite created");

                    self.ctx
                        .bus()
                        .publish(DomainEvent::InviteCreated(InviteCreatedEvent {
                            code: invite.code.clone(),
                            server_id,
                            created_by: actor,
                            timestamp: Utc::now(),
                        }));

                    return Ok(InviteResponse::from(&invite));
                }
                Err(DomainError::InviteCodeExists) => {
                    warn!(code = %invite.code, "Invite code collision, retrying");
                    last_err = Some(DomainError::InviteCodeExists);
                }
                Err(other) => return Err(other.into()),
            }
        }
        Err(last_err.unwrap_or(DomainError::InviteCodeExists).into())
    }

    /// Look up an invite code: a server summary anyone with the code
    /// may see
    #[instrument(skip(self))]
    pub async fn lookup(&self, code: &str) -> ServiceResult<InviteSummaryResponse> {
        let invite = self.find_redeemable(code).await?;

        let server = self
            .ctx
            .servers()
            .find_by_id(invite.server_id)
            .await?
            .ok_or_else(|| DomainError::InviteNotFound(code.to_string()))?;

        let member_count = self
            .ctx
            .memberships()
            .find_by_server(invite.server_id)
            .await?
            .len();

        Ok(InviteSummaryResponse {
            code: invite.code,
            server_id: server.id.to_string(),
            server_name: server.name,
            member_count,
        })
    }

    /// Redeem an invite, joining its server. Concurrent redemption of
    /// the same code by different users is fine; the same user twice
    /// conflicts on the membership insert.
    #[instrument(skip(self))]
    pub async fn redeem(&self, code: &str, user_id: Snowflake) -> ServiceResult<()> {
        let invite = self.find_redeemable(code).await?;

        MemberService::new(self.ctx)
            .join(invite.server_id, user_id)
            .await?;

        // Use accounting is best-effort bookkeeping; redemption already
        // succeeded.
        if let Err(err) = self.ctx.invites().increment_uses(code).await {
            warn!(code = %code, error = %err, "Failed to count invite use");
        }

        info!(code = %code, user_id = %user_id, server_id = %invite.server_id, "Invite redeemed");
        Ok(())
    }

    /// Resolve a code to a still-redeemable invite. Expired and
    /// exhausted invites surface as not-found; the code is unguessable,
    /// so there is nothing useful to distinguish.
    async fn find_redeemable(&self, code: &str) -> ServiceResult<Invite> {
        let invite = self
            .ctx
            .invites()
            .find_by_code(code)
            .await?
            .ok_or_else(|| DomainError::InviteNotFound(code.to_string()))?;

        if !invite.is_redeemable() {
            return Err(DomainError::InviteNotFound(code.to_string()).into());
        }
        Ok(invite)
    }
}
