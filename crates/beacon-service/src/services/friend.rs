//! Friend service
//!
//! The friend-request state machine: none → pending → accepted, with
//! decline as a no-op-safe removal. One record per unordered pair; the
//! store's conditional insert arbitrates concurrent requests.

use beacon_core::entities::split_tag;
use beacon_core::traits::{FriendRepository, UserRepository};
use beacon_core::events::FriendLinkEvent;
use beacon_core::{DomainError, DomainEvent, FriendLink, FriendState, Snowflake};
use tracing::{info, instrument};

use crate::dto::{FriendEntryResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Friend service
pub struct FriendService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FriendService<'a> {
    /// Create a new FriendService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a friend request, addressing the target by `name#1234` tag
    #[instrument(skip(self))]
    pub async fn request(&self, requester: Snowflake, tag: &str) -> ServiceResult<()> {
        let (username, discriminator) =
            split_tag(tag).ok_or_else(|| DomainError::InvalidTag(tag.to_string()))?;

        let target = self
            .ctx
            .users()
            .find_by_tag(username, discriminator)
            .await?
            .ok_or_else(|| DomainError::UserTagNotFound(tag.to_string()))?;

        if target.id == requester {
            return Err(ServiceError::validation("cannot friend yourself"));
        }

        // The store rejects the insert when any link for the pair
        // already exists, pending or accepted.
        let link = FriendLink::new_pending(requester, target.id);
        self.ctx.friends().create(&link).await?;

        info!(requester = %requester, target = %target.id, "Friend request sent");

        self.ctx
            .bus()
            .publish(DomainEvent::FriendRequested(FriendLinkEvent::new(
                requester, target.id,
            )));

        Ok(())
    }

    /// Accept a pending request. Only the request's target may accept.
    #[instrument(skip(self))]
    pub async fn accept(&self, accepter: Snowflake, requester: Snowflake) -> ServiceResult<()> {
        let mut link = self
            .ctx
            .friends()
            .find_pair(accepter, requester)
            .await?
            .ok_or(DomainError::NoSuchRequest)?;

        // The link must be pending, in the right direction
        if link.state != FriendState::Pending
            || link.requester_id != requester
            || link.target_id != accepter
        {
            return Err(DomainError::NoSuchRequest.into());
        }

        link.accept();
        self.ctx.friends().update(&link).await?;

        info!(requester = %requester, accepter = %accepter, "Friend request accepted");

        self.ctx
            .bus()
            .publish(DomainEvent::FriendAccepted(FriendLinkEvent::new(
                requester, accepter,
            )));

        Ok(())
    }

    /// Remove whatever link exists with the other user: decline a
    /// pending request, retract an outgoing one, or unfriend. Safe to
    /// repeat; removing nothing is not an error.
    #[instrument(skip(self))]
    pub async fn remove(&self, actor: Snowflake, other: Snowflake) -> ServiceResult<()> {
        let removed = self.ctx.friends().delete_pair(actor, other).await?;
        if removed {
            info!(actor = %actor, other = %other, "Friend link removed");
            self.ctx
                .bus()
                .publish(DomainEvent::FriendRemoved(FriendLinkEvent::new(actor, other)));
        }
        Ok(())
    }

    /// Project every relationship touching the actor into
    /// `{user, status}` entries
    #[instrument(skip(self))]
    pub async fn list(&self, actor: Snowflake) -> ServiceResult<Vec<FriendEntryResponse>> {
        let links = self.ctx.friends().find_by_user(actor).await?;

        let mut entries = Vec::with_capacity(links.len());
        for link in &links {
            let other = link.other_party(actor);
            if let Some(user) = self.ctx.users().find_by_id(other).await? {
                entries.push(FriendEntryResponse {
                    user: UserResponse::from(&user),
                    status: link.status_for(actor),
                });
            }
        }
        Ok(entries)
    }
}
