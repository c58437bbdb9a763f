//! User service

use beacon_core::traits::UserRepository;
use beacon_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{UpdateUserRequest, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get a user's public profile
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;
        Ok(UserResponse::from(&user))
    }

    /// Update the caller's own profile (display name, about)
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        actor: Snowflake,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self
            .ctx
            .users()
            .find_by_id(actor)
            .await?
            .ok_or(DomainError::UserNotFound(actor))?;

        if let Some(display_name) = request.display_name {
            user.set_display_name(display_name);
        }
        if let Some(about) = request.about {
            user.set_about(if about.is_empty() { None } else { Some(about) });
        }

        self.ctx.users().update(&user).await?;
        info!(user_id = %actor, "Profile updated");

        Ok(UserResponse::from(&user))
    }
}
