//! Auth service
//!
//! Registration and login. Credential hashing and token issuance are
//! delegated to the auth provider in `beacon-common`.

use beacon_core::traits::UserRepository;
use beacon_core::{DomainError, User};
use beacon_common::AppError;
use tracing::{info, instrument};

use crate::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Auth service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account and log it in
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        // Fail fast on a taken email; the store re-checks atomically on
        // insert, so a racing duplicate still surfaces as a conflict.
        if self
            .ctx
            .users()
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let discriminator = self.ctx.users().next_discriminator(&request.username).await?;
        let password_hash = self.ctx.password_service().hash(&request.password)?;

        let user = User::new(
            self.ctx.generate_id(),
            request.username,
            discriminator,
            request.email,
            request.display_name,
        );
        self.ctx.users().create(&user, &password_hash).await?;

        info!(user_id = %user.id, tag = %user.tag(), "User registered");

        let token = self.ctx.token_provider().issue(user.id)?;
        Ok(AuthResponse {
            user: UserResponse::from(&user),
            token,
        })
    }

    /// Log in with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        // A missing account and a wrong password look identical to the
        // caller.
        let user = self
            .ctx
            .users()
            .find_by_email(&request.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let hash = self
            .ctx
            .users()
            .password_hash(user.id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        self.ctx
            .password_service()
            .verify_or_error(&request.password, &hash)?;

        info!(user_id = %user.id, "User logged in");

        let token = self.ctx.token_provider().issue(user.id)?;
        Ok(AuthResponse {
            user: UserResponse::from(&user),
            token,
        })
    }

    /// Resolve a bearer token to a user id (used by the API extractor
    /// and the gateway identify handler)
    pub fn authenticate(&self, token: &str) -> ServiceResult<beacon_core::Snowflake> {
        Ok(self.ctx.token_provider().authenticate(token)?)
    }
}
