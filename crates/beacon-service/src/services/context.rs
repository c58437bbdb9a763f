//! Service context - dependency container for services
//!
//! Holds the store repositories, the auth provider, the id generator,
//! and the event bus. Cheap to clone; every service borrows one.

use std::sync::Arc;

use beacon_common::auth::{PasswordService, TokenProvider};
use beacon_core::traits::{
    CategoryRepository, ChannelRepository, FriendRepository, InviteRepository,
    MembershipRepository, MessageRepository, ReactionRepository, ServerRepository, UserRepository,
};
use beacon_core::SnowflakeGenerator;

use crate::bus::EventBus;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    users: Arc<dyn UserRepository>,
    servers: Arc<dyn ServerRepository>,
    categories: Arc<dyn CategoryRepository>,
    channels: Arc<dyn ChannelRepository>,
    messages: Arc<dyn MessageRepository>,
    memberships: Arc<dyn MembershipRepository>,
    invites: Arc<dyn InviteRepository>,
    reactions: Arc<dyn ReactionRepository>,
    friends: Arc<dyn FriendRepository>,

    token_provider: Arc<TokenProvider>,
    password_service: PasswordService,
    snowflakes: Arc<SnowflakeGenerator>,
    bus: EventBus,
}

impl ServiceContext {
    /// Build a context from a single store value that implements every
    /// repository trait, which is how the in-memory store is wired.
    pub fn with_store<S>(
        store: Arc<S>,
        token_provider: Arc<TokenProvider>,
        snowflakes: Arc<SnowflakeGenerator>,
        bus: EventBus,
    ) -> Self
    where
        S: UserRepository
            + ServerRepository
            + CategoryRepository
            + ChannelRepository
            + MessageRepository
            + MembershipRepository
            + InviteRepository
            + ReactionRepository
            + FriendRepository
            + 'static,
    {
        Self {
            users: store.clone(),
            servers: store.clone(),
            categories: store.clone(),
            channels: store.clone(),
            messages: store.clone(),
            memberships: store.clone(),
            invites: store.clone(),
            reactions: store.clone(),
            friends: store,
            token_provider,
            password_service: PasswordService::new(),
            snowflakes,
            bus,
        }
    }

    // === Repositories ===

    pub fn users(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }

    pub fn servers(&self) -> &dyn ServerRepository {
        self.servers.as_ref()
    }

    pub fn categories(&self) -> &dyn CategoryRepository {
        self.categories.as_ref()
    }

    pub fn channels(&self) -> &dyn ChannelRepository {
        self.channels.as_ref()
    }

    pub fn messages(&self) -> &dyn MessageRepository {
        self.messages.as_ref()
    }

    pub fn memberships(&self) -> &dyn MembershipRepository {
        self.memberships.as_ref()
    }

    pub fn invites(&self) -> &dyn InviteRepository {
        self.invites.as_ref()
    }

    pub fn reactions(&self) -> &dyn ReactionRepository {
        self.reactions.as_ref()
    }

    pub fn friends(&self) -> &dyn FriendRepository {
        self.friends.as_ref()
    }

    // === Auth ===

    /// Get the token provider
    pub fn token_provider(&self) -> &TokenProvider {
        self.token_provider.as_ref()
    }

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    // === Ids and events ===

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> beacon_core::Snowflake {
        self.snowflakes.generate()
    }

    /// Get the event bus
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("bus", &self.bus)
            .finish()
    }
}
