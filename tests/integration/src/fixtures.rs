//! Test fixtures
//!
//! A `TestApp` owns a fresh in-memory store wired into a full service
//! context, so tests exercise the same code paths the HTTP surface
//! does, minus the transport.

use std::sync::Arc;

use beacon_common::TokenProvider;
use beacon_core::{DomainEvent, Snowflake, SnowflakeGenerator};
use beacon_service::{
    AuthResponse, AuthService, CreateMessageRequest, CreateServerRequest, EventBus,
    MessageResponse, MessageService, RegisterRequest, ServerService, ServiceContext,
    ServiceResult,
};
use beacon_store::MemoryStore;
use tokio::sync::broadcast;

/// Password used for every fixture account
pub const TEST_PASSWORD: &str = "correct horse battery";

/// A fully wired application without the HTTP layer
pub struct TestApp {
    pub ctx: ServiceContext,
    pub bus: EventBus,
}

impl TestApp {
    /// Create a fresh app with an empty store
    pub fn new() -> Self {
        let bus = EventBus::new(256);
        let ctx = ServiceContext::with_store(
            MemoryStore::new_shared(),
            Arc::new(TokenProvider::new("integration-test-secret-key", 3600)),
            Arc::new(SnowflakeGenerator::new(1)),
            bus.clone(),
        );
        Self { ctx, bus }
    }

    /// Subscribe to domain events published from here on
    pub fn events(&self) -> broadcast::Receiver<DomainEvent> {
        self.bus.subscribe()
    }

    /// Register a user and return their id along with the full response
    pub async fn register(&self, username: &str) -> (Snowflake, AuthResponse) {
        let response = AuthService::new(&self.ctx)
            .register(RegisterRequest {
                email: format!("{username}@example.com"),
                username: username.to_string(),
                display_name: username.to_string(),
                password: TEST_PASSWORD.to_string(),
            })
            .await
            .expect("registration succeeds");
        let id = parse_id(&response.user.id);
        (id, response)
    }

    /// Create a server and return its id plus the seeded #general
    /// channel's id
    pub async fn create_server(&self, owner: Snowflake, name: &str) -> (Snowflake, Snowflake) {
        let server = ServerService::new(&self.ctx)
            .create_server(
                owner,
                CreateServerRequest {
                    name: name.to_string(),
                },
            )
            .await
            .expect("server creation succeeds");
        let server_id = parse_id(&server.id);

        let tree = ServerService::new(&self.ctx)
            .get_server(owner, server_id)
            .await
            .expect("owner can read the tree");
        let general = tree
            .categories
            .iter()
            .flat_map(|c| c.channels.iter())
            .chain(tree.orphan_channels.iter())
            .next()
            .expect("server is seeded with a channel");

        (server_id, parse_id(&general.id))
    }

    /// Send a message as a user
    pub async fn send(
        &self,
        channel: Snowflake,
        author: Snowflake,
        content: &str,
    ) -> ServiceResult<MessageResponse> {
        MessageService::new(&self.ctx)
            .send(
                channel,
                author,
                CreateMessageRequest {
                    content: content.to_string(),
                },
            )
            .await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a response id string back into a Snowflake
pub fn parse_id(raw: &str) -> Snowflake {
    raw.parse().expect("response ids are snowflakes")
}
