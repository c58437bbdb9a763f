//! Server bootstrap
//!
//! Wires the store, service context, event bus, connection registry,
//! and router together, then serves the Axum application.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use beacon_common::{AppConfig, TokenProvider};
use beacon_core::SnowflakeGenerator;
use beacon_gateway::{ConnectionRegistry, EventRouter};
use beacon_service::{EventBus, ServiceContext};
use beacon_store::MemoryStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes::create_router;
use crate::state::AppState;

/// Build the application state from configuration
pub fn build_state(config: AppConfig) -> AppState {
    let store = MemoryStore::new_shared();
    let token_provider = Arc::new(TokenProvider::new(
        &config.auth.token_secret,
        config.auth.token_expiry_secs,
    ));
    let snowflakes = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));
    let bus = EventBus::new(config.gateway.event_buffer);

    let services = ServiceContext::with_store(store, token_provider, snowflakes, bus);
    let registry = ConnectionRegistry::new_shared();

    AppState::new(services, registry, config)
}

/// Start the realtime fan-out loop for this state
pub fn start_event_router(state: &AppState) -> Arc<EventRouter> {
    let router = EventRouter::new(
        Arc::clone(state.registry()),
        state.services().bus().clone(),
    );
    router.start();
    router
}

/// Run the HTTP server until shutdown
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let address = config.server.address();
    let state = build_state(config);
    let _router = start_event_router(&state);

    let cors = cors_layer(state.config());
    let app = create_router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(%address, "beacon listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any);

    if config.cors.allowed_origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}
