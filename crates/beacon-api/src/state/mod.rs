//! Application state
//!
//! Shared state for the Axum application: the service context, the
//! connection registry, and the loaded configuration.

use std::sync::Arc;

use beacon_common::AppConfig;
use beacon_gateway::ConnectionRegistry;
use beacon_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    services: ServiceContext,
    registry: Arc<ConnectionRegistry>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        services: ServiceContext,
        registry: Arc<ConnectionRegistry>,
        config: AppConfig,
    ) -> Self {
        Self {
            services,
            registry,
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn services(&self) -> &ServiceContext {
        &self.services
    }

    /// Get the connection registry
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("services", &"ServiceContext")
            .field("registry", &self.registry)
            .finish()
    }
}
