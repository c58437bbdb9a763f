//! # beacon-common
//!
//! Shared utilities including configuration, error handling, the auth
//! provider (password hashing + bearer tokens), and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{hash_password, verify_password, Claims, PasswordService, TokenProvider};
pub use config::{AppConfig, AppSettings, AuthConfig, ConfigError, CorsConfig, Environment,
    GatewayConfig, ServerConfig, SnowflakeConfig};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
