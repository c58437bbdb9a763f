//! Request extractors

mod auth;
mod validated;

pub use auth::AuthUser;
pub use validated::ValidatedJson;

use beacon_core::Snowflake;

use crate::response::ApiError;

/// Parse a snowflake id out of a path segment
pub fn parse_id(raw: &str, what: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("invalid {what}")))
}
