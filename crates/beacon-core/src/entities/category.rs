//! Category entity - ordered grouping of channels within a server

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Category entity
///
/// Owned by its server; exists only while the server exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Snowflake,
    pub server_id: Snowflake,
    pub name: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new Category at the given position
    pub fn new(id: Snowflake, server_id: Snowflake, name: String, position: i32) -> Self {
        Self {
            id,
            server_id,
            name,
            position,
            created_at: Utc::now(),
        }
    }
}
