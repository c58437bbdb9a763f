//! Server entity - a named community container

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Server (community) entity
///
/// Exactly one owner. Ownership is not transferable; if the owner
/// leaves, `owner_id` keeps pointing at the departed user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    pub id: Snowflake,
    pub name: String,
    pub owner_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Server {
    /// Create a new Server
    pub fn new(id: Snowflake, name: String, owner_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if a user is the server owner
    #[inline]
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }

    /// Update the server name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let server = Server::new(Snowflake::new(1), "lounge".to_string(), Snowflake::new(100));
        assert_eq!(server.name, "lounge");
        assert!(server.is_owner(Snowflake::new(100)));
        assert!(!server.is_owner(Snowflake::new(200)));
    }

    #[test]
    fn test_rename() {
        let mut server = Server::new(Snowflake::new(1), "old".to_string(), Snowflake::new(100));
        server.set_name("new".to_string());
        assert_eq!(server.name, "new");
    }
}
