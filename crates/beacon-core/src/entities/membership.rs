//! Membership entity - the join relation between a user and a server

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Membership entity (junction between User and Server)
///
/// Unique per (server, user) pair. The owner is implicitly a member and
/// also holds an explicit row so membership queries stay uniform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub server_id: Snowflake,
    pub user_id: Snowflake,
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    /// Create a new Membership
    pub fn new(server_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            server_id,
            user_id,
            joined_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_creation() {
        let membership = Membership::new(Snowflake::new(100), Snowflake::new(200));
        assert_eq!(membership.server_id, Snowflake::new(100));
        assert_eq!(membership.user_id, Snowflake::new(200));
    }
}
