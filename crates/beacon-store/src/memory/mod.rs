//! In-memory store
//!
//! `DashMap`-backed tables with uniqueness enforced through the entry
//! API: inserts into uniquely-keyed tables (membership pairs, DM pairs,
//! friend pairs, email/tag indexes) happen under the shard lock of the
//! target key, which gives the compare-and-set semantics the core
//! assumes. Reads never take a global lock and may observe slightly
//! stale state during a concurrent write, but never a partially-written
//! row.

mod categories;
mod channels;
mod friends;
mod invites;
mod memberships;
mod messages;
mod reactions;
mod servers;
mod users;

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use beacon_core::{Category, Channel, FriendLink, Invite, Membership, Message, Reaction, Server,
    Snowflake, User};

/// Normalize an unordered user pair into a stable map key
pub(crate) fn pair_key(a: Snowflake, b: Snowflake) -> (Snowflake, Snowflake) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Process-wide in-memory store implementing every repository trait
pub struct MemoryStore {
    // Users
    pub(crate) users: DashMap<Snowflake, User>,
    pub(crate) password_hashes: DashMap<Snowflake, String>,
    /// lowercased email -> user id
    pub(crate) emails: DashMap<String, Snowflake>,
    /// (username, discriminator) -> user id
    pub(crate) tags: DashMap<(String, String), Snowflake>,
    /// serializes email+tag reservation so registration is atomic
    pub(crate) registration: Mutex<()>,

    // Servers and structure
    pub(crate) servers: DashMap<Snowflake, Server>,
    pub(crate) categories: DashMap<Snowflake, Category>,
    pub(crate) channels: DashMap<Snowflake, Channel>,

    // DM addressing
    /// normalized pair -> DM channel id
    pub(crate) dm_pairs: DashMap<(Snowflake, Snowflake), Snowflake>,
    /// DM channel id -> participant pair
    pub(crate) dm_participants: DashMap<Snowflake, (Snowflake, Snowflake)>,

    // Messages and reactions
    pub(crate) messages: DashMap<Snowflake, Message>,
    pub(crate) reactions: DashMap<Snowflake, Vec<Reaction>>,

    // Relations
    /// (server id, user id) -> membership
    pub(crate) memberships: DashMap<(Snowflake, Snowflake), Membership>,
    pub(crate) invites: DashMap<String, Invite>,
    /// normalized pair -> friend link
    pub(crate) friends: DashMap<(Snowflake, Snowflake), FriendLink>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            password_hashes: DashMap::new(),
            emails: DashMap::new(),
            tags: DashMap::new(),
            registration: Mutex::new(()),
            servers: DashMap::new(),
            categories: DashMap::new(),
            channels: DashMap::new(),
            dm_pairs: DashMap::new(),
            dm_participants: DashMap::new(),
            messages: DashMap::new(),
            reactions: DashMap::new(),
            memberships: DashMap::new(),
            invites: DashMap::new(),
            friends: DashMap::new(),
        }
    }

    /// Create a shared store handle
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("users", &self.users.len())
            .field("servers", &self.servers.len())
            .field("channels", &self.channels.len())
            .field("messages", &self.messages.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_is_order_independent() {
        let a = Snowflake::new(1);
        let b = Snowflake::new(2);
        assert_eq!(pair_key(a, b), pair_key(b, a));
        assert_eq!(pair_key(a, b), (a, b));
    }

    #[test]
    fn test_empty_store() {
        let store = MemoryStore::new();
        assert_eq!(store.users.len(), 0);
        assert_eq!(store.servers.len(), 0);
    }
}
