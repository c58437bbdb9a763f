//! Connection registry
//!
//! The process-wide index of live connections: by session, by user, and
//! by room. Rooms are derived from the user's memberships and DM
//! channels at identify time, and adjusted incrementally as membership
//! and DM events flow through the router, never recomputed from
//! ambient global state.

use std::collections::HashSet;
use std::sync::Arc;

use beacon_core::Snowflake;
use dashmap::DashMap;
use tracing::{debug, trace};

use super::connection::{Connection, DeliveryStatus};
use crate::protocol::GatewayFrame;

/// A broadcast room a connection can be subscribed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    /// Every channel of a server
    Server(Snowflake),
    /// A single channel (used for DM channels, which have no server)
    Channel(Snowflake),
}

/// Registry of live connections
pub struct ConnectionRegistry {
    /// Session id -> connection
    connections: DashMap<String, Arc<Connection>>,
    /// User id -> session ids
    user_index: DashMap<Snowflake, HashSet<String>>,
    /// Room -> session ids
    room_index: DashMap<Room, HashSet<String>>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            user_index: DashMap::new(),
            room_index: DashMap::new(),
        }
    }

    /// Create a shared registry handle
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register an authenticated connection with its initial room set
    pub fn register(&self, connection: Arc<Connection>, rooms: Vec<Room>) {
        let session_id = connection.session_id().to_string();
        let user_id = connection.user_id();

        self.user_index
            .entry(user_id)
            .or_default()
            .insert(session_id.clone());
        for room in rooms {
            self.room_index
                .entry(room)
                .or_default()
                .insert(session_id.clone());
        }
        self.connections.insert(session_id.clone(), connection);

        debug!(session_id = %session_id, user_id = %user_id, "Connection registered");
    }

    /// Remove a connection and every index entry pointing at it
    pub fn unregister(&self, session_id: &str) {
        if let Some((_, connection)) = self.connections.remove(session_id) {
            self.user_index.alter(&connection.user_id(), |_, mut sessions| {
                sessions.remove(session_id);
                sessions
            });
            self.user_index.retain(|_, sessions| !sessions.is_empty());

            // The session may sit in any number of rooms
            for mut entry in self.room_index.iter_mut() {
                entry.value_mut().remove(session_id);
            }
            self.room_index.retain(|_, sessions| !sessions.is_empty());

            debug!(session_id = %session_id, "Connection unregistered");
        }
    }

    /// Subscribe all of a user's connections to a room (membership
    /// gained, DM opened)
    pub fn subscribe_user(&self, user_id: Snowflake, room: Room) {
        let sessions = self
            .user_index
            .get(&user_id)
            .map(|s| s.clone())
            .unwrap_or_default();
        if sessions.is_empty() {
            return;
        }
        let mut slot = self.room_index.entry(room).or_default();
        for session in sessions {
            slot.insert(session);
        }
    }

    /// Unsubscribe all of a user's connections from a room (membership
    /// lost)
    pub fn unsubscribe_user(&self, user_id: Snowflake, room: Room) {
        let sessions = self
            .user_index
            .get(&user_id)
            .map(|s| s.clone())
            .unwrap_or_default();
        if let Some(mut slot) = self.room_index.get_mut(&room) {
            for session in &sessions {
                slot.remove(session);
            }
        }
        self.room_index.retain(|_, sessions| !sessions.is_empty());
    }

    /// Deliver a frame builder to every connection in a room.
    /// `make_frame` runs per connection so each gets its own sequence
    /// number. Dead connections are swept from the registry afterwards.
    pub fn send_to_room<F>(&self, room: Room, make_frame: F) -> usize
    where
        F: Fn(&Connection) -> GatewayFrame,
    {
        let sessions = self
            .room_index
            .get(&room)
            .map(|s| s.clone())
            .unwrap_or_default();
        self.deliver_to_sessions(&sessions, make_frame)
    }

    /// Deliver a frame builder to every connection of a user
    pub fn send_to_user<F>(&self, user_id: Snowflake, make_frame: F) -> usize
    where
        F: Fn(&Connection) -> GatewayFrame,
    {
        let sessions = self
            .user_index
            .get(&user_id)
            .map(|s| s.clone())
            .unwrap_or_default();
        self.deliver_to_sessions(&sessions, make_frame)
    }

    fn deliver_to_sessions<F>(&self, sessions: &HashSet<String>, make_frame: F) -> usize
    where
        F: Fn(&Connection) -> GatewayFrame,
    {
        let mut sent = 0;
        let mut dead = Vec::new();

        for session_id in sessions {
            if let Some(connection) = self.connections.get(session_id) {
                match connection.deliver(make_frame(&connection)) {
                    DeliveryStatus::Sent => sent += 1,
                    DeliveryStatus::Dropped => {
                        trace!(session_id = %session_id, "Queue full, frame dropped");
                    }
                    DeliveryStatus::Closed => dead.push(session_id.clone()),
                }
            }
        }

        for session_id in dead {
            self.unregister(&session_id);
        }
        sent
    }

    /// Number of live connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of distinct connected users
    pub fn user_count(&self) -> usize {
        self.user_index.len()
    }

    /// Whether a session is registered
    pub fn has_session(&self, session_id: &str) -> bool {
        self.connections.contains_key(session_id)
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("connections", &self.connections.len())
            .field("users", &self.user_index.len())
            .field("rooms", &self.room_index.len())
            .finish()
    }
}
