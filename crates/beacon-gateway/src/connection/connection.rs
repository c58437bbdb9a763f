//! A single live connection
//!
//! Connections enter the registry only after a successful Identify, so
//! the user id is fixed for the connection's lifetime. Outbound frames
//! go through a bounded queue; delivery never blocks the router.

use std::sync::atomic::{AtomicU64, Ordering};

use beacon_core::Snowflake;
use tokio::sync::mpsc;

use crate::protocol::GatewayFrame;

/// Delivery outcome for a single connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
    /// Queue full: the frame was dropped for this connection
    Dropped,
    /// Receiver gone: the connection should be removed
    Closed,
}

/// A single authenticated connection
pub struct Connection {
    session_id: String,
    user_id: Snowflake,
    sender: mpsc::Sender<GatewayFrame>,
    sequence: AtomicU64,
}

impl Connection {
    /// Create a connection for an authenticated user
    pub fn new(session_id: String, user_id: Snowflake, sender: mpsc::Sender<GatewayFrame>) -> Self {
        Self {
            session_id,
            user_id,
            sender,
            sequence: AtomicU64::new(0),
        }
    }

    /// Get the session ID
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Get the authenticated user ID
    pub fn user_id(&self) -> Snowflake {
        self.user_id
    }

    /// Next dispatch sequence number for this connection
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Queue a frame without blocking. A full queue drops the frame;
    /// the client is expected to re-fetch via the HTTP listing on
    /// reconnect anyway.
    pub fn deliver(&self, frame: GatewayFrame) -> DeliveryStatus {
        match self.sender.try_send(frame) {
            Ok(()) => DeliveryStatus::Sent,
            Err(mpsc::error::TrySendError::Full(_)) => DeliveryStatus::Dropped,
            Err(mpsc::error::TrySendError::Closed(_)) => DeliveryStatus::Closed,
        }
    }

    /// Whether the outbound half is gone
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("session_id", &self.session_id)
            .field("user_id", &self.user_id)
            .field("sequence", &self.sequence.load(Ordering::SeqCst))
            .finish()
    }
}
