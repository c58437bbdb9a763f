//! Gateway frame format
//!
//! Every WebSocket message is one JSON frame: an opcode, and for
//! dispatches an event name, a per-connection sequence number, and the
//! event payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Frame operation codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opcode {
    /// Server → client: a domain event
    Dispatch,
    /// Client → server: keepalive
    Heartbeat,
    /// Server → client: keepalive acknowledgement
    HeartbeatAck,
    /// Client → server: authenticate the connection
    Identify,
    /// Server → client: sent on connect, before Identify
    Hello,
    /// Server → client: Identify accepted
    Ready,
}

/// A single gateway frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayFrame {
    pub op: Opcode,

    /// Event type (Dispatch only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,

    /// Per-connection sequence number (Dispatch only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s: Option<u64>,

    /// Payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<Value>,
}

/// Identify payload carried by the client's first frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifyPayload {
    pub token: String,
}

/// Ready payload confirming authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyPayload {
    pub user_id: String,
    pub session_id: String,
}

impl GatewayFrame {
    /// Build a Dispatch frame for a domain event
    #[must_use]
    pub fn dispatch(event_type: impl Into<String>, sequence: u64, data: Value) -> Self {
        Self {
            op: Opcode::Dispatch,
            t: Some(event_type.into()),
            s: Some(sequence),
            d: Some(data),
        }
    }

    /// Build the Hello frame sent on connect
    #[must_use]
    pub fn hello() -> Self {
        Self {
            op: Opcode::Hello,
            t: None,
            s: None,
            d: None,
        }
    }

    /// Build a Ready frame
    #[must_use]
    pub fn ready(payload: &ReadyPayload) -> Self {
        Self {
            op: Opcode::Ready,
            t: None,
            s: None,
            d: serde_json::to_value(payload).ok(),
        }
    }

    /// Build a HeartbeatAck frame
    #[must_use]
    pub fn heartbeat_ack() -> Self {
        Self {
            op: Opcode::HeartbeatAck,
            t: None,
            s: None,
            d: None,
        }
    }

    /// Try to read this frame as an Identify
    pub fn as_identify(&self) -> Option<IdentifyPayload> {
        if self.op != Opcode::Identify {
            return None;
        }
        self.d
            .as_ref()
            .and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
