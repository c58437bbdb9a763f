//! # beacon-gateway
//!
//! Realtime broadcaster: a registry of live connections keyed by user
//! and room, and a router task that fans domain events out to every
//! connection currently authorized to see them. Transport-agnostic; the
//! API crate plugs WebSocket connections into the registry.

pub mod broadcast;
pub mod connection;
pub mod protocol;

pub use broadcast::EventRouter;
pub use connection::{Connection, ConnectionRegistry, Room};
pub use protocol::{GatewayFrame, Opcode};
