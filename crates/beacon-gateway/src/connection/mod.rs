//! Live connection state and registry

mod connection;
mod registry;

pub use connection::{Connection, DeliveryStatus};
pub use registry::{ConnectionRegistry, Room};
