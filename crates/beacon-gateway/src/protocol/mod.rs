//! Gateway wire protocol

mod frames;

pub use frames::{GatewayFrame, IdentifyPayload, Opcode, ReadyPayload};
