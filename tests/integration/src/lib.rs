//! Integration test support
//!
//! Fixtures for driving the full service stack against the in-memory
//! store, plus a tap on the event bus for asserting realtime fan-out.

pub mod fixtures;

pub use fixtures::TestApp;
