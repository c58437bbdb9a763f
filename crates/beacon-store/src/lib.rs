//! # beacon-store
//!
//! Storage layer: the reference implementation of the core's store
//! traits. Keeps everything in process memory with per-key atomic
//! conditional writes, so concurrent joins, DM opens, and friend
//! requests resolve deterministically to one winner.

pub mod memory;

pub use memory::MemoryStore;
