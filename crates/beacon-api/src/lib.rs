//! # beacon-api
//!
//! HTTP and WebSocket surface built with Axum. Maps inbound requests to
//! the service layer and hosts the realtime gateway endpoint.

pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;
