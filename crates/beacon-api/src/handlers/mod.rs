//! Request handlers, grouped by resource

pub mod auth;
pub mod channels;
pub mod dms;
pub mod friends;
pub mod gateway;
pub mod health;
pub mod invites;
pub mod members;
pub mod messages;
pub mod reactions;
pub mod servers;
pub mod users;
