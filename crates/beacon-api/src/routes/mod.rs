//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1; the
//! realtime gateway and health check sit at the root.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{
    auth, channels, dms, friends, gateway, health, invites, members, messages, reactions, servers,
    users,
};
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/gateway", get(gateway::gateway_upgrade))
        .nest("/api/v1", api_v1_routes())
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(server_routes())
        .merge(channel_routes())
        .merge(invite_routes())
        .merge(friend_routes())
        .merge(dm_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_me))
        .route("/users/@me", patch(users::update_me))
        .route("/users/:user_id", get(users::get_user))
}

fn server_routes() -> Router<AppState> {
    Router::new()
        .route("/servers", post(servers::create_server))
        .route("/servers", get(servers::list_servers))
        .route("/servers/:server_id", get(servers::get_server))
        .route("/servers/:server_id", patch(servers::update_server))
        .route("/servers/:server_id/channels", post(channels::create_channel))
        .route("/servers/:server_id/members", get(members::list_members))
        .route("/servers/:server_id/members/@me", put(members::join_server))
        .route("/servers/:server_id/members/@me", delete(members::leave_server))
        .route("/servers/:server_id/invites", post(invites::create_invite))
}

fn channel_routes() -> Router<AppState> {
    Router::new()
        .route("/channels/:channel_id/messages", get(messages::list_messages))
        .route("/channels/:channel_id/messages", post(messages::send_message))
        .route(
            "/channels/:channel_id/messages/:message_id",
            patch(messages::edit_message),
        )
        .route(
            "/channels/:channel_id/messages/:message_id",
            delete(messages::delete_message),
        )
        .route(
            "/channels/:channel_id/messages/:message_id/reactions/:emoji/@me",
            put(reactions::add_reaction),
        )
        .route(
            "/channels/:channel_id/messages/:message_id/reactions/:emoji/@me",
            delete(reactions::remove_reaction),
        )
}

fn invite_routes() -> Router<AppState> {
    Router::new()
        .route("/invites/:code", get(invites::lookup_invite))
        .route("/invites/:code", post(invites::redeem_invite))
}

fn friend_routes() -> Router<AppState> {
    Router::new()
        .route("/friends", get(friends::list_friends))
        .route("/friends/requests", post(friends::send_request))
        .route("/friends/:user_id", put(friends::accept_request))
        .route("/friends/:user_id", delete(friends::remove_friend))
}

fn dm_routes() -> Router<AppState> {
    Router::new()
        .route("/dms", get(dms::list_dms))
        .route("/dms/:user_id", put(dms::open_dm))
}
