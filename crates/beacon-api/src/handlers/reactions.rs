//! Reaction handlers

use axum::extract::{Path, State};
use beacon_service::ReactionService;

use crate::extractors::{parse_id, AuthUser};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// PUT /channels/:channel_id/messages/:message_id/reactions/:emoji/@me
pub async fn add_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((channel_id, message_id, emoji)): Path<(String, String, String)>,
) -> ApiResult<NoContent> {
    let channel_id = parse_id(&channel_id, "channel_id")?;
    let message_id = parse_id(&message_id, "message_id")?;
    ReactionService::new(state.services())
        .react(channel_id, message_id, auth.user_id, &emoji)
        .await?;
    Ok(NoContent)
}

/// DELETE /channels/:channel_id/messages/:message_id/reactions/:emoji/@me
pub async fn remove_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((channel_id, message_id, emoji)): Path<(String, String, String)>,
) -> ApiResult<NoContent> {
    let channel_id = parse_id(&channel_id, "channel_id")?;
    let message_id = parse_id(&message_id, "message_id")?;
    ReactionService::new(state.services())
        .unreact(channel_id, message_id, auth.user_id, &emoji)
        .await?;
    Ok(NoContent)
}
