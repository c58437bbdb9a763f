//! Friend relationship handlers

use axum::{
    extract::{Path, State},
    Json,
};
use beacon_service::{FriendEntryResponse, FriendRequestBody, FriendService};

use crate::extractors::{parse_id, AuthUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// POST /friends/requests sends a request addressed by tag
pub async fn send_request(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<FriendRequestBody>,
) -> ApiResult<NoContent> {
    FriendService::new(state.services())
        .request(auth.user_id, &request.tag)
        .await?;
    Ok(NoContent)
}

/// GET /friends lists relationship projections for the caller
pub async fn list_friends(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<FriendEntryResponse>>> {
    let entries = FriendService::new(state.services()).list(auth.user_id).await?;
    Ok(Json(entries))
}

/// PUT /friends/:user_id accepts that user's pending request
pub async fn accept_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<NoContent> {
    let requester = parse_id(&user_id, "user_id")?;
    FriendService::new(state.services())
        .accept(auth.user_id, requester)
        .await?;
    Ok(NoContent)
}

/// DELETE /friends/:user_id declines, retracts, or unfriends
pub async fn remove_friend(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<NoContent> {
    let other = parse_id(&user_id, "user_id")?;
    FriendService::new(state.services())
        .remove(auth.user_id, other)
        .await?;
    Ok(NoContent)
}
