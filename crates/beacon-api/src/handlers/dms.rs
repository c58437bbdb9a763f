//! DM channel handlers

use axum::{
    extract::{Path, State},
    Json,
};
use beacon_service::{ChannelResponse, DmService};

use crate::extractors::{parse_id, AuthUser};
use crate::response::ApiResult;
use crate::state::AppState;

/// PUT /dms/:user_id opens (or returns) the DM channel with a user
pub async fn open_dm(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<ChannelResponse>> {
    let target = parse_id(&user_id, "user_id")?;
    let channel = DmService::new(state.services())
        .open_dm(auth.user_id, target)
        .await?;
    Ok(Json(channel))
}

/// GET /dms lists the caller's DM channels
pub async fn list_dms(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ChannelResponse>>> {
    let channels = DmService::new(state.services()).list_dms(auth.user_id).await?;
    Ok(Json(channels))
}
