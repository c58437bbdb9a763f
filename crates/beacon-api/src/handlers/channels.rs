//! Channel handlers

use axum::{
    extract::{Path, State},
    Json,
};
use beacon_service::{ChannelResponse, ChannelService, CreateChannelRequest};

use crate::extractors::{parse_id, AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /servers/:server_id/channels (owner only)
pub async fn create_channel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(server_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateChannelRequest>,
) -> ApiResult<Created<Json<ChannelResponse>>> {
    let server_id = parse_id(&server_id, "server_id")?;
    let channel = ChannelService::new(state.services())
        .create_channel(auth.user_id, server_id, request)
        .await?;
    Ok(Created(Json(channel)))
}
