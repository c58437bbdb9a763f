//! Membership handlers

use axum::{
    extract::{Path, State},
    Json,
};
use beacon_service::{MemberResponse, MemberService};

use crate::extractors::{parse_id, AuthUser};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// PUT /servers/:server_id/members/@me (join)
pub async fn join_server(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(server_id): Path<String>,
) -> ApiResult<NoContent> {
    let server_id = parse_id(&server_id, "server_id")?;
    MemberService::new(state.services())
        .join(server_id, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// DELETE /servers/:server_id/members/@me (leave)
pub async fn leave_server(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(server_id): Path<String>,
) -> ApiResult<NoContent> {
    let server_id = parse_id(&server_id, "server_id")?;
    MemberService::new(state.services())
        .leave(server_id, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// GET /servers/:server_id/members
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(server_id): Path<String>,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    let server_id = parse_id(&server_id, "server_id")?;
    let members = MemberService::new(state.services())
        .list_members(auth.user_id, server_id)
        .await?;
    Ok(Json(members))
}
