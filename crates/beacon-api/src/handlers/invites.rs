//! Invite handlers

use axum::{
    extract::{Path, State},
    Json,
};
use beacon_service::{CreateInviteRequest, InviteResponse, InviteService, InviteSummaryResponse};

use crate::extractors::{parse_id, AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// POST /servers/:server_id/invites (members only)
pub async fn create_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(server_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateInviteRequest>,
) -> ApiResult<Created<Json<InviteResponse>>> {
    let server_id = parse_id(&server_id, "server_id")?;
    let invite = InviteService::new(state.services())
        .create_invite(auth.user_id, server_id, request)
        .await?;
    Ok(Created(Json(invite)))
}

/// GET /invites/:code, a server summary for anyone holding the code
pub async fn lookup_invite(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(code): Path<String>,
) -> ApiResult<Json<InviteSummaryResponse>> {
    let summary = InviteService::new(state.services()).lookup(&code).await?;
    Ok(Json(summary))
}

/// POST /invites/:code redeems the code, joining its server
pub async fn redeem_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(code): Path<String>,
) -> ApiResult<NoContent> {
    InviteService::new(state.services())
        .redeem(&code, auth.user_id)
        .await?;
    Ok(NoContent)
}
