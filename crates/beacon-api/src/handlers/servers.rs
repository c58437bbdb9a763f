//! Server handlers

use axum::{
    extract::{Path, State},
    Json,
};
use beacon_service::{
    CreateServerRequest, ServerResponse, ServerService, ServerTreeResponse, UpdateServerRequest,
};

use crate::extractors::{parse_id, AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /servers
pub async fn create_server(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateServerRequest>,
) -> ApiResult<Created<Json<ServerResponse>>> {
    let server = ServerService::new(state.services())
        .create_server(auth.user_id, request)
        .await?;
    Ok(Created(Json(server)))
}

/// GET /servers/:server_id returns the category/channel tree
pub async fn get_server(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(server_id): Path<String>,
) -> ApiResult<Json<ServerTreeResponse>> {
    let server_id = parse_id(&server_id, "server_id")?;
    let tree = ServerService::new(state.services())
        .get_server(auth.user_id, server_id)
        .await?;
    Ok(Json(tree))
}

/// PATCH /servers/:server_id (owner only)
pub async fn update_server(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(server_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateServerRequest>,
) -> ApiResult<Json<ServerResponse>> {
    let server_id = parse_id(&server_id, "server_id")?;
    let server = ServerService::new(state.services())
        .update_server(auth.user_id, server_id, request)
        .await?;
    Ok(Json(server))
}

/// GET /servers lists the caller's servers
pub async fn list_servers(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ServerResponse>>> {
    let servers = ServerService::new(state.services())
        .list_servers(auth.user_id)
        .await?;
    Ok(Json(servers))
}
