//! Message handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use beacon_service::{
    CreateMessageRequest, ListMessagesQuery, MessageResponse, MessageService, UpdateMessageRequest,
};

use crate::extractors::{parse_id, AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /channels/:channel_id/messages
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
    Query(query): Query<ListMessagesQuery>,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let channel_id = parse_id(&channel_id, "channel_id")?;
    let messages = MessageService::new(state.services())
        .list(channel_id, auth.user_id, query)
        .await?;
    Ok(Json(messages))
}

/// POST /channels/:channel_id/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let channel_id = parse_id(&channel_id, "channel_id")?;
    let message = MessageService::new(state.services())
        .send(channel_id, auth.user_id, request)
        .await?;
    Ok(Created(Json(message)))
}

/// PATCH /channels/:channel_id/messages/:message_id
pub async fn edit_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((channel_id, message_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<UpdateMessageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let channel_id = parse_id(&channel_id, "channel_id")?;
    let message_id = parse_id(&message_id, "message_id")?;
    let message = MessageService::new(state.services())
        .edit(channel_id, message_id, auth.user_id, request)
        .await?;
    Ok(Json(message))
}

/// DELETE /channels/:channel_id/messages/:message_id
pub async fn delete_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((channel_id, message_id)): Path<(String, String)>,
) -> ApiResult<NoContent> {
    let channel_id = parse_id(&channel_id, "channel_id")?;
    let message_id = parse_id(&message_id, "message_id")?;
    MessageService::new(state.services())
        .delete(channel_id, message_id, auth.user_id)
        .await?;
    Ok(NoContent)
}
