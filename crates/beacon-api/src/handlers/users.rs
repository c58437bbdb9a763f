//! User handlers

use axum::{
    extract::{Path, State},
    Json,
};
use beacon_service::{UpdateUserRequest, UserResponse, UserService};

use crate::extractors::{parse_id, AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /users/@me
pub async fn get_me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserResponse>> {
    let user = UserService::new(state.services()).get_user(auth.user_id).await?;
    Ok(Json(user))
}

/// PATCH /users/@me
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::new(state.services())
        .update_profile(auth.user_id, request)
        .await?;
    Ok(Json(user))
}

/// GET /users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = parse_id(&user_id, "user_id")?;
    let user = UserService::new(state.services()).get_user(user_id).await?;
    Ok(Json(user))
}
