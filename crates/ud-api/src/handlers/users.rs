//! Users API handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use ud_core::UdError;
use ud_models::UserFormData;

use crate::error::ApiResult;
use crate::routes::AppState;

/// List users
///
/// GET /users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let users = state.service.get_all().await?;
    Ok(Json(users))
}

/// Get a single user
///
/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .service
        .get_by_id(&id)
        .await?
        .ok_or_else(|| UdError::not_found("User", id))?;
    Ok(Json(user))
}

/// Create a user
///
/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserFormData>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(data) = payload?;
    let user = state.service.create(data).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Replace a user
///
/// PUT /users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserFormData>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(data) = payload?;
    let user = state.service.update(&id, data).await?;
    Ok(Json(user))
}

/// Delete a user; unknown ids succeed too
///
/// DELETE /users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
