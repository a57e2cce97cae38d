//! User CRUD handlers: create, read, update, delete, list.

use crate::error::AppError;
use crate::extractors::{Payload, UserId};
use crate::model::UserPayload;
use crate::response::{success_created, success_ok};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub const DELETED_MESSAGE: &str = "User successfully deleted!";

/// POST /user
pub async fn create_user(
    State(state): State<AppState>,
    Payload(payload): Payload<UserPayload>,
) -> Result<impl IntoResponse, AppError> {
    let fields = RequestValidator::validate(payload)?;
    let ack = state.users.create(fields).await?;
    Ok(success_created(ack))
}

/// GET /user/:userId
pub async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<impl IntoResponse, AppError> {
    let user = state.users.get(id).await?;
    Ok(success_ok(user))
}

/// PUT /user/:userId
pub async fn edit_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    Payload(payload): Payload<UserPayload>,
) -> Result<impl IntoResponse, AppError> {
    let fields = RequestValidator::validate(payload)?;
    let user = state.users.update(id, fields).await?;
    Ok(success_ok(user))
}

/// DELETE /user/:userId
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<impl IntoResponse, AppError> {
    state.users.delete(id).await?;
    Ok(success_ok(DELETED_MESSAGE))
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state.users.list().await?;
    tracing::debug!(count = users.len(), "listed users");
    Ok(success_ok(users))
}
