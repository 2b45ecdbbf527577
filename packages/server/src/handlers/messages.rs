use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sea_orm::Set;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::message;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::models::message::{
    ContactRequest, MarkReadRequest, MessageListQuery, MessageListResponse, MessageResponse,
};
use crate::models::shared::{ActionResponse, StatusResponse, parse_id};
use crate::repo;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/contact",
    tag = "Messages",
    operation_id = "submitContactMessage",
    summary = "Send a message through the contact form",
    description = "Fields are checked in order (name, email, message); the first failure is \
        reported.",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message stored", body = StatusResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn submit_contact(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = payload.validate()?;

    let saved = repo::message::insert(
        &state.db,
        message::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            email: Set(input.email),
            message: Set(input.message),
            read: Set(false),
            created_at: Set(Utc::now()),
        },
    )
    .await?;

    tracing::info!(message_id = %saved.id, "Contact message received");
    Ok((
        StatusCode::CREATED,
        Json(StatusResponse::ok("Your message has been sent successfully!")),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Messages",
    operation_id = "listMessages",
    summary = "List contact messages",
    params(MessageListQuery),
    responses(
        (status = 200, description = "Messages, newest first", body = MessageListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("session" = []), ("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn list_messages(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<MessageListQuery>,
) -> Result<Json<MessageListResponse>, AppError> {
    let rows = repo::message::list(&state.db, query.unread.unwrap_or(false)).await?;
    let unread = repo::message::count(&state.db, true).await?;
    let total = rows.len() as u64;

    Ok(Json(MessageListResponse {
        messages: rows.into_iter().map(MessageResponse::from).collect(),
        total,
        unread,
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Messages",
    operation_id = "getMessage",
    summary = "Get a contact message",
    params(("id" = String, Path, description = "Message ID (UUID)")),
    responses(
        (status = 200, description = "Message", body = MessageResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Message not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("session" = []), ("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn get_message(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id, "message")?;
    Ok(Json(repo::message::find(&state.db, id).await?.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Messages",
    operation_id = "markMessage",
    summary = "Mark a message read or unread",
    params(("id" = String, Path, description = "Message ID (UUID)")),
    request_body = MarkReadRequest,
    responses(
        (status = 200, description = "Flag set", body = ActionResponse<MessageResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Message not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("session" = []), ("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn mark_message(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<MarkReadRequest>,
) -> Result<Json<ActionResponse<MessageResponse>>, AppError> {
    let id = parse_id(&id, "message")?;
    let saved = repo::message::set_read(&state.db, id, payload.read).await?;
    let message = if payload.read {
        "Message marked as read"
    } else {
        "Message marked as unread"
    };
    Ok(Json(ActionResponse::with_data(
        message,
        MessageResponse::from(saved),
    )))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Messages",
    operation_id = "deleteMessage",
    summary = "Delete a contact message",
    params(("id" = String, Path, description = "Message ID (UUID)")),
    responses(
        (status = 200, description = "Message deleted", body = StatusResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Message not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("session" = []), ("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn delete_message(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    let id = parse_id(&id, "message")?;
    if !repo::message::delete(&state.db, id).await? {
        return Err(AppError::NotFound("Message not found".into()));
    }
    Ok(Json(StatusResponse::ok("Message deleted successfully")))
}
