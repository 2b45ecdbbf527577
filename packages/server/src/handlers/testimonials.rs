use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sea_orm::Set;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::testimonial;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::models::shared::{ActionResponse, StatusResponse, parse_id};
use crate::models::testimonial::{
    TestimonialListResponse, TestimonialRequest, TestimonialResponse, ToggleApprovalRequest,
};
use crate::repo;
use crate::state::AppState;

fn to_list(rows: Vec<testimonial::Model>) -> TestimonialListResponse {
    let total = rows.len() as u64;
    TestimonialListResponse {
        testimonials: rows.into_iter().map(TestimonialResponse::from).collect(),
        total,
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Testimonials",
    operation_id = "listApprovedTestimonials",
    summary = "List approved testimonials",
    responses((status = 200, description = "Approved testimonials, newest first", body = TestimonialListResponse)),
)]
#[instrument(skip(state))]
pub async fn list_public_testimonials(
    State(state): State<AppState>,
) -> Result<Json<TestimonialListResponse>, AppError> {
    Ok(Json(to_list(repo::testimonial::list(&state.db, true).await?)))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Testimonials",
    operation_id = "listTestimonials",
    summary = "List all testimonials",
    responses(
        (status = 200, description = "All testimonials, newest first", body = TestimonialListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("session" = []), ("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn list_testimonials(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<TestimonialListResponse>, AppError> {
    Ok(Json(to_list(repo::testimonial::list(&state.db, false).await?)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Testimonials",
    operation_id = "createTestimonial",
    summary = "Add a testimonial",
    description = "New testimonials are unapproved unless `approved` is set.",
    request_body = TestimonialRequest,
    responses(
        (status = 201, description = "Testimonial added", body = ActionResponse<TestimonialResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("session" = []), ("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn create_testimonial(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<TestimonialRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = payload.validate()?;
    let now = Utc::now();

    let saved = repo::testimonial::insert(
        &state.db,
        testimonial::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            role: Set(input.role),
            text: Set(input.text),
            rating: Set(input.rating),
            approved: Set(input.approved),
            created_at: Set(now),
            updated_at: Set(now),
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::with_data(
            "Testimonial added successfully",
            TestimonialResponse::from(saved),
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Testimonials",
    operation_id = "updateTestimonial",
    summary = "Update a testimonial",
    description = "Replaces name, role, text and rating. `approved` is changed only when sent.",
    params(("id" = String, Path, description = "Testimonial ID (UUID)")),
    request_body = TestimonialRequest,
    responses(
        (status = 200, description = "Testimonial updated", body = ActionResponse<TestimonialResponse>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Testimonial not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("session" = []), ("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn update_testimonial(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<TestimonialRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "testimonial")?;
    let approved = payload.approved;
    let input = payload.validate()?;
    let existing = repo::testimonial::find(&state.db, id).await?;

    let mut active: testimonial::ActiveModel = existing.into();
    active.name = Set(input.name);
    active.role = Set(input.role);
    active.text = Set(input.text);
    active.rating = Set(input.rating);
    if let Some(approved) = approved {
        active.approved = Set(approved);
    }
    active.updated_at = Set(Utc::now());

    let saved = repo::testimonial::update(&state.db, active).await?;
    Ok(Json(ActionResponse::with_data(
        "Testimonial updated successfully",
        TestimonialResponse::from(saved),
    )))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Testimonials",
    operation_id = "deleteTestimonial",
    summary = "Delete a testimonial",
    params(("id" = String, Path, description = "Testimonial ID (UUID)")),
    responses(
        (status = 200, description = "Testimonial deleted", body = StatusResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Testimonial not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("session" = []), ("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn delete_testimonial(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    let id = parse_id(&id, "testimonial")?;
    if !repo::testimonial::delete(&state.db, id).await? {
        return Err(AppError::NotFound("Testimonial not found".into()));
    }
    Ok(Json(StatusResponse::ok("Testimonial deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/{id}/toggle-approval",
    tag = "Testimonials",
    operation_id = "toggleTestimonialApproval",
    summary = "Approve or un-approve a testimonial",
    description = "`current` is the approval flag the client last saw. The flag is flipped only \
        if it still has that value; otherwise nothing changes and 409 is returned so the client \
        can refresh.",
    params(("id" = String, Path, description = "Testimonial ID (UUID)")),
    request_body = ToggleApprovalRequest,
    responses(
        (status = 200, description = "Flag flipped", body = ActionResponse<TestimonialResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Testimonial not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Flag changed concurrently (CONFLICT)", body = ErrorBody),
    ),
    security(("session" = []), ("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn toggle_approval(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<ToggleApprovalRequest>,
) -> Result<Json<ActionResponse<TestimonialResponse>>, AppError> {
    let id = parse_id(&id, "testimonial")?;
    let approved = repo::testimonial::toggle_approval(&state.db, id, payload.current).await?;
    let saved = repo::testimonial::find(&state.db, id).await?;

    let message = if approved {
        "Testimonial approved"
    } else {
        "Testimonial unapproved"
    };
    Ok(Json(ActionResponse::with_data(
        message,
        TestimonialResponse::from(saved),
    )))
}
