use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::models::dashboard::DashboardStats;
use crate::repo;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Dashboard",
    operation_id = "dashboardStats",
    summary = "Admin dashboard counters",
    responses(
        (status = 200, description = "Counts", body = DashboardStats),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("session" = []), ("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn dashboard(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    let db = &state.db;
    Ok(Json(DashboardStats {
        works: repo::work::count(db, false).await?,
        favorite_works: repo::work::count(db, true).await?,
        testimonials: repo::testimonial::count(db, false).await?,
        pending_testimonials: repo::testimonial::count(db, true).await?,
        messages: repo::message::count(db, false).await?,
        unread_messages: repo::message::count(db, true).await?,
    }))
}
