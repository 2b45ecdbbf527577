use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::AppError;
use crate::models::content_setting::resolve;
use crate::models::pages::{ContentPage, HOME_FAVORITES_LIMIT, HomePage, WorksPage};
use crate::models::testimonial::TestimonialResponse;
use crate::models::work::{WorkListQuery, WorkResponse};
use crate::repo;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/home",
    tag = "Pages",
    operation_id = "homePage",
    summary = "Data for the home page",
    description = "Resolved `home_*` copy, up to six renderable favourite works and the approved \
        testimonials, both newest first.",
    responses((status = 200, description = "Home page data", body = HomePage)),
)]
#[instrument(skip(state))]
pub async fn home_page(State(state): State<AppState>) -> Result<Json<HomePage>, AppError> {
    let stored = repo::content_setting::map(&state.db).await?;
    let favorites = repo::work::renderable_favorites(&state.db, HOME_FAVORITES_LIMIT).await?;
    let testimonials = repo::testimonial::list(&state.db, true).await?;

    Ok(Json(HomePage {
        content: resolve("home_", &stored),
        favorites: favorites.into_iter().map(WorkResponse::from).collect(),
        testimonials: testimonials
            .into_iter()
            .map(TestimonialResponse::from)
            .collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/about",
    tag = "Pages",
    operation_id = "aboutPage",
    summary = "Data for the about page",
    responses((status = 200, description = "Resolved `about_me_*` copy", body = ContentPage)),
)]
#[instrument(skip(state))]
pub async fn about_page(State(state): State<AppState>) -> Result<Json<ContentPage>, AppError> {
    let stored = repo::content_setting::map(&state.db).await?;
    Ok(Json(ContentPage {
        content: resolve("about_me_", &stored),
    }))
}

#[utoipa::path(
    get,
    path = "/services",
    tag = "Pages",
    operation_id = "servicesPage",
    summary = "Data for the services page",
    responses((status = 200, description = "Resolved `services_*` copy", body = ContentPage)),
)]
#[instrument(skip(state))]
pub async fn services_page(State(state): State<AppState>) -> Result<Json<ContentPage>, AppError> {
    let stored = repo::content_setting::map(&state.db).await?;
    Ok(Json(ContentPage {
        content: resolve("services_", &stored),
    }))
}

#[utoipa::path(
    get,
    path = "/works",
    tag = "Pages",
    operation_id = "worksPage",
    summary = "Data for the works gallery",
    responses((status = 200, description = "All works and their categories", body = WorksPage)),
)]
#[instrument(skip(state))]
pub async fn works_page(State(state): State<AppState>) -> Result<Json<WorksPage>, AppError> {
    let works = repo::work::list(&state.db, &WorkListQuery::default()).await?;
    let categories = repo::work::categories(&state.db).await?;
    Ok(Json(WorksPage {
        works: works.into_iter().map(WorkResponse::from).collect(),
        categories,
    }))
}
