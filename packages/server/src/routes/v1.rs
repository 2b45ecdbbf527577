use axum::extract::DefaultBodyLimit;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

/// Multipart bodies may carry up to three files (image, thumbnail, document)
/// plus text fields.
fn upload_body_limit(config: &AppConfig) -> DefaultBodyLimit {
    let per_file = usize::try_from(config.storage.max_upload_size).unwrap_or(usize::MAX);
    DefaultBodyLimit::max(per_file.saturating_mul(3).saturating_add(1024 * 1024))
}

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/works", work_routes())
        .nest("/testimonials", testimonial_routes())
        .nest("/settings", setting_routes())
        .nest("/pages", page_routes())
        .routes(routes!(handlers::messages::submit_contact))
        .nest("/admin", admin_routes(config))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::logout))
        .routes(routes!(handlers::auth::me))
}

fn work_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::works::list_works))
        .routes(routes!(handlers::works::get_work))
}

fn testimonial_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::testimonials::list_public_testimonials))
}

fn setting_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::settings::list_settings))
}

fn page_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::pages::home_page))
        .routes(routes!(handlers::pages::about_page))
        .routes(routes!(handlers::pages::services_page))
        .routes(routes!(handlers::pages::works_page))
}

fn admin_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/works", admin_work_routes().layer(upload_body_limit(config)))
        .nest("/testimonials", admin_testimonial_routes())
        .nest("/messages", admin_message_routes())
        .nest("/settings", admin_setting_routes().layer(upload_body_limit(config)))
        .nest("/uploads", upload_routes().layer(upload_body_limit(config)))
        .nest("/dashboard", dashboard_routes())
}

fn admin_work_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::works::create_work))
        .routes(routes!(
            handlers::works::update_work,
            handlers::works::delete_work
        ))
}

fn admin_testimonial_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::testimonials::list_testimonials,
            handlers::testimonials::create_testimonial
        ))
        .routes(routes!(
            handlers::testimonials::update_testimonial,
            handlers::testimonials::delete_testimonial
        ))
        .routes(routes!(handlers::testimonials::toggle_approval))
}

fn admin_message_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::messages::list_messages))
        .routes(routes!(
            handlers::messages::get_message,
            handlers::messages::mark_message,
            handlers::messages::delete_message
        ))
}

fn admin_setting_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::settings::upsert_setting,
        handlers::settings::delete_setting
    ))
}

fn upload_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::uploads::upload_file))
}

fn dashboard_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::dashboard::dashboard))
}
