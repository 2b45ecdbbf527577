pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod repo;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use common::storage::ObjectStore;
use common::storage::filesystem::FilesystemObjectStore;
use tower_http::cors::CorsLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{AppConfig, StorageBackend};
use crate::extractors::auth::SESSION_COOKIE;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Venus Portfolio API",
        version = "1.0.0",
        description = "Public page data and the Venus admin panel for the portfolio site"
    ),
    tags(
        (name = "Auth", description = "Admin sign-in and sessions"),
        (name = "Pages", description = "Data for the public pages, defaults resolved"),
        (name = "Works", description = "Portfolio works: images, videos and documents"),
        (name = "Testimonials", description = "Client testimonials and approval"),
        (name = "Messages", description = "Contact form and inbox"),
        (name = "Content Settings", description = "Text and image overrides for site copy"),
        (name = "Uploads", description = "File uploads to object storage"),
        (name = "Dashboard", description = "Admin counters"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        components.add_security_scheme(
            "session",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes(&state.config))
        .split_for_parts();

    let router = if state.config.storage.backend == StorageBackend::Filesystem {
        router.route(
            "/storage/{bucket}/{*path}",
            get(handlers::storage::serve_object),
        )
    } else {
        router
    };

    router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}

/// Open the configured object store.
pub async fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn ObjectStore>> {
    let storage = &config.storage;
    let public_base = storage.public_base_url.trim_end_matches('/');

    match storage.backend {
        StorageBackend::Filesystem => {
            let store = FilesystemObjectStore::new(
                storage.root.clone().into(),
                format!("{public_base}/storage"),
                storage.max_upload_size,
            )
            .await
            .with_context(|| format!("Failed to open object store at {}", storage.root))?;
            Ok(Arc::new(store))
        }
        #[cfg(feature = "object-storage")]
        StorageBackend::S3 => {
            use common::storage::s3::{S3ObjectStore, S3Settings};

            let s3 = storage
                .s3
                .as_ref()
                .context("storage.backend is s3 but [storage.s3] is missing")?;
            let store = S3ObjectStore::new(
                S3Settings {
                    endpoint: s3.endpoint.clone(),
                    region: s3.region.clone(),
                    access_key: s3.access_key.clone(),
                    secret_key: s3.secret_key.clone(),
                    path_style: s3.path_style,
                },
                public_base,
                storage.max_upload_size,
            )?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "object-storage"))]
        StorageBackend::S3 => {
            anyhow::bail!("storage.backend is s3 but the server was built without object-storage")
        }
    }
}

/// CORS for the configured origins; cookies are allowed cross-origin.
pub fn build_cors_layer(config: &AppConfig) -> anyhow::Result<CorsLayer> {
    let cors = &config.server.cors;
    let origins = cors
        .allow_origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(cors.max_age)))
}
