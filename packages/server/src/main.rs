use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{Level, info};

use venus::config::AppConfig;
use venus::state::AppState;
use venus::utils::rate_limit::LoginLimiter;
use venus::{build_cors_layer, build_router, build_store, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = database::init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;
    seed::ensure_indexes(&db).await?;
    seed::ensure_admin_profile(&db, &config.auth).await?;

    let store = build_store(&config).await?;
    let login_limiter = Arc::new(LoginLimiter::new(config.auth.login_attempts_per_minute));

    let limiter = login_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            limiter.retain_recent();
        }
    });

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server.host/server.port")?;

    let cors = if config.server.cors.allow_origins.is_empty() {
        None
    } else {
        Some(build_cors_layer(&config)?)
    };

    let state = AppState {
        db,
        config,
        store,
        login_limiter,
    };

    let mut app = build_router(state);
    if let Some(cors) = cors {
        app = app.layer(cors);
    }

    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
