use std::sync::Arc;

use common::storage::ObjectStore;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::utils::rate_limit::LoginLimiter;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub store: Arc<dyn ObjectStore>,
    pub login_limiter: Arc<LoginLimiter>,
}
