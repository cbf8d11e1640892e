use sqlx::PgPool;

use tradebench_config::{AuthConfig, CorsConfig, SessionConfig};

use crate::config::database::init_db_pool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub auth_config: AuthConfig,
    pub session_config: SessionConfig,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        auth_config: AuthConfig::from_env(),
        session_config: SessionConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    }
}
