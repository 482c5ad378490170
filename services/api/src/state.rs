//! Application state shared across handlers

use std::sync::Arc;

use auth::SessionManager;
use sqlx::PgPool;

use crate::config::AppConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub sessions: SessionManager,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db_pool: PgPool, sessions: SessionManager, config: AppConfig) -> Self {
        Self {
            db_pool,
            sessions,
            config: Arc::new(config),
        }
    }
}
