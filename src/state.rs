//! Shared application state
//!
//! Handed to every axum handler. Holds no mutable state of its own: all
//! coordination between requests goes through the database.

use sqlx::PgPool;

use crate::config::EnvironmentConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self { pool, config }
    }
}
