//! Database configuration
//!
//! PostgreSQL pool settings. The statement and lock timeouts are applied to
//! every pooled connection and bound how long any booking or return can wait
//! on another transaction.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::environment::parse_var;
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub statement_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            statement_timeout: Duration::from_millis(5000),
        }
    }

    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .ok_or_else(|| AppError::Config("DATABASE_URL must be set".to_string()))?;
        let defaults = Self::new(url);

        let max_connections =
            parse_var(&lookup, "DATABASE_MAX_CONNECTIONS", defaults.max_connections)?;
        let min_connections =
            parse_var(&lookup, "DATABASE_MIN_CONNECTIONS", defaults.min_connections)?;
        if min_connections > max_connections {
            return Err(AppError::Config(
                "DATABASE_MIN_CONNECTIONS exceeds DATABASE_MAX_CONNECTIONS".to_string(),
            ));
        }

        let acquire_secs = parse_var(
            &lookup,
            "DATABASE_ACQUIRE_TIMEOUT_SECS",
            defaults.acquire_timeout.as_secs(),
        )?;
        let statement_ms = parse_var(
            &lookup,
            "DATABASE_STATEMENT_TIMEOUT_MS",
            defaults.statement_timeout.as_millis() as u64,
        )?;

        Ok(Self {
            max_connections,
            min_connections,
            acquire_timeout: Duration::from_secs(acquire_secs),
            statement_timeout: Duration::from_millis(statement_ms),
            ..defaults
        })
    }

    fn connect_options(&self) -> AppResult<PgConnectOptions> {
        let timeout_ms = self.statement_timeout.as_millis().to_string();
        let options = PgConnectOptions::from_str(&self.url)
            .map_err(|e| AppError::Config(format!("DATABASE_URL is invalid: {}", e)))?
            .options([
                ("statement_timeout", timeout_ms.as_str()),
                ("lock_timeout", timeout_ms.as_str()),
            ]);
        Ok(options)
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
    }

    pub async fn create_pool(&self) -> AppResult<PgPool> {
        let pool = self.pool_options().connect_with(self.connect_options()?).await?;
        Ok(pool)
    }

    /// Pool that opens connections on first use.
    pub fn create_lazy_pool(&self) -> AppResult<PgPool> {
        Ok(self.pool_options().connect_lazy_with(self.connect_options()?))
    }
}
