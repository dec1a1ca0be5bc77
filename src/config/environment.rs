//! Environment configuration
//!
//! Server, CORS and reservation-engine settings read from environment
//! variables (optionally loaded from `.env`).

use std::env;
use std::str::FromStr;

use crate::models::SettlementMethod;
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    /// Empty means any origin is accepted.
    pub cors_origins: Vec<String>,
    /// Attempts per booking/return transaction when the store reports a
    /// serialization failure or deadlock.
    pub booking_max_retries: u32,
    pub default_settlement_method: SettlementMethod,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
            booking_max_retries: 3,
            default_settlement_method: SettlementMethod::CreditCard,
        }
    }
}

impl EnvironmentConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let booking_max_retries: u32 =
            parse_var(&lookup, "BOOKING_MAX_RETRIES", defaults.booking_max_retries)?;
        if booking_max_retries == 0 {
            return Err(AppError::Config(
                "BOOKING_MAX_RETRIES must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            cors_origins,
            booking_max_retries,
            default_settlement_method: parse_var(
                &lookup,
                "SETTLEMENT_METHOD",
                defaults.default_settlement_method,
            )?,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses an optional variable, falling back to `default` when unset.
pub(crate) fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} is invalid: {}", key, e))),
        None => Ok(default),
    }
}
