//! Error handling
//!
//! Every failure the reservation engine can produce, and its mapping to an
//! HTTP response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// SQLSTATE codes the engine reacts to.
pub mod sqlstate {
    pub const SERIALIZATION_FAILURE: &str = "40001";
    pub const DEADLOCK_DETECTED: &str = "40P01";
    pub const EXCLUSION_VIOLATION: &str = "23P01";
    pub const FOREIGN_KEY_VIOLATION: &str = "23503";
    pub const UNIQUE_VIOLATION: &str = "23505";
}

const CUSTOMER_FOREIGN_KEY: &str = "rentals_customer_id_fkey";
const SETTLEMENT_UNIQUE_KEY: &str = "settlements_rental_id_key";

/// Application errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid range: start date {start} must be before end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Vehicle {0} is not available for booking")]
    VehicleUnavailable(Uuid),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rental {0} is already completed")]
    AlreadyCompleted(Uuid),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Store error: {0}")]
    Store(sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let classified = match &err {
            sqlx::Error::Database(db) => match db.code().as_deref() {
                Some(sqlstate::EXCLUSION_VIOLATION) => Some(AppError::Conflict(
                    "vehicle is already booked for an overlapping period".to_string(),
                )),
                Some(sqlstate::FOREIGN_KEY_VIOLATION)
                    if db.constraint() == Some(CUSTOMER_FOREIGN_KEY) =>
                {
                    Some(validation_error("customer_id", "customer does not exist"))
                }
                Some(sqlstate::UNIQUE_VIOLATION)
                    if db.constraint() == Some(SETTLEMENT_UNIQUE_KEY) =>
                {
                    Some(AppError::Conflict(
                        "a settlement already exists for this rental".to_string(),
                    ))
                }
                _ => None,
            },
            _ => None,
        };

        classified.unwrap_or(AppError::Store(err))
    }
}

impl AppError {
    /// Store failures that a fresh transaction attempt may resolve.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Store(sqlx::Error::Database(db)) => matches!(
                db.code().as_deref(),
                Some(sqlstate::SERIALIZATION_FAILURE) | Some(sqlstate::DEADLOCK_DETECTED)
            ),
            _ => false,
        }
    }

    /// Stable machine-readable code, also used as the `code` field of error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidRange { .. } => "INVALID_RANGE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::VehicleUnavailable(_) => "VEHICLE_UNAVAILABLE",
            AppError::Conflict(_) => "CONFLICT",
            AppError::AlreadyCompleted(_) => "ALREADY_COMPLETED",
            AppError::InvalidTransition(_) => "INVALID_TRANSITION",
            AppError::Store(_) => "STORE_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::VehicleUnavailable(_)
            | AppError::Conflict(_)
            | AppError::AlreadyCompleted(_)
            | AppError::InvalidTransition(_) => StatusCode::CONFLICT,
            AppError::Store(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Error body returned by the API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        let (error, message, details) = match &self {
            AppError::Validation(e) => {
                tracing::debug!("Validation error: {}", e);
                (
                    "Validation Error",
                    "The provided data is invalid".to_string(),
                    Some(json!(e)),
                )
            }
            AppError::InvalidRange { start, end } => (
                "Invalid Range",
                self.to_string(),
                Some(json!({ "startDate": start, "endDate": end })),
            ),
            AppError::NotFound(msg) => ("Not Found", msg.clone(), None),
            AppError::VehicleUnavailable(id) => (
                "Vehicle Unavailable",
                self.to_string(),
                Some(json!({ "vehicle_id": id })),
            ),
            AppError::Conflict(msg) => ("Conflict", msg.clone(), None),
            AppError::AlreadyCompleted(id) => (
                "Already Completed",
                self.to_string(),
                Some(json!({ "rental_id": id })),
            ),
            AppError::InvalidTransition(msg) => ("Invalid Transition", msg.clone(), None),
            AppError::Store(e) => {
                tracing::error!("Store error: {}", e);
                (
                    "Store Error",
                    "An error occurred while accessing the database".to_string(),
                    None,
                )
            }
            AppError::Config(msg) | AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    "Internal Server Error",
                    "An unexpected error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
            details,
            code,
        };

        (status, Json(body)).into_response()
    }
}

/// Result alias used across the crate
pub type AppResult<T> = Result<T, AppError>;

/// Builds a single-field validation error
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("invalid");
    error.message = Some(message.into());

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

pub fn not_found_error(resource: &str, id: &Uuid) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}
