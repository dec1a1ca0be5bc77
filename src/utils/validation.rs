//! Validation helpers
//!
//! Parsing of the loosely-typed identifiers and calendar dates that arrive
//! from callers into the engine's strong types.

use chrono::NaiveDate;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::utils::errors::{AppError, AppResult};

/// Parses a UUID string
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    let id = Uuid::parse_str(value.trim()).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error
    })?;

    if id.is_nil() {
        let mut error = ValidationError::new("uuid");
        error.message = Some("identifier must not be nil".into());
        return Err(error);
    }

    Ok(id)
}

/// Parses a `YYYY-MM-DD` calendar date
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

fn required(value: Option<&str>) -> Result<&str, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::new("required")),
    }
}

fn into_app_error(field: &'static str, error: ValidationError) -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    AppError::Validation(errors)
}

/// Required identifier field
pub fn require_uuid(field: &'static str, value: Option<&str>) -> AppResult<Uuid> {
    required(value)
        .and_then(validate_uuid)
        .map_err(|e| into_app_error(field, e))
}

/// Optional identifier field; blank counts as absent
pub fn optional_uuid(field: &'static str, value: Option<&str>) -> AppResult<Option<Uuid>> {
    match value {
        Some(v) if !v.trim().is_empty() => validate_uuid(v)
            .map(Some)
            .map_err(|e| into_app_error(field, e)),
        _ => Ok(None),
    }
}

/// Required calendar date field
pub fn require_date(field: &'static str, value: Option<&str>) -> AppResult<NaiveDate> {
    required(value)
        .and_then(validate_date)
        .map_err(|e| into_app_error(field, e))
}
