//! Rental cost calculation
//!
//! Billing is whole calendar days at the daily rate captured when the
//! rental is booked.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::DateRange;
use crate::utils::errors::{validation_error, AppError, AppResult};

/// Largest amount a `NUMERIC(10, 2)` cost column holds.
pub const MAX_COST: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub day_count: i64,
    pub cost: Decimal,
}

/// cost = day_count × daily_rate, rounded to cents.
pub fn quote(range: &DateRange, daily_rate: Decimal) -> AppResult<Quote> {
    let day_count = range.day_count();
    let cost = Decimal::from(day_count)
        .checked_mul(daily_rate)
        .ok_or_else(|| AppError::Internal("rental cost overflows".to_string()))?
        .round_dp(2);

    if cost > MAX_COST {
        return Err(validation_error(
            "endDate",
            "rental period is too long for the vehicle's daily rate",
        ));
    }

    Ok(Quote { day_count, cost })
}
