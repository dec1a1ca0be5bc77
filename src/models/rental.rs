//! Rental model and its lifecycle
//!
//! Reserved -> Active -> Completed, with Reserved -> Completed allowed
//! directly. Completed is terminal.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::models::date_range::{days_between, DateRange};
use crate::models::settlement::Settlement;
use crate::utils::errors::{AppError, AppResult};

/// Rental status - maps the `rental_status` ENUM
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "rental_status", rename_all = "lowercase")]
#[serde(rename_all = "PascalCase")]
pub enum RentalStatus {
    Reserved,
    Active,
    Completed,
}

impl RentalStatus {
    /// Reserved and Active rentals hold their vehicle for the booked period.
    pub fn holds_vehicle(self) -> bool {
        matches!(self, RentalStatus::Reserved | RentalStatus::Active)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rental {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub customer_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub actual_return_date: Option<DateTime<Utc>>,
    pub calculated_cost: Decimal,
    pub status: RentalStatus,
    pub created_at: DateTime<Utc>,
}

impl Rental {
    pub fn period(&self) -> AppResult<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }

    pub fn day_count(&self) -> i64 {
        days_between(self.start_date, self.end_date)
    }

    /// Pick-up: only a Reserved rental may become Active.
    pub fn ensure_can_activate(&self) -> AppResult<()> {
        match self.status {
            RentalStatus::Reserved => Ok(()),
            RentalStatus::Active => Err(AppError::InvalidTransition(format!(
                "rental {} is already active",
                self.id
            ))),
            RentalStatus::Completed => Err(AppError::AlreadyCompleted(self.id)),
        }
    }

    /// Return: any non-terminal rental may complete.
    pub fn ensure_can_complete(&self) -> AppResult<()> {
        match self.status {
            RentalStatus::Reserved | RentalStatus::Active => Ok(()),
            RentalStatus::Completed => Err(AppError::AlreadyCompleted(self.id)),
        }
    }
}

/// Rental joined with the vehicle it holds
#[derive(Debug, Clone, FromRow)]
pub struct RentalWithVehicle {
    #[sqlx(flatten)]
    pub rental: Rental,
    pub make: String,
    pub model: String,
    pub license_plate: String,
}

/// Everything known about a rental, including its settlement once returned
#[derive(Debug, Clone)]
pub struct RentalDetails {
    pub rental: Rental,
    pub make: String,
    pub model: String,
    pub license_plate: String,
    pub settlement: Option<Settlement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rental(status: RentalStatus) -> Rental {
        Rental {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            actual_return_date: None,
            calculated_cost: Decimal::new(15000, 2),
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn reserved_can_activate_or_complete() {
        let r = rental(RentalStatus::Reserved);
        assert!(r.ensure_can_activate().is_ok());
        assert!(r.ensure_can_complete().is_ok());
    }

    #[test]
    fn active_can_only_complete() {
        let r = rental(RentalStatus::Active);
        assert!(matches!(r.ensure_can_activate(), Err(AppError::InvalidTransition(_))));
        assert!(r.ensure_can_complete().is_ok());
    }

    #[test]
    fn completed_is_terminal() {
        let r = rental(RentalStatus::Completed);
        assert!(matches!(r.ensure_can_activate(), Err(AppError::AlreadyCompleted(id)) if id == r.id));
        assert!(matches!(r.ensure_can_complete(), Err(AppError::AlreadyCompleted(id)) if id == r.id));
        assert!(!r.status.holds_vehicle());
    }

    #[test]
    fn period_and_day_count_come_from_dates() {
        let r = rental(RentalStatus::Reserved);
        assert_eq!(r.day_count(), 3);
        assert_eq!(r.period().unwrap().day_count(), 3);
    }

    #[test]
    fn day_count_matches_period_across_month_end() {
        let mut r = rental(RentalStatus::Active);
        r.start_date = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        r.end_date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(r.day_count(), 4);
        assert_eq!(r.day_count(), r.period().unwrap().day_count());
    }
}
