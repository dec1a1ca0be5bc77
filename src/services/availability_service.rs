//! Availability index
//!
//! Answers which vehicles are free for a whole date range. The answer is
//! advisory: bookings re-check conflicts under a row lock.

use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::models::{DateRange, Rental, VehicleListing};
use crate::repositories::VehicleRepository;
use crate::utils::errors::AppResult;

pub struct AvailabilityService {
    vehicles: VehicleRepository,
}

impl AvailabilityService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool),
        }
    }

    /// Vehicles free for the whole of `range`, ordered by ascending daily rate.
    pub async fn find_available(
        &self,
        range: DateRange,
        type_id: Option<Uuid>,
    ) -> AppResult<Vec<VehicleListing>> {
        let vehicles = self.vehicles.find_available(&range, type_id).await?;
        debug!(
            start = %range.start(),
            end = %range.end(),
            found = vehicles.len(),
            "availability query"
        );
        Ok(vehicles)
    }
}

/// First rental in `holding` whose period overlaps `requested`.
pub fn first_conflict<'a>(requested: &DateRange, holding: &'a [Rental]) -> AppResult<Option<&'a Rental>> {
    for rental in holding.iter().filter(|r| r.status.holds_vehicle()) {
        if rental.period()?.overlaps(requested) {
            return Ok(Some(rental));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RentalStatus;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn rental(start: NaiveDate, end: NaiveDate, status: RentalStatus) -> Rental {
        Rental {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::nil(),
            customer_id: Uuid::nil(),
            start_date: start,
            end_date: end,
            actual_return_date: None,
            calculated_cost: Decimal::ZERO,
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn boundary_day_conflicts() {
        let held = vec![rental(d(1, 1), d(1, 5), RentalStatus::Reserved)];

        let touching = DateRange::new(d(1, 5), d(1, 10)).unwrap();
        assert_eq!(first_conflict(&touching, &held).unwrap().map(|r| r.id), Some(held[0].id));

        let after = DateRange::new(d(1, 6), d(1, 10)).unwrap();
        assert!(first_conflict(&after, &held).unwrap().is_none());
    }

    #[test]
    fn completed_rentals_never_conflict() {
        let held = vec![rental(d(1, 1), d(1, 5), RentalStatus::Completed)];
        let same = DateRange::new(d(1, 1), d(1, 5)).unwrap();
        assert!(first_conflict(&same, &held).unwrap().is_none());
    }

    #[test]
    fn active_rentals_conflict() {
        let held = vec![
            rental(d(2, 1), d(2, 3), RentalStatus::Reserved),
            rental(d(3, 1), d(3, 9), RentalStatus::Active),
        ];
        let inside = DateRange::new(d(3, 4), d(3, 5)).unwrap();
        assert_eq!(first_conflict(&inside, &held).unwrap().map(|r| r.id), Some(held[1].id));
    }
}
