use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{Rental, RentalStatus, RentalWithVehicle};
use crate::utils::errors::AppResult;

const RENTAL_COLUMNS: &str = r#"
    id, vehicle_id, customer_id, start_date, end_date, actual_return_date,
    calculated_cost, status, created_at
"#;

/// Values for a freshly booked rental
#[derive(Debug, Clone)]
pub struct NewRental {
    pub vehicle_id: Uuid,
    pub customer_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub calculated_cost: Decimal,
}

pub struct RentalRepository {
    pool: PgPool,
}

impl RentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_with_vehicle(&self, id: Uuid) -> AppResult<Option<RentalWithVehicle>> {
        let row = sqlx::query_as::<_, RentalWithVehicle>(
            r#"
            SELECT r.id, r.vehicle_id, r.customer_id, r.start_date, r.end_date,
                   r.actual_return_date, r.calculated_cost, r.status, r.created_at,
                   v.make, v.model, v.license_plate
            FROM rentals r
            JOIN vehicles v ON v.id = r.vehicle_id
            WHERE r.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Loads the rental and holds a row lock on it until the surrounding
    /// transaction ends, so a concurrent return of the same rental waits and
    /// then observes the completed state.
    pub async fn lock_by_id(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Rental>> {
        let sql = format!("SELECT {} FROM rentals WHERE id = $1 FOR UPDATE", RENTAL_COLUMNS);
        let rental = sqlx::query_as::<_, Rental>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(rental)
    }

    /// Reserved/Active rentals currently holding the vehicle.
    pub async fn find_open_for_vehicle(
        conn: &mut PgConnection,
        vehicle_id: Uuid,
    ) -> AppResult<Vec<Rental>> {
        let sql = format!(
            "SELECT {} FROM rentals WHERE vehicle_id = $1 AND status IN ('reserved', 'active') ORDER BY start_date",
            RENTAL_COLUMNS
        );
        let rentals = sqlx::query_as::<_, Rental>(&sql)
            .bind(vehicle_id)
            .fetch_all(conn)
            .await?;

        Ok(rentals)
    }

    pub async fn count_open_for_vehicle(conn: &mut PgConnection, vehicle_id: Uuid) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM rentals WHERE vehicle_id = $1 AND status IN ('reserved', 'active')",
        )
        .bind(vehicle_id)
        .fetch_one(conn)
        .await?;

        Ok(count)
    }

    pub async fn insert(conn: &mut PgConnection, new: &NewRental) -> AppResult<Rental> {
        let sql = format!(
            r#"
            INSERT INTO rentals (id, vehicle_id, customer_id, start_date, end_date, calculated_cost, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            RENTAL_COLUMNS
        );
        let rental = sqlx::query_as::<_, Rental>(&sql)
            .bind(Uuid::new_v4())
            .bind(new.vehicle_id)
            .bind(new.customer_id)
            .bind(new.start_date)
            .bind(new.end_date)
            .bind(new.calculated_cost)
            .bind(RentalStatus::Reserved)
            .fetch_one(conn)
            .await?;

        Ok(rental)
    }

    pub async fn mark_active(conn: &mut PgConnection, id: Uuid) -> AppResult<Rental> {
        let sql = format!(
            "UPDATE rentals SET status = $2 WHERE id = $1 RETURNING {}",
            RENTAL_COLUMNS
        );
        let rental = sqlx::query_as::<_, Rental>(&sql)
            .bind(id)
            .bind(RentalStatus::Active)
            .fetch_one(conn)
            .await?;

        Ok(rental)
    }

    pub async fn mark_completed(
        conn: &mut PgConnection,
        id: Uuid,
        returned_at: DateTime<Utc>,
    ) -> AppResult<Rental> {
        let sql = format!(
            "UPDATE rentals SET status = $2, actual_return_date = $3 WHERE id = $1 RETURNING {}",
            RENTAL_COLUMNS
        );
        let rental = sqlx::query_as::<_, Rental>(&sql)
            .bind(id)
            .bind(RentalStatus::Completed)
            .bind(returned_at)
            .fetch_one(conn)
            .await?;

        Ok(rental)
    }
}
