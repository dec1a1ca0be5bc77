use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{DateRange, Vehicle, VehicleListing, VehicleStatus};
use crate::utils::errors::AppResult;

const LISTING_COLUMNS: &str = r#"
    v.id, v.type_id, vt.type_name, v.make, v.model, v.year, v.color,
    v.license_plate, v.daily_rate, v.status
"#;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<VehicleListing>> {
        let sql = format!(
            "SELECT {} FROM vehicles v LEFT JOIN vehicle_types vt ON vt.id = v.type_id WHERE v.id = $1",
            LISTING_COLUMNS
        );
        let vehicle = sqlx::query_as::<_, VehicleListing>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// In-service vehicles with no Reserved/Active rental overlapping `range`,
    /// cheapest first.
    pub async fn find_available(
        &self,
        range: &DateRange,
        type_id: Option<Uuid>,
    ) -> AppResult<Vec<VehicleListing>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM vehicles v
            LEFT JOIN vehicle_types vt ON vt.id = v.type_id
            WHERE v.status IN ('available', 'rented')
              AND NOT EXISTS (
                  SELECT 1
                  FROM rentals r
                  WHERE r.vehicle_id = v.id
                    AND r.status IN ('reserved', 'active')
                    AND r.start_date <= $2
                    AND r.end_date >= $1
              )
              AND ($3::uuid IS NULL OR v.type_id = $3)
            ORDER BY v.daily_rate ASC, v.id ASC
            "#,
            LISTING_COLUMNS
        );
        let vehicles = sqlx::query_as::<_, VehicleListing>(&sql)
            .bind(range.start())
            .bind(range.end())
            .bind(type_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    /// Loads the vehicle row and holds a row lock on it until the surrounding
    /// transaction ends. Concurrent bookings of the same vehicle queue here.
    pub async fn lock_by_id(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, type_id, make, model, year, color, license_plate, daily_rate, status
            FROM vehicles
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(vehicle)
    }

    pub async fn set_status(
        conn: &mut PgConnection,
        id: Uuid,
        status: VehicleStatus,
    ) -> AppResult<()> {
        sqlx::query("UPDATE vehicles SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(conn)
            .await?;

        Ok(())
    }
}
