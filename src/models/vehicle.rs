//! Vehicle model
//!
//! Maps the `vehicles` table. `status` is a stored cache of whether the
//! vehicle currently holds any Reserved/Active rental, plus the
//! out-of-service states managed by the fleet.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Vehicle status - maps the `vehicle_status` ENUM
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_status", rename_all = "lowercase")]
#[serde(rename_all = "PascalCase")]
pub enum VehicleStatus {
    Available,
    Rented,
    Maintenance,
    Retired,
}

impl VehicleStatus {
    /// Whether the vehicle can take bookings at all.
    pub fn is_in_service(self) -> bool {
        matches!(self, VehicleStatus::Available | VehicleStatus::Rented)
    }

    /// Status implied by the number of Reserved/Active rentals. Out-of-service
    /// states are left untouched.
    pub fn reconciled(self, open_rentals: i64) -> VehicleStatus {
        match self {
            VehicleStatus::Available | VehicleStatus::Rented if open_rentals > 0 => {
                VehicleStatus::Rented
            }
            VehicleStatus::Available | VehicleStatus::Rented => VehicleStatus::Available,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub type_id: Option<Uuid>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: Option<String>,
    pub license_plate: String,
    pub daily_rate: Decimal,
    pub status: VehicleStatus,
}

/// Vehicle joined with its category name, as listed to callers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VehicleListing {
    pub id: Uuid,
    pub type_id: Option<Uuid>,
    pub type_name: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: Option<String>,
    pub license_plate: String,
    pub daily_rate: Decimal,
    pub status: VehicleStatus,
}
