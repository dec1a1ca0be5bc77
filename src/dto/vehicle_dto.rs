use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{VehicleListing, VehicleStatus};

/// Display value for vehicles without a recorded color
pub const UNKNOWN_COLOR: &str = "N/A";

// Query string for availability search
#[derive(Debug, Default, Deserialize)]
pub struct SearchVehiclesQuery {
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(rename = "typeId", alias = "type_id")]
    pub type_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub type_id: Option<Uuid>,
    pub type_name: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub license_plate: String,
    pub daily_rate: Decimal,
    pub status: VehicleStatus,
}

impl From<VehicleListing> for VehicleResponse {
    fn from(vehicle: VehicleListing) -> Self {
        Self {
            id: vehicle.id,
            type_id: vehicle.type_id,
            type_name: vehicle.type_name,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            color: vehicle.color.unwrap_or_else(|| UNKNOWN_COLOR.to_string()),
            license_plate: vehicle.license_plate,
            daily_rate: vehicle.daily_rate,
            status: vehicle.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VehicleSearchResponse {
    pub count: usize,
    pub vehicles: Vec<VehicleResponse>,
}
