use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::vehicle_dto::{SearchVehiclesQuery, VehicleResponse, VehicleSearchResponse};
use crate::models::DateRange;
use crate::repositories::VehicleRepository;
use crate::services::AvailabilityService;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::{optional_uuid, require_date};

pub struct VehicleController {
    availability: AvailabilityService,
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            availability: AvailabilityService::new(pool.clone()),
            repository: VehicleRepository::new(pool),
        }
    }

    /// Parses and checks a search before any database access.
    pub fn parse_search(query: &SearchVehiclesQuery) -> AppResult<(DateRange, Option<Uuid>)> {
        let start = require_date("startDate", query.start_date.as_deref())?;
        let end = require_date("endDate", query.end_date.as_deref())?;
        let range = DateRange::new(start, end)?;
        let type_id = optional_uuid("typeId", query.type_id.as_deref())?;
        Ok((range, type_id))
    }

    pub async fn search(&self, query: SearchVehiclesQuery) -> AppResult<VehicleSearchResponse> {
        let (range, type_id) = Self::parse_search(&query)?;
        let vehicles: Vec<VehicleResponse> = self
            .availability
            .find_available(range, type_id)
            .await?
            .into_iter()
            .map(VehicleResponse::from)
            .collect();

        Ok(VehicleSearchResponse {
            count: vehicles.len(),
            vehicles,
        })
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<VehicleResponse> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id))?;

        Ok(vehicle.into())
    }
}
