use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::VehicleController;
use crate::dto::vehicle_dto::{SearchVehiclesQuery, VehicleResponse, VehicleSearchResponse};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::require_uuid;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_vehicles))
        .route("/:id", get(get_vehicle))
}

async fn search_vehicles(
    State(state): State<AppState>,
    Query(query): Query<SearchVehiclesQuery>,
) -> Result<Json<ApiResponse<VehicleSearchResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.search(query).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let id = require_uuid("vehicle_id", Some(&id))?;
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(response)))
}
