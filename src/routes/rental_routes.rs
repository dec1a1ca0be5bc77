use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::RentalController;
use crate::dto::rental_dto::{
    BookRentalRequest, RentalDetailsResponse, RentalResponse, ReturnRentalRequest, ReturnResponse,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::{validation_error, AppError};

pub fn create_rental_router() -> Router<AppState> {
    Router::new()
        .route("/book", post(book_rental))
        .route("/return/:id", put(return_rental))
        .route("/:id/activate", put(activate_rental))
        .route("/:id", get(get_rental))
}

async fn book_rental(
    State(state): State<AppState>,
    payload: Result<Json<BookRentalRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<RentalResponse>>), AppError> {
    let Json(request) =
        payload.map_err(|_| validation_error("body", "request body must be a JSON object"))?;
    let controller = RentalController::new(state.pool.clone(), &state.config);
    let response = controller.book(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn activate_rental(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RentalResponse>>, AppError> {
    let controller = RentalController::new(state.pool.clone(), &state.config);
    let response = controller.activate(&id).await?;
    Ok(Json(response))
}

async fn return_rental(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ApiResponse<ReturnResponse>>, AppError> {
    let request = parse_return_body(&body)?;
    let controller = RentalController::new(state.pool.clone(), &state.config);
    let response = controller.return_vehicle(&id, request).await?;
    Ok(Json(response))
}

/// The return body is optional; anything present must be a valid request.
fn parse_return_body(body: &[u8]) -> Result<Option<ReturnRentalRequest>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|_| validation_error("body", "request body must be a JSON object"))
}

async fn get_rental(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RentalDetailsResponse>>, AppError> {
    let controller = RentalController::new(state.pool.clone(), &state.config);
    let response = controller.get(&id).await?;
    Ok(Json(ApiResponse::success(response)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_return_body_uses_default_method() {
        assert!(parse_return_body(b"").unwrap().is_none());
        assert!(parse_return_body(b"  \n").unwrap().is_none());
    }

    #[test]
    fn return_body_with_method_is_parsed() {
        let request = parse_return_body(br#"{"method": "cash"}"#).unwrap().unwrap();
        assert_eq!(request.method.as_deref(), Some("cash"));
    }

    #[test]
    fn malformed_return_body_is_rejected() {
        assert!(matches!(parse_return_body(br#"{"method": 5}"#), Err(AppError::Validation(_))));
        assert!(matches!(parse_return_body(b"{\"method\""), Err(AppError::Validation(_))));
        assert!(matches!(parse_return_body(b"method=cash"), Err(AppError::Validation(_))));
    }
}
