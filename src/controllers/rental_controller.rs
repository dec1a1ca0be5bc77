use sqlx::PgPool;
use uuid::Uuid;

use crate::config::EnvironmentConfig;
use crate::dto::rental_dto::{
    BookRentalRequest, RentalDetailsResponse, RentalResponse, ReturnRentalRequest, ReturnResponse,
};
use crate::dto::ApiResponse;
use crate::models::{DateRange, SettlementMethod};
use crate::services::{BookingRequest, ReservationService};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::{require_date, require_uuid};

pub struct RentalController {
    service: ReservationService,
}

impl RentalController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            service: ReservationService::new(pool, config),
        }
    }

    /// Turns the wire request into a booking, failing with a validation
    /// error for missing or malformed fields and `InvalidRange` for
    /// start >= end.
    pub fn parse_booking(request: &BookRentalRequest) -> AppResult<BookingRequest> {
        let customer_id = require_uuid("customer_id", request.customer_id.as_deref())?;
        let vehicle_id = require_uuid("vehicle_id", request.vehicle_id.as_deref())?;
        let start_date = require_date("startDate", request.start_date.as_deref())?;
        let end_date = require_date("endDate", request.end_date.as_deref())?;
        DateRange::new(start_date, end_date)?;

        Ok(BookingRequest {
            customer_id,
            vehicle_id,
            start_date,
            end_date,
        })
    }

    pub fn parse_method(request: Option<&ReturnRentalRequest>) -> AppResult<Option<SettlementMethod>> {
        match request.and_then(|r| r.method.as_deref()) {
            Some(raw) if !raw.trim().is_empty() => raw
                .parse()
                .map(Some)
                .map_err(|_| validation_error("method", "unsupported settlement method")),
            _ => Ok(None),
        }
    }

    pub async fn book(&self, request: BookRentalRequest) -> AppResult<ApiResponse<RentalResponse>> {
        let booking = Self::parse_booking(&request)?;
        let booked = self.service.book(booking).await?;

        Ok(ApiResponse::success_with_message(
            RentalResponse::from(booked),
            "Rental booked successfully",
        ))
    }

    pub async fn activate(&self, rental_id: &str) -> AppResult<ApiResponse<RentalResponse>> {
        let rental_id = require_uuid("rental_id", Some(rental_id))?;
        let rental = self.service.activate(rental_id).await?;

        Ok(ApiResponse::success_with_message(
            RentalResponse::from(rental),
            "Rental activated",
        ))
    }

    pub async fn return_vehicle(
        &self,
        rental_id: &str,
        request: Option<ReturnRentalRequest>,
    ) -> AppResult<ApiResponse<ReturnResponse>> {
        let rental_id: Uuid = require_uuid("rental_id", Some(rental_id))?;
        let method = Self::parse_method(request.as_ref())?;
        let receipt = self.service.return_vehicle(rental_id, method).await?;

        Ok(ApiResponse::success_with_message(
            ReturnResponse::from(receipt),
            "Vehicle returned successfully",
        ))
    }

    pub async fn get(&self, rental_id: &str) -> AppResult<RentalDetailsResponse> {
        let rental_id = require_uuid("rental_id", Some(rental_id))?;
        let details = self.service.get_rental(rental_id).await?;
        Ok(details.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;

    fn request(customer: Option<&str>, vehicle: Option<&str>, start: &str, end: &str) -> BookRentalRequest {
        BookRentalRequest {
            customer_id: customer.map(String::from),
            vehicle_id: vehicle.map(String::from),
            start_date: Some(start.to_string()),
            end_date: Some(end.to_string()),
        }
    }

    #[test]
    fn missing_identifiers_fail_validation_first() {
        let err = RentalController::parse_booking(&request(None, None, "2024-01-05", "2024-01-01")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn inverted_range_is_invalid_range() {
        let c = Uuid::new_v4().to_string();
        let v = Uuid::new_v4().to_string();
        let err = RentalController::parse_booking(&request(Some(&c), Some(&v), "2024-01-05", "2024-01-05"))
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRange { .. }));
    }

    #[test]
    fn well_formed_booking_parses() {
        let c = Uuid::new_v4();
        let v = Uuid::new_v4();
        let booking = RentalController::parse_booking(&request(
            Some(&c.to_string()),
            Some(&v.to_string()),
            "2024-01-01",
            "2024-01-04",
        ))
        .unwrap();
        assert_eq!(booking.customer_id, c);
        assert_eq!(booking.vehicle_id, v);
    }

    #[test]
    fn settlement_method_is_optional() {
        assert_eq!(RentalController::parse_method(None).unwrap(), None);
        let req = ReturnRentalRequest { method: Some("cash".into()) };
        assert_eq!(RentalController::parse_method(Some(&req)).unwrap(), Some(SettlementMethod::Cash));
        let bad = ReturnRentalRequest { method: Some("barter".into()) };
        assert!(RentalController::parse_method(Some(&bad)).is_err());
    }
}
