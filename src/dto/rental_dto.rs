use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Rental, RentalDetails, RentalStatus, Settlement, SettlementMethod, SettlementStatus};
use crate::services::{BookedRental, ReturnReceipt};

// Booking request; every field is optional on the wire so that missing
// values surface as validation errors rather than body rejections
#[derive(Debug, Default, Deserialize)]
pub struct BookRentalRequest {
    pub customer_id: Option<String>,
    pub vehicle_id: Option<String>,
    #[serde(rename = "startDate", alias = "start_date")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", alias = "end_date")]
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReturnRentalRequest {
    pub method: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RentalResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub customer_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub actual_return_date: Option<DateTime<Utc>>,
    pub calculated_cost: Decimal,
    pub days: i64,
    pub status: RentalStatus,
}

impl From<Rental> for RentalResponse {
    fn from(rental: Rental) -> Self {
        Self {
            days: rental.day_count(),
            id: rental.id,
            vehicle_id: rental.vehicle_id,
            customer_id: rental.customer_id,
            start_date: rental.start_date,
            end_date: rental.end_date,
            actual_return_date: rental.actual_return_date,
            calculated_cost: rental.calculated_cost,
            status: rental.status,
        }
    }
}

impl From<BookedRental> for RentalResponse {
    fn from(booked: BookedRental) -> Self {
        Self {
            days: booked.day_count,
            ..RentalResponse::from(booked.rental)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SettlementResponse {
    pub id: Uuid,
    pub rental_id: Uuid,
    pub amount: Decimal,
    pub method: SettlementMethod,
    pub status: SettlementStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Settlement> for SettlementResponse {
    fn from(s: Settlement) -> Self {
        Self {
            id: s.id,
            rental_id: s.rental_id,
            amount: s.amount,
            method: s.method,
            status: s.status,
            created_at: s.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReturnResponse {
    pub rental_id: Uuid,
    pub final_amount: Decimal,
    pub return_date: Option<DateTime<Utc>>,
    pub settlement: SettlementResponse,
}

impl From<ReturnReceipt> for ReturnResponse {
    fn from(receipt: ReturnReceipt) -> Self {
        Self {
            rental_id: receipt.rental.id,
            final_amount: receipt.settlement.amount,
            return_date: receipt.rental.actual_return_date,
            settlement: receipt.settlement.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RentalDetailsResponse {
    #[serde(flatten)]
    pub rental: RentalResponse,
    pub make: String,
    pub model: String,
    pub license_plate: String,
    pub settlement: Option<SettlementResponse>,
}

impl From<RentalDetails> for RentalDetailsResponse {
    fn from(details: RentalDetails) -> Self {
        Self {
            rental: details.rental.into(),
            make: details.make,
            model: details.model,
            license_plate: details.license_plate,
            settlement: details.settlement.map(Into::into),
        }
    }
}
