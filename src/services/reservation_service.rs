//! Reservation engine
//!
//! Owns the rental lifecycle: booking, pick-up and return. Each operation is
//! a single database transaction. Exclusivity between concurrent bookings
//! comes from the row lock taken on the vehicle before the overlap check;
//! concurrent returns of one rental serialize on the rental's row lock.

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::config::EnvironmentConfig;
use crate::database::{run_in_transaction, RetryPolicy};
use crate::models::{DateRange, Rental, RentalDetails, Settlement, SettlementMethod};
use crate::repositories::{NewRental, RentalRepository, SettlementRepository, VehicleRepository};
use crate::services::availability_service::first_conflict;
use crate::services::pricing;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};

#[derive(Debug, Clone, Copy)]
pub struct BookingRequest {
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct BookedRental {
    pub rental: Rental,
    pub day_count: i64,
}

#[derive(Debug, Clone)]
pub struct ReturnReceipt {
    pub rental: Rental,
    pub settlement: Settlement,
}

pub struct ReservationService {
    pool: PgPool,
    rentals: RentalRepository,
    settlements: SettlementRepository,
    retry: RetryPolicy,
    default_method: SettlementMethod,
}

impl ReservationService {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            rentals: RentalRepository::new(pool.clone()),
            settlements: SettlementRepository::new(pool.clone()),
            pool,
            retry: RetryPolicy::new(config.booking_max_retries),
            default_method: config.default_settlement_method,
        }
    }

    /// Books `vehicle_id` for `customer_id` over the inclusive date range.
    ///
    /// Checks run in order: identifiers, range, vehicle existence, vehicle in
    /// service, overlap with Reserved/Active rentals. The last three, the
    /// rental insert and the vehicle status update share one transaction.
    pub async fn book(&self, request: BookingRequest) -> AppResult<BookedRental> {
        if request.customer_id.is_nil() {
            return Err(validation_error("customer_id", "customer identifier is required"));
        }
        if request.vehicle_id.is_nil() {
            return Err(validation_error("vehicle_id", "vehicle identifier is required"));
        }
        let range = DateRange::new(request.start_date, request.end_date)?;
        let BookingRequest {
            customer_id,
            vehicle_id,
            ..
        } = request;

        let outcome = run_in_transaction(&self.pool, self.retry, "book", move |tx| {
            Box::pin(async move {
                let vehicle = VehicleRepository::lock_by_id(&mut **tx, vehicle_id)
                    .await?
                    .ok_or_else(|| not_found_error("Vehicle", &vehicle_id))?;

                if !vehicle.status.is_in_service() {
                    return Err(AppError::VehicleUnavailable(vehicle_id));
                }

                let holding = RentalRepository::find_open_for_vehicle(&mut **tx, vehicle_id).await?;
                if let Some(existing) = first_conflict(&range, &holding)? {
                    return Err(AppError::Conflict(format!(
                        "vehicle {} is already booked from {} to {} (rental {})",
                        vehicle_id, existing.start_date, existing.end_date, existing.id
                    )));
                }

                let quote = pricing::quote(&range, vehicle.daily_rate)?;
                let rental = RentalRepository::insert(
                    &mut **tx,
                    &NewRental {
                        vehicle_id,
                        customer_id,
                        start_date: range.start(),
                        end_date: range.end(),
                        calculated_cost: quote.cost,
                    },
                )
                .await?;

                let status = vehicle.status.reconciled(holding.len() as i64 + 1);
                VehicleRepository::set_status(&mut **tx, vehicle_id, status).await?;

                Ok(BookedRental {
                    rental,
                    day_count: quote.day_count,
                })
            })
        })
        .await;

        match outcome {
            Ok(booked) => {
                info!(
                    rental_id = %booked.rental.id,
                    vehicle_id = %vehicle_id,
                    days = booked.day_count,
                    cost = %booked.rental.calculated_cost,
                    "rental booked"
                );
                Ok(booked)
            }
            // Retries exhausted against a concurrent booking of the same vehicle.
            Err(err) if err.is_retryable() => Err(AppError::Conflict(format!(
                "vehicle {} was booked concurrently, please retry",
                vehicle_id
            ))),
            Err(err) => Err(err),
        }
    }

    /// Pick-up: Reserved -> Active. Conflict and availability rules are
    /// unchanged, an Active rental holds its vehicle exactly like a Reserved one.
    pub async fn activate(&self, rental_id: Uuid) -> AppResult<Rental> {
        let rental = run_in_transaction(&self.pool, self.retry, "activate", move |tx| {
            Box::pin(async move {
                let rental = RentalRepository::lock_by_id(&mut **tx, rental_id)
                    .await?
                    .ok_or_else(|| not_found_error("Rental", &rental_id))?;
                rental.ensure_can_activate()?;
                RentalRepository::mark_active(&mut **tx, rental_id).await
            })
        })
        .await?;

        info!(rental_id = %rental.id, vehicle_id = %rental.vehicle_id, "rental activated");
        Ok(rental)
    }

    /// Completes the rental, releases the vehicle and records exactly one
    /// settlement for the cost captured at booking.
    pub async fn return_vehicle(
        &self,
        rental_id: Uuid,
        method: Option<SettlementMethod>,
    ) -> AppResult<ReturnReceipt> {
        let method = method.unwrap_or(self.default_method);

        let receipt = run_in_transaction(&self.pool, self.retry, "return", move |tx| {
            Box::pin(async move {
                let rental = RentalRepository::lock_by_id(&mut **tx, rental_id)
                    .await?
                    .ok_or_else(|| not_found_error("Rental", &rental_id))?;
                rental.ensure_can_complete()?;

                let vehicle = VehicleRepository::lock_by_id(&mut **tx, rental.vehicle_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::Internal(format!("rental {} references a missing vehicle", rental_id))
                    })?;

                let completed = RentalRepository::mark_completed(&mut **tx, rental_id, Utc::now()).await?;

                let remaining = RentalRepository::count_open_for_vehicle(&mut **tx, vehicle.id).await?;
                VehicleRepository::set_status(&mut **tx, vehicle.id, vehicle.status.reconciled(remaining))
                    .await?;

                let settlement = SettlementRepository::insert(
                    &mut **tx,
                    rental_id,
                    completed.calculated_cost,
                    method,
                )
                .await?;

                Ok(ReturnReceipt {
                    rental: completed,
                    settlement,
                })
            })
        })
        .await?;

        info!(
            rental_id = %receipt.rental.id,
            vehicle_id = %receipt.rental.vehicle_id,
            amount = %receipt.settlement.amount,
            method = %receipt.settlement.method,
            "vehicle returned"
        );
        Ok(receipt)
    }

    pub async fn get_rental(&self, rental_id: Uuid) -> AppResult<RentalDetails> {
        let row = self
            .rentals
            .find_with_vehicle(rental_id)
            .await?
            .ok_or_else(|| not_found_error("Rental", &rental_id))?;

        let settlement = if row.rental.status.holds_vehicle() {
            None
        } else {
            self.settlements.find_by_rental(rental_id).await?
        };

        Ok(RentalDetails {
            rental: row.rental,
            make: row.make,
            model: row.model,
            license_plate: row.license_plate,
            settlement,
        })
    }
}
