//! Repositories
//!
//! SQL for each table. Reads that stand alone go through the pool; anything
//! that participates in a booking or return takes the transaction's
//! connection.

pub mod rental_repository;
pub mod settlement_repository;
pub mod vehicle_repository;

pub use rental_repository::{NewRental, RentalRepository};
pub use settlement_repository::SettlementRepository;
pub use vehicle_repository::VehicleRepository;
