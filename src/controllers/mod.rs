//! Controllers
//!
//! Translate wire requests into engine calls and engine results into
//! response bodies.

pub mod rental_controller;
pub mod vehicle_controller;

pub use rental_controller::RentalController;
pub use vehicle_controller::VehicleController;
