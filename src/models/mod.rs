//! Data models
//!
//! Rows of the reservation schema plus the date-range rule shared by the
//! availability index and the booking path.

pub mod date_range;
pub mod rental;
pub mod settlement;
pub mod vehicle;

pub use date_range::DateRange;
pub use rental::{Rental, RentalDetails, RentalStatus, RentalWithVehicle};
pub use settlement::{Settlement, SettlementMethod, SettlementStatus};
pub use vehicle::{Vehicle, VehicleListing, VehicleStatus};
