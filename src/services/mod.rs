//! Services
//!
//! The availability index, the reservation engine and the pricing rule they
//! share.

pub mod availability_service;
pub mod pricing;
pub mod reservation_service;

pub use availability_service::AvailabilityService;
pub use reservation_service::{BookedRental, BookingRequest, ReservationService, ReturnReceipt};
