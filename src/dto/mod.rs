//! Wire types
//!
//! Request and response bodies of the HTTP surface.

pub mod api_response;
pub mod rental_dto;
pub mod vehicle_dto;

pub use api_response::ApiResponse;
