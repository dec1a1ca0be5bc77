//! Vehicle rental reservation engine
//!
//! Books, activates and returns rental vehicles over PostgreSQL, guaranteeing
//! that no vehicle is held by two overlapping Reserved/Active rentals and that
//! every completed rental carries exactly one settlement.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
