//! Attendify HTTP service
//!
//! Courses, students and their daily attendance behind a role-based JSON API.
//! [`routes::create_router`] builds the application from an [`AppState`].

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod report;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod unit_of_work;
pub mod validation;

pub use state::AppState;
