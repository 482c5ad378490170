//! Common library for the Attendify application
//!
//! This crate provides the functionality shared by the services: PostgreSQL
//! connectivity, the embedded schema migrations and the database error type.

pub mod database;
pub mod error;

pub use database::{DatabaseConfig, MIGRATOR, health_check, init_pool, run_migrations};
pub use error::{DatabaseError, DatabaseResult};
