//! # Fleet Admin Database Crate
//!
//! This crate is the only place that talks to PostgreSQL. It owns the SQL
//! for drivers, their drivable vehicles, and facilities.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** all database-specific logic lives here. Handlers call
//!   `DbRepository` methods and never see SQL.
//! - **Database as final authority:** duplicate checks run in the
//!   application first, but unique indexes decide. `DbError::is_unique_violation`
//!   lets callers recognise the case where a concurrent request won the race.
//! - **Asynchronous & Pooled:** all operations are asynchronous and share one
//!   `PgPool` created at start-up.
//!
//! ## Public API
//!
//! - `connect` / `connect_lazy`: build the connection pool from `DatabaseSettings`.
//! - `run_migrations`: apply the bundled schema migration.
//! - `DbRepository`: `create_driver` and `create_facility`.
//! - `DbError`: the error type returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_lazy, run_migrations};
pub use error::DbError;
pub use repository::{DbRepository, DriverCreation, FacilityCreation};
