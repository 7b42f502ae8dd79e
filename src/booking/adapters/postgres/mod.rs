//! `PostgreSQL` adapters for room booking persistence.

mod models;
mod repository;
mod schema;

pub use repository::{BookingPgPool, PostgresBookingRepository};
