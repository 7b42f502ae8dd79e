//! Meeting-room booking.
//!
//! Rooms are booked through allocations over half-open time intervals, and
//! no two allocations of one room that have not yet ended may overlap. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Request validation and conflict detection in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;
