//! Atrium: meeting-room booking engine.
//!
//! This crate manages shared meeting rooms and their bookings. Its core
//! decides whether a proposed booking is admissible: field rules, temporal
//! rules (ordering, future-only start, maximum duration) and conflict
//! detection against the room's other bookings, all reported together in a
//! single validation pass.
//!
//! # Architecture
//!
//! Atrium follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and notification
//! - **Adapters**: Concrete implementations of ports (in-memory,
//!   `PostgreSQL`, e-mail)
//!
//! # Modules
//!
//! - [`booking`]: Rooms, allocations, validation and lifecycle services
//! - [`config`]: Booking configuration surface

pub mod booking;
pub mod config;
