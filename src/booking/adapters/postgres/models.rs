//! Diesel row models for room booking persistence.

use super::schema::{allocations, rooms};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result and insert row for rooms.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoomRow {
    /// Room identifier.
    pub id: uuid::Uuid,
    /// Room name.
    pub name: String,
    /// Seat capacity.
    pub seats: i32,
    /// Soft-delete marker.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result and insert row for allocations.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = allocations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AllocationRow {
    /// Allocation identifier.
    pub id: uuid::Uuid,
    /// Booked room.
    pub room_id: uuid::Uuid,
    /// Meeting subject.
    pub subject: String,
    /// Booking employee display name.
    pub employee_name: String,
    /// Booking employee e-mail address.
    pub employee_email: String,
    /// Inclusive start.
    pub start_at: DateTime<Utc>,
    /// Exclusive end.
    pub end_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
