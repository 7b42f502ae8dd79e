//! Room aggregate.

use super::RoomId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Maximum number of characters in a room name.
pub const ROOM_NAME_MAX_LENGTH: usize = 20;

/// Smallest seat capacity a room may declare.
pub const ROOM_SEATS_MIN_VALUE: i64 = 1;

/// Largest seat capacity a room may declare.
pub const ROOM_SEATS_MAX_VALUE: i64 = 20;

/// A bookable meeting room.
///
/// Rooms are never physically removed; deactivation clears the `active`
/// flag, after which the room is invisible to lookups, booking, and
/// duplicate-name checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    name: String,
    seats: i32,
    active: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRoomData {
    /// Persisted room identifier.
    pub id: RoomId,
    /// Persisted room name.
    pub name: String,
    /// Persisted seat capacity.
    pub seats: i32,
    /// Persisted soft-delete marker.
    pub active: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Creates a new active room from already-validated values.
    #[must_use]
    pub fn new(name: impl Into<String>, seats: i32, clock: &impl Clock) -> Self {
        Self {
            id: RoomId::new(),
            name: name.into(),
            seats,
            active: true,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a room from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRoomData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            seats: data.seats,
            active: data.active,
            created_at: data.created_at,
        }
    }

    /// Returns the room identifier.
    #[must_use]
    pub const fn id(&self) -> RoomId {
        self.id
    }

    /// Returns the room name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the seat capacity.
    #[must_use]
    pub const fn seats(&self) -> i32 {
        self.seats
    }

    /// Returns `true` unless the room has been deactivated.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the mutable room attributes.
    pub fn rename_and_resize(&mut self, name: impl Into<String>, seats: i32) {
        self.name = name.into();
        self.seats = seats;
    }

    /// Soft-deletes the room.
    pub const fn deactivate(&mut self) {
        self.active = false;
    }
}
