//! Allocation aggregate and related booking types.

use super::{AllocationId, RoomId, is_overlapping};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Maximum number of characters in an allocation subject.
pub const ALLOCATION_SUBJECT_MAX_LENGTH: usize = 60;

/// Maximum number of characters in an employee display name.
pub const ALLOCATION_EMPLOYEE_NAME_MAX_LENGTH: usize = 20;

/// Maximum number of characters in an employee e-mail address.
pub const ALLOCATION_EMPLOYEE_EMAIL_MAX_LENGTH: usize = 30;

/// The employee who owns an allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Employee {
    name: String,
    email: String,
}

impl Employee {
    /// Creates an employee reference from already-validated values.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns the employee display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the employee e-mail address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// A single booking of one room for a half-open interval `[start_at, end_at)`.
///
/// The room and employee are fixed at creation. Whether an allocation has
/// elapsed is derived from the current instant and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    id: AllocationId,
    room_id: RoomId,
    subject: String,
    employee: Employee,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

/// Validated field values for a new allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAllocation {
    /// Room receiving the booking.
    pub room_id: RoomId,
    /// Meeting subject.
    pub subject: String,
    /// Booking owner.
    pub employee: Employee,
    /// Inclusive start instant.
    pub start_at: DateTime<Utc>,
    /// Exclusive end instant.
    pub end_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAllocationData {
    /// Persisted allocation identifier.
    pub id: AllocationId,
    /// Persisted owning room.
    pub room_id: RoomId,
    /// Persisted subject.
    pub subject: String,
    /// Persisted employee reference.
    pub employee: Employee,
    /// Persisted start instant.
    pub start_at: DateTime<Utc>,
    /// Persisted end instant.
    pub end_at: DateTime<Utc>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Allocation {
    /// Creates a new allocation stamped with the clock's current time.
    #[must_use]
    pub fn new(data: NewAllocation, clock: &impl Clock) -> Self {
        Self {
            id: AllocationId::new(),
            room_id: data.room_id,
            subject: data.subject,
            employee: data.employee,
            start_at: data.start_at,
            end_at: data.end_at,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an allocation from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAllocationData) -> Self {
        Self {
            id: data.id,
            room_id: data.room_id,
            subject: data.subject,
            employee: data.employee,
            start_at: data.start_at,
            end_at: data.end_at,
            created_at: data.created_at,
        }
    }

    /// Returns the allocation identifier.
    #[must_use]
    pub const fn id(&self) -> AllocationId {
        self.id
    }

    /// Returns the owning room.
    #[must_use]
    pub const fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Returns the meeting subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the booking owner.
    #[must_use]
    pub const fn employee(&self) -> &Employee {
        &self.employee
    }

    /// Returns the inclusive start instant.
    #[must_use]
    pub const fn start_at(&self) -> DateTime<Utc> {
        self.start_at
    }

    /// Returns the exclusive end instant.
    #[must_use]
    pub const fn end_at(&self) -> DateTime<Utc> {
        self.end_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` once the end instant is strictly before `now`.
    ///
    /// Elapsed allocations can be neither updated nor deleted.
    #[must_use]
    pub fn is_elapsed(&self, now: DateTime<Utc>) -> bool {
        self.end_at < now
    }

    /// Returns `true` when this allocation shares an instant with
    /// `[start_at, end_at)`.
    #[must_use]
    pub fn overlaps(&self, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> bool {
        is_overlapping(start_at, end_at, self.start_at, self.end_at)
    }

    /// Applies the mutable fields of an update.
    pub fn reschedule(
        &mut self,
        subject: impl Into<String>,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) {
        self.subject = subject.into();
        self.start_at = start_at;
        self.end_at = end_at;
    }
}
