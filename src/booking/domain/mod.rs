//! Domain model for room booking.
//!
//! Rooms and allocations are plain aggregates; activity (for rooms) and
//! elapsed state (for allocations) are predicates computed at read time
//! rather than stored status fields.

mod allocation;
mod error;
mod ids;
mod listing;
mod room;
mod time;

pub use allocation::{
    ALLOCATION_EMPLOYEE_EMAIL_MAX_LENGTH, ALLOCATION_EMPLOYEE_NAME_MAX_LENGTH,
    ALLOCATION_SUBJECT_MAX_LENGTH, Allocation, Employee, NewAllocation, PersistedAllocationData,
};
pub use error::{BookingDomainError, ParseSortFieldError};
pub use ids::{AllocationId, RoomId};
pub use listing::{AllocationFilter, PageRequest, SortDirection, SortField, SortKey};
pub use room::{
    PersistedRoomData, ROOM_NAME_MAX_LENGTH, ROOM_SEATS_MAX_VALUE, ROOM_SEATS_MIN_VALUE, Room,
};
pub use time::{DEFAULT_REFERENCE_UTC_OFFSET_SECS, ReferenceTime, is_overlapping};
