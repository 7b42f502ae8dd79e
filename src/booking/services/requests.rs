//! Request payloads accepted by the booking services.
//!
//! Fields are optional so that an absent value reaches validation and is
//! reported alongside every other violation of the same request.

use crate::booking::domain::RoomId;
use chrono::{DateTime, NaiveDate, Utc};

/// Request payload for booking a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAllocationRequest {
    /// Room to book.
    pub room_id: RoomId,
    /// Meeting subject.
    pub subject: Option<String>,
    /// Display name of the booking employee.
    pub employee_name: Option<String>,
    /// E-mail address of the booking employee.
    pub employee_email: Option<String>,
    /// Inclusive start.
    pub start_at: Option<DateTime<Utc>>,
    /// Exclusive end.
    pub end_at: Option<DateTime<Utc>>,
}

impl CreateAllocationRequest {
    /// Creates a request for `room_id` with every other field absent.
    #[must_use]
    pub const fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            subject: None,
            employee_name: None,
            employee_email: None,
            start_at: None,
            end_at: None,
        }
    }

    /// Sets the subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the employee display name and e-mail address.
    #[must_use]
    pub fn with_employee(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.employee_name = Some(name.into());
        self.employee_email = Some(email.into());
        self
    }

    /// Sets the interval.
    #[must_use]
    pub const fn with_interval(mut self, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        self.start_at = Some(start_at);
        self.end_at = Some(end_at);
        self
    }
}

/// Request payload for rescheduling or renaming an allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateAllocationRequest {
    /// New subject.
    pub subject: Option<String>,
    /// New inclusive start.
    pub start_at: Option<DateTime<Utc>>,
    /// New exclusive end.
    pub end_at: Option<DateTime<Utc>>,
}

impl UpdateAllocationRequest {
    /// Creates a request with every field present.
    #[must_use]
    pub fn new(subject: impl Into<String>, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        Self {
            subject: Some(subject.into()),
            start_at: Some(start_at),
            end_at: Some(end_at),
        }
    }
}

/// Request payload for creating or updating a room.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomRequest {
    /// Room name, unique among active rooms.
    pub name: Option<String>,
    /// Seat capacity.
    pub seats: Option<i32>,
}

impl RoomRequest {
    /// Creates a request with both fields present.
    #[must_use]
    pub fn new(name: impl Into<String>, seats: i32) -> Self {
        Self {
            name: Some(name.into()),
            seats: Some(seats),
        }
    }
}

/// Query for one page of allocations.
///
/// `start_date` and `end_date` are calendar days in the reference timezone;
/// the lower bound keeps allocations ending on or after the start of
/// `start_date` and the upper bound keeps those starting on or before the
/// end of `end_date`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAllocationsRequest {
    /// Exact employee e-mail filter.
    pub employee_email: Option<String>,
    /// Room filter.
    pub room_id: Option<RoomId>,
    /// First calendar day of interest.
    pub start_date: Option<NaiveDate>,
    /// Last calendar day of interest.
    pub end_date: Option<NaiveDate>,
    /// Comma-separated sort fields, each optionally prefixed with `-` for
    /// descending order, e.g. `-startAt,endAt`.
    pub order_by: Option<String>,
    /// Requested page size; clamped to the configured ceiling.
    pub limit: Option<u32>,
    /// Zero-based page index.
    pub page: u32,
}
