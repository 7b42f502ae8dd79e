//! Filtering, ordering, and pagination types for allocation listings.

use super::{Allocation, ParseSortFieldError, RoomId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Allocation attribute that a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortField {
    /// Order by start instant.
    StartAt,
    /// Order by end instant.
    EndAt,
    /// Order by creation timestamp.
    CreatedAt,
}

impl SortField {
    /// Returns the caller-facing field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StartAt => "startAt",
            Self::EndAt => "endAt",
            Self::CreatedAt => "createdAt",
        }
    }

    fn compare(self, left: &Allocation, right: &Allocation) -> Ordering {
        match self {
            Self::StartAt => left.start_at().cmp(&right.start_at()),
            Self::EndAt => left.end_at().cmp(&right.end_at()),
            Self::CreatedAt => left.created_at().cmp(&right.created_at()),
        }
    }
}

impl TryFrom<&str> for SortField {
    type Error = ParseSortFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "startAt" => Ok(Self::StartAt),
            "endAt" => Ok(Self::EndAt),
            "createdAt" => Ok(Self::CreatedAt),
            _ => Err(ParseSortFieldError(value.to_owned())),
        }
    }
}

impl TryFrom<String> for SortField {
    type Error = ParseSortFieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<SortField> for String {
    fn from(value: SortField) -> Self {
        value.as_str().to_owned()
    }
}

/// Direction of a single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

/// One `(field, direction)` entry of an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    /// Attribute to order by.
    pub field: SortField,
    /// Order direction.
    pub direction: SortDirection,
}

impl SortKey {
    /// Creates an ascending key.
    #[must_use]
    pub const fn ascending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    /// Creates a descending key.
    #[must_use]
    pub const fn descending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

/// Equality and range filters for allocation listings.
///
/// Absent filters match everything. `start_at` keeps allocations ending at
/// or after it; `end_at` keeps allocations starting at or before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationFilter {
    /// Exact employee e-mail match.
    pub employee_email: Option<String>,
    /// Exact room match.
    pub room_id: Option<RoomId>,
    /// Lower bound of the listing window.
    pub start_at: Option<DateTime<Utc>>,
    /// Upper bound of the listing window.
    pub end_at: Option<DateTime<Utc>>,
}

impl AllocationFilter {
    /// Returns `true` when the allocation satisfies every present filter.
    #[must_use]
    pub fn matches(&self, allocation: &Allocation) -> bool {
        let email_matches = self
            .employee_email
            .as_deref()
            .is_none_or(|email| allocation.employee().email() == email);
        let room_matches = self
            .room_id
            .is_none_or(|room_id| allocation.room_id() == room_id);
        let lower_matches = self
            .start_at
            .is_none_or(|start_at| allocation.end_at() >= start_at);
        let upper_matches = self
            .end_at
            .is_none_or(|end_at| allocation.start_at() <= end_at);
        email_matches && room_matches && lower_matches && upper_matches
    }
}

/// A resolved page request: zero-based page, clamped size, and ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
    order: Vec<SortKey>,
}

impl PageRequest {
    /// Creates a page request. `limit` is expected to be already clamped.
    #[must_use]
    pub const fn new(page: u32, limit: u32, order: Vec<SortKey>) -> Self {
        Self { page, limit, order }
    }

    /// Returns the zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the number of rows skipped before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.limit)
    }

    /// Returns the requested ordering; empty means unsorted.
    #[must_use]
    pub fn order(&self) -> &[SortKey] {
        &self.order
    }

    /// Orders allocations by the requested keys, falling back to ascending
    /// start and then identifier so results are deterministic.
    #[must_use]
    pub fn compare(&self, left: &Allocation, right: &Allocation) -> Ordering {
        self.order
            .iter()
            .map(|key| {
                let ordering = key.field.compare(left, right);
                match key.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| {
                left.start_at()
                    .cmp(&right.start_at())
                    .then_with(|| left.id().cmp(&right.id()))
            })
    }
}
