//! Allocation conflict detection.

use crate::booking::{
    domain::{AllocationId, RoomId},
    ports::{BookingStore, StoreResult},
};
use chrono::{DateTime, Utc};

/// Decides whether a proposed interval collides with a room's bookings.
///
/// Only allocations that have not yet ended can conflict. The store query
/// is a coarse pre-filter (still running, starting at or before the
/// proposed end); exact half-open overlap and self-exclusion are always
/// re-checked here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictDetector;

impl ConflictDetector {
    /// Creates a conflict detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns `true` when any not-yet-ended allocation of `room_id`, other
    /// than `exclude`, overlaps `[start_at, end_at)`.
    ///
    /// # Errors
    ///
    /// Propagates store failures from the candidate query.
    pub fn has_conflict(
        &self,
        store: &mut dyn BookingStore,
        proposal: &ProposedInterval,
        now: DateTime<Utc>,
    ) -> StoreResult<bool> {
        let candidates =
            store.find_allocations_for_room_in_window(proposal.room_id, now, proposal.end_at)?;
        Ok(candidates
            .iter()
            .filter(|candidate| Some(candidate.id()) != proposal.exclude)
            .any(|candidate| candidate.overlaps(proposal.start_at, proposal.end_at)))
    }
}

/// An interval proposed for a room, optionally replacing an existing
/// allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposedInterval {
    /// Room the interval targets.
    pub room_id: RoomId,
    /// Proposed inclusive start.
    pub start_at: DateTime<Utc>,
    /// Proposed exclusive end.
    pub end_at: DateTime<Utc>,
    /// Allocation ignored during the check, i.e. the one being updated.
    pub exclude: Option<AllocationId>,
}
