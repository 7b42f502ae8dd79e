//! Request validation for rooms and allocations.
//!
//! Validation is an ordered list of independent checks writing into one
//! accumulator per request. A pass never fails part-way: it collects every
//! violation and raises a single [`ValidationFailure`] at the end.

mod allocation;
pub mod checks;
mod conflict;
mod errors;
mod room;

pub use allocation::{AllocationValidator, ValidatedSchedule};
pub use conflict::{ConflictDetector, ProposedInterval};
pub use errors::{Field, ValidationError, ValidationErrors, ValidationFailure, Violation};
pub use room::{DuplicateNameChecker, RoomValidator, ValidatedRoom};
