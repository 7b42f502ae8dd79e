//! Error types for booking domain values.

use thiserror::Error;

/// Errors returned while constructing booking domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookingDomainError {
    /// The UTC offset does not describe a valid fixed timezone.
    #[error("invalid UTC offset of {0} seconds, expected less than one day either way")]
    InvalidUtcOffset(i32),
}

/// Error returned while parsing sort fields from caller input or
/// configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort field: {0}")]
pub struct ParseSortFieldError(pub String);
