//! Booking configuration surface.
//!
//! Holds the tunables consumed by the booking services: the listing page
//! ceiling, the allocation duration ceiling, the sortable-field allow-list,
//! and the fixed reference timezone.

use crate::booking::domain::{ReferenceTime, SortField};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default ceiling applied to listing page sizes.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 50;

/// Default maximum allocation duration, four hours.
pub const DEFAULT_MAX_ALLOCATION_DURATION_SECS: i64 = 4 * 60 * 60;

/// Configuration for booking services.
///
/// # Examples
///
/// ```
/// use atrium::config::BookingConfig;
///
/// let config = BookingConfig::default();
/// assert_eq!(config.max_page_size, 50);
/// assert!(config.validate().is_ok());
///
/// let short = BookingConfig::default().with_max_allocation_duration_secs(1800);
/// assert_eq!(short.max_allocation_duration_secs, 1800);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Ceiling applied to every listing page size.
    pub max_page_size: u32,
    /// Inclusive ceiling on `end - start`, in whole seconds.
    pub max_allocation_duration_secs: i64,
    /// Fields accepted in a listing `order_by`.
    pub sortable_fields: Vec<SortField>,
    /// Reference timezone for "now", listing dates and notifications.
    #[serde(rename = "reference_utc_offset_secs")]
    pub reference_time: ReferenceTime,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            max_allocation_duration_secs: DEFAULT_MAX_ALLOCATION_DURATION_SECS,
            sortable_fields: vec![SortField::StartAt, SortField::EndAt],
            reference_time: ReferenceTime::default(),
        }
    }
}

impl BookingConfig {
    /// Sets the listing page ceiling.
    #[must_use]
    pub const fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    /// Sets the allocation duration ceiling.
    #[must_use]
    pub const fn with_max_allocation_duration_secs(mut self, seconds: i64) -> Self {
        self.max_allocation_duration_secs = seconds;
        self
    }

    /// Replaces the sortable-field allow-list.
    #[must_use]
    pub fn with_sortable_fields(mut self, fields: impl IntoIterator<Item = SortField>) -> Self {
        self.sortable_fields = fields.into_iter().collect();
        self
    }

    /// Sets the reference timezone.
    #[must_use]
    pub const fn with_reference_time(mut self, reference_time: ReferenceTime) -> Self {
        self.reference_time = reference_time;
        self
    }

    /// Returns whether `field` may appear in a listing `order_by`.
    #[must_use]
    pub fn is_sortable(&self, field: SortField) -> bool {
        self.sortable_fields.contains(&field)
    }

    /// Checks that the configured values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a zero page size, a non-positive duration
    /// ceiling, or an empty sortable-field allow-list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.max_allocation_duration_secs <= 0 {
            return Err(ConfigError::NonPositiveDuration(
                self.max_allocation_duration_secs,
            ));
        }
        if self.sortable_fields.is_empty() {
            return Err(ConfigError::NoSortableFields);
        }
        Ok(())
    }
}

/// Invalid booking configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The listing page ceiling is zero.
    #[error("max_page_size must be at least 1")]
    ZeroPageSize,

    /// The duration ceiling is zero or negative.
    #[error("max_allocation_duration_secs must be positive, got {0}")]
    NonPositiveDuration(i64),

    /// No field may be sorted on.
    #[error("sortable_fields must not be empty")]
    NoSortableFields,
}
