//! Reference-timezone clock helpers and interval arithmetic.

use super::BookingDomainError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// UTC offset used when no reference timezone is configured (UTC-03:00).
pub const DEFAULT_REFERENCE_UTC_OFFSET_SECS: i32 = -3 * 3600;

/// Fixed reference timezone in which calendar dates are interpreted.
///
/// Instants are stored and compared in UTC; the reference zone only matters
/// when a caller speaks in calendar dates (listing filters) or when an
/// instant is rendered for people (notifications).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct ReferenceTime {
    offset: FixedOffset,
}

impl ReferenceTime {
    /// Creates a reference timezone from an offset east of UTC, in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`BookingDomainError::InvalidUtcOffset`] when the offset is
    /// not strictly within one day.
    pub fn from_offset_secs(offset_secs: i32) -> Result<Self, BookingDomainError> {
        FixedOffset::east_opt(offset_secs)
            .map(|offset| Self { offset })
            .ok_or(BookingDomainError::InvalidUtcOffset(offset_secs))
    }

    /// Returns the wrapped offset.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Returns the clock's current instant expressed in the reference zone.
    #[must_use]
    pub fn now(&self, clock: &impl Clock) -> DateTime<FixedOffset> {
        clock.utc().with_timezone(&self.offset)
    }

    /// Returns the first instant of `date` in the reference zone.
    ///
    /// Dates at the edge of the calendar saturate at the representable range.
    #[must_use]
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        self.at(date, NaiveTime::MIN)
    }

    /// Returns the last representable instant of `date` in the reference zone.
    ///
    /// Dates at the edge of the calendar saturate at [`DateTime::<Utc>::MAX_UTC`].
    #[must_use]
    pub fn end_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        self.start_of_day(date)
            .checked_add_signed(TimeDelta::days(1))
            .and_then(|next_midnight| next_midnight.checked_sub_signed(TimeDelta::nanoseconds(1)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Renders an instant as `dd/mm/yyyy HH:MM` in the reference zone.
    #[must_use]
    pub fn format(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.offset)
            .format("%d/%m/%Y %H:%M")
            .to_string()
    }

    fn at(&self, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        let offset_secs = self.offset.local_minus_utc();
        // A fixed offset has no gaps or folds, so the local time is unambiguous.
        date.and_time(time)
            .checked_sub_signed(TimeDelta::seconds(i64::from(offset_secs)))
            .map_or_else(
                || {
                    if offset_secs > 0 {
                        DateTime::<Utc>::MIN_UTC
                    } else {
                        DateTime::<Utc>::MAX_UTC
                    }
                },
                |utc| utc.and_utc(),
            )
    }
}

impl Default for ReferenceTime {
    fn default() -> Self {
        Self::from_offset_secs(DEFAULT_REFERENCE_UTC_OFFSET_SECS)
            .unwrap_or(Self { offset: Utc.fix() })
    }
}

impl TryFrom<i32> for ReferenceTime {
    type Error = BookingDomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_offset_secs(value)
    }
}

impl From<ReferenceTime> for i32 {
    fn from(value: ReferenceTime) -> Self {
        value.offset.local_minus_utc()
    }
}

/// Returns `true` when the half-open intervals `[s1, e1)` and `[s2, e2)`
/// share at least one instant.
///
/// Touching intervals (one ends exactly where the other starts) do not
/// overlap.
#[must_use]
pub fn is_overlapping(
    s1: DateTime<Utc>,
    e1: DateTime<Utc>,
    s2: DateTime<Utc>,
    e2: DateTime<Utc>,
) -> bool {
    s1 < e2 && s2 < e1
}
