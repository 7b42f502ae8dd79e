//! Field-level validation errors and their accumulator.

use std::fmt;
use thiserror::Error;

/// Request field a validation error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Room name.
    Name,
    /// Room seat capacity.
    Seats,
    /// Identifier of the allocation being updated.
    AllocationId,
    /// Allocation subject.
    Subject,
    /// Employee display name.
    EmployeeName,
    /// Employee e-mail address.
    EmployeeEmail,
    /// Allocation start instant.
    StartAt,
    /// Allocation end instant.
    EndAt,
    /// Listing page size.
    Limit,
}

impl Field {
    /// Returns the caller-facing field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Seats => "seats",
            Self::AllocationId => "allocationId",
            Self::Subject => "subject",
            Self::EmployeeName => "employeeName",
            Self::EmployeeEmail => "employeeEmail",
            Self::StartAt => "startAt",
            Self::EndAt => "endAt",
            Self::Limit => "limit",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of rule a field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    /// Required value is absent or blank.
    Missing,
    /// Text is longer than its bound.
    ExceedsMaxLength,
    /// Number is below its inclusive minimum.
    BelowMinValue,
    /// Number is above its inclusive maximum.
    ExceedsMaxValue,
    /// Another active room already uses the name.
    Duplicate,
    /// Start is not strictly before end.
    Inconsistent,
    /// Start is before the current instant.
    InThePast,
    /// Interval is longer than the configured ceiling.
    ExceedsDuration,
    /// Interval overlaps an existing allocation of the same room.
    Overlaps,
}

impl Violation {
    /// Returns the suffix appended to the field name to form an error code.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Missing => "Missing",
            Self::ExceedsMaxLength => "ExceedsMaxLength",
            Self::BelowMinValue => "BelowMinValue",
            Self::ExceedsMaxValue => "ExceedsMaxValue",
            Self::Duplicate => "Duplicate",
            Self::Inconsistent => "Inconsistent",
            Self::InThePast => "InThePast",
            Self::ExceedsDuration => "ExceedsDuration",
            Self::Overlaps => "Overlaps",
        }
    }
}

/// A single `(field, violation)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidationError {
    field: Field,
    violation: Violation,
}

impl ValidationError {
    /// Creates a validation error.
    #[must_use]
    pub const fn new(field: Field, violation: Violation) -> Self {
        Self { field, violation }
    }

    /// Returns the offending field.
    #[must_use]
    pub const fn field(&self) -> Field {
        self.field
    }

    /// Returns the violated rule.
    #[must_use]
    pub const fn violation(&self) -> Violation {
        self.violation
    }

    /// Returns the error code, e.g. `startAtOverlaps`.
    #[must_use]
    pub fn code(&self) -> String {
        format!("{}{}", self.field.as_str(), self.violation.suffix())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.code())
    }
}

/// Insertion-ordered collection of validation errors from one pass.
///
/// Each validation entry point owns one accumulator, lets every check write
/// into it, and converts it into a single [`ValidationFailure`] at the end.
///
/// # Examples
///
/// ```
/// use atrium::booking::validation::{Field, ValidationErrors, Violation};
///
/// let mut errors = ValidationErrors::new();
/// errors
///     .add(Field::Subject, Violation::Missing)
///     .add(Field::StartAt, Violation::InThePast);
///
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors.get(1).map(|e| e.code()), Some("startAtInThePast".to_owned()));
/// assert!(errors.into_result().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Appends one error and returns the accumulator for chaining.
    pub fn add(&mut self, field: Field, violation: Violation) -> &mut Self {
        self.errors.push(ValidationError::new(field, violation));
        self
    }

    /// Returns `true` when no error has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the error at `index` in insertion order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ValidationError> {
        self.errors.get(index)
    }

    /// Iterates over the recorded errors in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Returns `true` when an error for `field` with `violation` exists.
    #[must_use]
    pub fn contains(&self, field: Field, violation: Violation) -> bool {
        self.errors.contains(&ValidationError::new(field, violation))
    }

    /// Ends a validation pass.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure`] carrying every recorded error when the
    /// accumulator is not empty.
    pub fn into_result(self) -> Result<(), ValidationFailure> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure { errors: self })
        }
    }

    /// Ends a validation pass that also assembled a validated value.
    ///
    /// `value` is `None` only when a required check failed, in which case
    /// the accumulator already holds the matching error.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure`] when any error was recorded or no value
    /// could be assembled.
    pub fn into_validated<T>(self, value: Option<T>) -> Result<T, ValidationFailure> {
        match value {
            Some(validated) if self.errors.is_empty() => Ok(validated),
            _ => Err(ValidationFailure { errors: self }),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&rendered)
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Aggregated failure of a validation pass.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("validation failed: {errors}")]
pub struct ValidationFailure {
    errors: ValidationErrors,
}

impl ValidationFailure {
    /// Returns every error recorded during the pass.
    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Consumes the failure and returns its errors.
    #[must_use]
    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}
