//! Shared field check primitives.
//!
//! Each check appends at most one error and returns whether the value
//! passed, so callers can chain dependent checks with `&&` where a later
//! rule is meaningless once an earlier one failed.

use super::{Field, ValidationErrors, Violation};

/// Records [`Violation::Missing`] when `value` is absent.
pub fn validate_required<T>(value: Option<&T>, field: Field, errors: &mut ValidationErrors) -> bool {
    if value.is_none() {
        errors.add(field, Violation::Missing);
        return false;
    }
    true
}

/// Records [`Violation::Missing`] when `value` is absent or blank.
pub fn validate_required_text(
    value: Option<&str>,
    field: Field,
    errors: &mut ValidationErrors,
) -> bool {
    if value.is_none_or(|text| text.trim().is_empty()) {
        errors.add(field, Violation::Missing);
        return false;
    }
    true
}

/// Records [`Violation::ExceedsMaxLength`] when the trimmed text has more
/// than `max_length` characters. Absent text passes.
pub fn validate_max_length(
    value: Option<&str>,
    field: Field,
    max_length: usize,
    errors: &mut ValidationErrors,
) -> bool {
    if value.is_some_and(|text| text.trim().chars().count() > max_length) {
        errors.add(field, Violation::ExceedsMaxLength);
        return false;
    }
    true
}

/// Records [`Violation::BelowMinValue`] when `value < min`. Absent values
/// pass.
pub fn validate_min_value(
    value: Option<i64>,
    field: Field,
    min: i64,
    errors: &mut ValidationErrors,
) -> bool {
    if value.is_some_and(|number| number < min) {
        errors.add(field, Violation::BelowMinValue);
        return false;
    }
    true
}

/// Records [`Violation::ExceedsMaxValue`] when `value > max`. Absent values
/// pass.
pub fn validate_max_value(
    value: Option<i64>,
    field: Field,
    max: i64,
    errors: &mut ValidationErrors,
) -> bool {
    if value.is_some_and(|number| number > max) {
        errors.add(field, Violation::ExceedsMaxValue);
        return false;
    }
    true
}
