//! Room request validation and duplicate-name detection.

use super::{
    Field, ValidationErrors, ValidationFailure, Violation,
    checks::{
        validate_max_length, validate_max_value, validate_min_value, validate_required,
        validate_required_text,
    },
};
use crate::booking::{
    domain::{ROOM_NAME_MAX_LENGTH, ROOM_SEATS_MAX_VALUE, ROOM_SEATS_MIN_VALUE, RoomId},
    ports::{BookingStore, StoreError, StoreResult},
};

/// Detects active rooms that already use a name.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateNameChecker;

impl DuplicateNameChecker {
    /// Creates a duplicate-name checker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Records [`Violation::Duplicate`] on the name field when an active
    /// room other than `exclude` is called exactly `name`.
    ///
    /// Inactive rooms never count, and a room renamed to its own current
    /// name is not flagged when it is passed as `exclude`.
    ///
    /// # Errors
    ///
    /// Propagates store lookup failures.
    pub fn check(
        &self,
        store: &mut dyn BookingStore,
        name: &str,
        exclude: Option<RoomId>,
        errors: &mut ValidationErrors,
    ) -> StoreResult<()> {
        let duplicate = store
            .find_active_room_by_name(name)?
            .is_some_and(|room| exclude.is_none_or(|id| room.id() != id));
        if duplicate {
            errors.add(Field::Name, Violation::Duplicate);
        }
        Ok(())
    }
}

/// Room fields accepted by a validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRoom {
    /// Trimmed room name.
    pub name: String,
    /// Seat capacity.
    pub seats: i32,
}

/// Validates room create and update requests.
///
/// Name checks (required, then length) and seat checks (required, minimum,
/// maximum) each stop at their first failure; the duplicate-name lookup
/// only runs once both fields are valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoomValidator {
    duplicates: DuplicateNameChecker,
}

impl RoomValidator {
    /// Creates a room validator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            duplicates: DuplicateNameChecker::new(),
        }
    }

    /// Validates the fields of a room, excluding `exclude` from the
    /// duplicate-name check.
    ///
    /// The duplicate lookup compares the trimmed name exactly, case included.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationFailure`] (converted into `E`) when any check
    /// fails, or the store error raised by the duplicate lookup.
    pub fn validate<E>(
        &self,
        store: &mut dyn BookingStore,
        name: Option<&str>,
        seats: Option<i32>,
        exclude: Option<RoomId>,
    ) -> Result<ValidatedRoom, E>
    where
        E: From<ValidationFailure> + From<StoreError>,
    {
        let mut errors = ValidationErrors::new();

        let name_is_valid = validate_name(name, &mut errors);
        let seats_are_valid = validate_seats(seats, &mut errors);
        if let (true, true, Some(valid_name)) = (name_is_valid, seats_are_valid, name) {
            self.duplicates
                .check(store, valid_name.trim(), exclude, &mut errors)?;
        }

        let validated = name
            .zip(seats)
            .filter(|_| name_is_valid && seats_are_valid)
            .map(|(valid_name, valid_seats)| ValidatedRoom {
                name: valid_name.trim().to_owned(),
                seats: valid_seats,
            });
        Ok(errors.into_validated(validated)?)
    }
}

fn validate_name(name: Option<&str>, errors: &mut ValidationErrors) -> bool {
    validate_required_text(name, Field::Name, errors)
        && validate_max_length(name, Field::Name, ROOM_NAME_MAX_LENGTH, errors)
}

fn validate_seats(seats: Option<i32>, errors: &mut ValidationErrors) -> bool {
    let value = seats.map(i64::from);
    validate_required(value.as_ref(), Field::Seats, errors)
        && validate_min_value(value, Field::Seats, ROOM_SEATS_MIN_VALUE, errors)
        && validate_max_value(value, Field::Seats, ROOM_SEATS_MAX_VALUE, errors)
}
