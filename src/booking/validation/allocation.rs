//! Allocation request validation.

use super::{
    ConflictDetector, Field, ProposedInterval, ValidationErrors, ValidationFailure, Violation,
    checks::{validate_max_length, validate_required, validate_required_text},
};
use crate::booking::{
    domain::{
        ALLOCATION_EMPLOYEE_EMAIL_MAX_LENGTH, ALLOCATION_EMPLOYEE_NAME_MAX_LENGTH,
        ALLOCATION_SUBJECT_MAX_LENGTH, AllocationId, Employee, NewAllocation, RoomId,
    },
    ports::{BookingStore, StoreError, StoreResult},
    services::{CreateAllocationRequest, UpdateAllocationRequest},
};
use crate::config::BookingConfig;
use chrono::{DateTime, Utc};

/// Subject and interval accepted by an update pass, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSchedule {
    /// Trimmed subject.
    pub subject: String,
    /// Inclusive start.
    pub start_at: DateTime<Utc>,
    /// Exclusive end.
    pub end_at: DateTime<Utc>,
}

/// Validates allocation create and update requests.
///
/// Every check of a pass writes into one shared [`ValidationErrors`] and the
/// pass keeps going after a failure, so a single request reports all of its
/// violations at once. Only the dates block is gated, on the presence of
/// both instants.
#[derive(Debug, Clone)]
pub struct AllocationValidator {
    max_duration_secs: i64,
    conflicts: ConflictDetector,
}

impl AllocationValidator {
    /// Creates a validator using the configured duration ceiling.
    #[must_use]
    pub const fn new(config: &BookingConfig) -> Self {
        Self {
            max_duration_secs: config.max_allocation_duration_secs,
            conflicts: ConflictDetector::new(),
        }
    }

    /// Runs the create pipeline: subject, employee name, employee e-mail,
    /// then the dates block.
    ///
    /// On success returns the trimmed allocation fields ready to persist.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationFailure`] (converted into `E`) when any check
    /// fails, or the store error raised by conflict detection.
    pub fn validate_create<E>(
        &self,
        store: &mut dyn BookingStore,
        request: &CreateAllocationRequest,
        now: DateTime<Utc>,
    ) -> Result<NewAllocation, E>
    where
        E: From<ValidationFailure> + From<StoreError>,
    {
        let mut errors = ValidationErrors::new();

        let subject = validate_subject(request.subject.as_deref(), &mut errors);
        let employee_name = validate_employee_name(request.employee_name.as_deref(), &mut errors);
        let employee_email =
            validate_employee_email(request.employee_email.as_deref(), &mut errors);
        let dates = DatesUnderValidation {
            room_id: request.room_id,
            exclude: None,
            start_at: request.start_at,
            end_at: request.end_at,
        };
        let interval = self.validate_dates(store, &dates, now, &mut errors)?;

        let validated = subject
            .zip(employee_name.zip(employee_email))
            .zip(interval)
            .map(|((subject, (name, email)), (start_at, end_at))| NewAllocation {
                room_id: request.room_id,
                subject: subject.to_owned(),
                employee: Employee::new(name, email),
                start_at,
                end_at,
            });
        Ok(errors.into_validated(validated)?)
    }

    /// Runs the update pipeline: allocation id, subject, then the dates
    /// block with the allocation itself excluded from conflict detection.
    ///
    /// On success returns the trimmed subject and the accepted interval.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationFailure`] (converted into `E`) when any check
    /// fails, or the store error raised by conflict detection.
    pub fn validate_update<E>(
        &self,
        store: &mut dyn BookingStore,
        allocation_id: Option<AllocationId>,
        room_id: RoomId,
        request: &UpdateAllocationRequest,
        now: DateTime<Utc>,
    ) -> Result<ValidatedSchedule, E>
    where
        E: From<ValidationFailure> + From<StoreError>,
    {
        let mut errors = ValidationErrors::new();

        validate_required(allocation_id.as_ref(), Field::AllocationId, &mut errors);
        let subject = validate_subject(request.subject.as_deref(), &mut errors);
        let dates = DatesUnderValidation {
            room_id,
            exclude: allocation_id,
            start_at: request.start_at,
            end_at: request.end_at,
        };
        let interval = self.validate_dates(store, &dates, now, &mut errors)?;

        let validated = subject
            .zip(interval)
            .map(|(subject, (start_at, end_at))| ValidatedSchedule {
                subject: subject.to_owned(),
                start_at,
                end_at,
            });
        Ok(errors.into_validated(validated)?)
    }

    fn validate_dates(
        &self,
        store: &mut dyn BookingStore,
        dates: &DatesUnderValidation,
        now: DateTime<Utc>,
        errors: &mut ValidationErrors,
    ) -> StoreResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        let present = validate_required(dates.start_at.as_ref(), Field::StartAt, errors)
            && validate_required(dates.end_at.as_ref(), Field::EndAt, errors);
        let (true, Some(start_at), Some(end_at)) = (present, dates.start_at, dates.end_at) else {
            return Ok(None);
        };

        if start_at >= end_at {
            errors.add(Field::StartAt, Violation::Inconsistent);
        }
        if start_at < now {
            errors.add(Field::StartAt, Violation::InThePast);
        }
        if (end_at - start_at).num_seconds() > self.max_duration_secs {
            errors.add(Field::EndAt, Violation::ExceedsDuration);
        }

        let proposal = ProposedInterval {
            room_id: dates.room_id,
            start_at,
            end_at,
            exclude: dates.exclude,
        };
        if self.conflicts.has_conflict(store, &proposal, now)? {
            errors.add(Field::StartAt, Violation::Overlaps);
        }
        Ok(Some((start_at, end_at)))
    }
}

struct DatesUnderValidation {
    room_id: RoomId,
    exclude: Option<AllocationId>,
    start_at: Option<DateTime<Utc>>,
    end_at: Option<DateTime<Utc>>,
}

fn validate_subject<'a>(subject: Option<&'a str>, errors: &mut ValidationErrors) -> Option<&'a str> {
    validated_text(subject, Field::Subject, ALLOCATION_SUBJECT_MAX_LENGTH, errors)
}

fn validate_employee_name<'a>(
    name: Option<&'a str>,
    errors: &mut ValidationErrors,
) -> Option<&'a str> {
    validated_text(
        name,
        Field::EmployeeName,
        ALLOCATION_EMPLOYEE_NAME_MAX_LENGTH,
        errors,
    )
}

fn validate_employee_email<'a>(
    email: Option<&'a str>,
    errors: &mut ValidationErrors,
) -> Option<&'a str> {
    validated_text(
        email,
        Field::EmployeeEmail,
        ALLOCATION_EMPLOYEE_EMAIL_MAX_LENGTH,
        errors,
    )
}

/// Runs the required and max-length checks independently and returns the
/// trimmed text when both pass.
fn validated_text<'a>(
    value: Option<&'a str>,
    field: Field,
    max_length: usize,
    errors: &mut ValidationErrors,
) -> Option<&'a str> {
    let present = validate_required_text(value, field, errors);
    let within_bound = validate_max_length(value, field, max_length, errors);
    value.filter(|_| present && within_bound).map(str::trim)
}
