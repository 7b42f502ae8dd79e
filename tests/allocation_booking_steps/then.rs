//! Then steps for allocation booking BDD scenarios.

use std::time::Duration;

use super::world::{BookingWorld, run_async};
use atrium::booking::{
    services::{AllocationServiceError, RoomServiceError},
    validation::{ValidationError, ValidationFailure},
};
use rstest_bdd_macros::then;

fn codes(failure: &ValidationFailure) -> Vec<String> {
    failure.errors().iter().map(ValidationError::code).collect()
}

fn expected_codes(list: &str) -> Vec<String> {
    list.split(',').map(|code| code.trim().to_owned()).collect()
}

#[then(r#"the booking is rejected with "{list}""#)]
fn booking_rejected_with(world: &BookingWorld, list: String) -> Result<(), eyre::Report> {
    let result = world
        .last_booking
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing booking result"))?;
    let Err(AllocationServiceError::Validation(failure)) = result else {
        return Err(eyre::eyre!("expected validation failure, got {result:?}"));
    };
    let expected = expected_codes(&list);
    if codes(failure) != expected {
        return Err(eyre::eyre!(
            "expected codes {expected:?}, found {:?}",
            codes(failure)
        ));
    }
    Ok(())
}

#[then("the booking is accepted")]
fn booking_accepted(world: &BookingWorld) -> Result<(), eyre::Report> {
    match world.last_booking.as_ref() {
        Some(Ok(_)) => Ok(()),
        other => Err(eyre::eyre!("expected accepted booking, got {other:?}")),
    }
}

#[then("the booking fails because the room was not found")]
fn booking_room_not_found(world: &BookingWorld) -> Result<(), eyre::Report> {
    match world.last_booking.as_ref() {
        Some(Err(AllocationServiceError::RoomNotFound(_))) => Ok(()),
        other => Err(eyre::eyre!("expected RoomNotFound, got {other:?}")),
    }
}

#[then("the deletion is rejected because the allocation has elapsed")]
fn deletion_rejected_elapsed(world: &BookingWorld) -> Result<(), eyre::Report> {
    match world.last_deletion.as_ref() {
        Some(Err(err)) if err.is_illegal_state_transition() => Ok(()),
        other => Err(eyre::eyre!("expected CannotDeleteElapsed, got {other:?}")),
    }
}

#[then("the deletion succeeds")]
fn deletion_succeeds(world: &BookingWorld) -> Result<(), eyre::Report> {
    match world.last_deletion.as_ref() {
        Some(Ok(())) => Ok(()),
        other => Err(eyre::eyre!("expected successful deletion, got {other:?}")),
    }
}

#[then(r#"a "{event}" notification is sent for the booking"#)]
fn notification_sent(world: &BookingWorld, event: String) -> Result<(), eyre::Report> {
    let allocation_id = world
        .last_allocation
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing allocation in scenario world"))?
        .id();
    let notifier = world.notifier.clone();
    let delivered = run_async(async move {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                let found = notifier.events().iter().any(|(sent, allocation)| {
                    sent.as_str() == event && allocation.id() == allocation_id
                });
                if found {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
    });
    delivered.map_err(|_| eyre::eyre!("no notification arrived for {allocation_id}"))
}

#[then(r#"the room creation is rejected with "{list}""#)]
fn room_creation_rejected_with(world: &BookingWorld, list: String) -> Result<(), eyre::Report> {
    let result = world
        .last_room_creation
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing room creation result"))?;
    let Err(RoomServiceError::Validation(failure)) = result else {
        return Err(eyre::eyre!("expected validation failure, got {result:?}"));
    };
    let expected = expected_codes(&list);
    if codes(failure) != expected {
        return Err(eyre::eyre!(
            "expected codes {expected:?}, found {:?}",
            codes(failure)
        ));
    }
    Ok(())
}

#[then("the room creation succeeds")]
fn room_creation_succeeds(world: &BookingWorld) -> Result<(), eyre::Report> {
    match world.last_room_creation.as_ref() {
        Some(Ok(room)) if room.is_active() => Ok(()),
        other => Err(eyre::eyre!("expected created room, got {other:?}")),
    }
}
