//! When steps for allocation booking BDD scenarios.

use super::world::{BookingWorld, run_async};
use atrium::booking::services::{CreateAllocationRequest, RoomRequest};
use chrono::TimeDelta;
use rstest_bdd_macros::when;

fn request_booking(
    world: &mut BookingWorld,
    subject: &str,
    start: &str,
    end: &str,
) -> Result<(), eyre::Report> {
    let request = CreateAllocationRequest::new(world.room()?.id())
        .with_subject(subject)
        .with_employee("Bruno", "bruno@example.com")
        .with_interval(world.tomorrow_at(start)?, world.tomorrow_at(end)?);
    let result = run_async(world.allocations.create(request));
    if let Ok(ref allocation) = result {
        world.last_allocation = Some(allocation.clone());
    }
    world.last_booking = Some(result);
    Ok(())
}

#[when(r#"a booking of the room is requested tomorrow from "{start}" to "{end}""#)]
fn booking_requested(
    world: &mut BookingWorld,
    start: String,
    end: String,
) -> Result<(), eyre::Report> {
    request_booking(world, "Design review", &start, &end)
}

#[when(r#"a booking of the room with a blank subject is requested tomorrow from "{start}" to "{end}""#)]
fn blank_subject_booking_requested(
    world: &mut BookingWorld,
    start: String,
    end: String,
) -> Result<(), eyre::Report> {
    request_booking(world, "   ", &start, &end)
}

#[when("{days:i64} days pass")]
fn days_pass(world: &mut BookingWorld, days: i64) {
    world.clock.advance(TimeDelta::days(days));
}

#[when("the allocation is deleted")]
fn allocation_deleted(world: &mut BookingWorld) -> Result<(), eyre::Report> {
    let allocation_id = world
        .last_allocation
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing allocation in scenario world"))?
        .id();
    world.last_deletion = Some(run_async(world.allocations.delete(allocation_id)));
    Ok(())
}

#[when(r#"a room named "{name}" with {seats:i32} seats is created"#)]
fn room_created(world: &mut BookingWorld, name: String, seats: i32) {
    let result = run_async(world.rooms.create(RoomRequest::new(name, seats)));
    world.last_room_creation = Some(result);
}
