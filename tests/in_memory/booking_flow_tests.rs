//! Allocation lifecycle through the public services.

use super::helpers::{Booking, booking, booking_request, create_room, days_ahead_at};
use atrium::booking::{
    ports::AllocationEvent,
    services::{AllocationServiceError, ListAllocationsRequest, UpdateAllocationRequest},
    validation::{Field, Violation},
};
use rstest::rstest;
use std::time::Duration;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn booking_lifecycle_round_trip(booking: Booking) -> eyre::Result<()> {
    let room = create_room(&booking, "Atrium").await?;
    let created = booking
        .allocations
        .create(booking_request(
            &room,
            days_ahead_at(1, 10, 0),
            days_ahead_at(1, 11, 0),
        ))
        .await?;

    let moved = booking
        .allocations
        .update(
            created.id(),
            UpdateAllocationRequest::new(
                "Quarterly planning (moved)",
                days_ahead_at(2, 15, 0),
                days_ahead_at(2, 16, 0),
            ),
        )
        .await?;
    assert_eq!(moved.start_at(), days_ahead_at(2, 15, 0));

    let listed = booking
        .allocations
        .list(ListAllocationsRequest {
            employee_email: Some("carla@example.com".to_owned()),
            ..ListAllocationsRequest::default()
        })
        .await?;
    assert_eq!(listed, vec![moved.clone()]);

    booking.allocations.delete(created.id()).await?;
    let remaining = booking
        .allocations
        .list(ListAllocationsRequest::default())
        .await?;
    assert!(remaining.is_empty());

    let events = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let events = booking.notifier.events();
            if events.len() == 3 {
                return events;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await?;
    let mut kinds: Vec<_> = events.iter().map(|(event, _)| event.as_str()).collect();
    kinds.sort_unstable();
    assert_eq!(kinds, vec!["created", "deleted", "updated"]);
    assert!(
        events
            .iter()
            .any(|(event, allocation)| *event == AllocationEvent::Updated && *allocation == moved)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overlap_then_touching_booking(booking: Booking) -> eyre::Result<()> {
    let room = create_room(&booking, "Atrium").await?;
    booking
        .allocations
        .create(booking_request(
            &room,
            days_ahead_at(1, 10, 0),
            days_ahead_at(1, 11, 0),
        ))
        .await?;

    let inside = booking
        .allocations
        .create(booking_request(
            &room,
            days_ahead_at(1, 10, 30),
            days_ahead_at(1, 10, 45),
        ))
        .await;
    match inside {
        Err(AllocationServiceError::Validation(failure)) => {
            let errors = failure.errors();
            assert_eq!(errors.len(), 1);
            assert!(errors.contains(Field::StartAt, Violation::Overlaps));
        }
        other => panic!("expected overlap rejection, got {other:?}"),
    }

    let touching = booking
        .allocations
        .create(booking_request(
            &room,
            days_ahead_at(1, 11, 0),
            days_ahead_at(1, 11, 30),
        ))
        .await?;
    assert_eq!(touching.start_at(), days_ahead_at(1, 11, 0));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn validation_failure_message_lists_every_code(booking: Booking) -> eyre::Result<()> {
    let room = create_room(&booking, "Atrium").await?;
    let err = booking
        .allocations
        .create(
            booking_request(&room, days_ahead_at(-1, 10, 0), days_ahead_at(1, 11, 0))
                .with_employee("", "carla@example.com"),
        )
        .await
        .expect_err("request breaks several rules");

    let message = err.to_string();
    assert!(message.contains("employeeNameMissing"), "{message}");
    assert!(message.contains("startAtInThePast"), "{message}");
    assert!(message.contains("endAtExceedsDuration"), "{message}");
    Ok(())
}
