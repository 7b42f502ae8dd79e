//! Competing bookings of one room.

use std::sync::Arc;

use super::helpers::{Booking, booking, booking_request, create_room, days_ahead_at};
use atrium::booking::services::{AllocationServiceError, ListAllocationsRequest};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn only_one_of_many_identical_bookings_wins(booking: Booking) -> eyre::Result<()> {
    let room = create_room(&booking, "Atrium").await?;
    let service = Arc::new(booking.allocations);

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            let request = booking_request(&room, days_ahead_at(1, 9, 0), days_ahead_at(1, 10, 0));
            tokio::spawn(async move { service.create(request).await })
        })
        .collect();

    let mut accepted = 0;
    for attempt in attempts {
        match attempt.await? {
            Ok(_) => accepted += 1,
            Err(AllocationServiceError::Validation(_)) => {}
            Err(other) => return Err(other.into()),
        }
    }
    assert_eq!(accepted, 1);

    let stored = service.list(ListAllocationsRequest::default()).await?;
    assert_eq!(stored.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn different_rooms_do_not_contend(booking: Booking) -> eyre::Result<()> {
    let mut rooms = Vec::new();
    for name in ["North", "South", "East", "West"] {
        rooms.push(create_room(&booking, name).await?);
    }
    let service = Arc::new(booking.allocations);

    let attempts: Vec<_> = rooms
        .iter()
        .map(|room| {
            let service = Arc::clone(&service);
            let request = booking_request(room, days_ahead_at(1, 9, 0), days_ahead_at(1, 10, 0));
            tokio::spawn(async move { service.create(request).await })
        })
        .collect();

    for attempt in attempts {
        attempt.await??;
    }
    let stored = service.list(ListAllocationsRequest::default()).await?;
    assert_eq!(stored.len(), 4);
    Ok(())
}
