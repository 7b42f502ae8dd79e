//! Allocation lifecycle and conflict handling against `PostgreSQL`.

use std::sync::Arc;

use super::helpers::{BookingDatabase, booking_request, days_ahead_at};
use atrium::booking::{
    domain::{Allocation, Employee, NewAllocation, RoomId},
    ports::{BookingRepository, StoreError},
    services::{AllocationServiceError, ListAllocationsRequest, UpdateAllocationRequest},
    validation::{Field, Violation},
};
use atrium::config::BookingConfig;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;

#[rstest]
fn allocation_lifecycle(shared_test_cluster: &'static TestCluster) {
    let db = BookingDatabase::create(shared_test_cluster, "alloc_lifecycle").expect("database");
    let room = db.room("Atlas");
    let allocations = db.allocations(BookingConfig::default());
    let (start, end) = (days_ahead_at(2, 9, 0), days_ahead_at(2, 10, 0));

    let created = db
        .runtime
        .block_on(allocations.create(booking_request(&room, "dora@example.com", start, end)))
        .expect("create allocation");
    assert_eq!(created.start_at(), start);
    assert_eq!(created.end_at(), end);
    assert_eq!(created.employee().email(), "dora@example.com");

    let updated = db
        .runtime
        .block_on(allocations.update(
            created.id(),
            UpdateAllocationRequest::new("Retro", days_ahead_at(2, 11, 0), days_ahead_at(2, 12, 0)),
        ))
        .expect("update allocation");
    assert_eq!(updated.subject(), "Retro");
    assert_eq!(updated.start_at(), days_ahead_at(2, 11, 0));
    assert_eq!(updated.employee().name(), "Dora");

    db.runtime
        .block_on(allocations.delete(created.id()))
        .expect("delete allocation");
    let again = db.runtime.block_on(allocations.delete(created.id()));
    assert!(matches!(again, Err(AllocationServiceError::AllocationNotFound(id)) if id == created.id()));
}

#[rstest]
fn overlapping_booking_is_rejected_and_touching_accepted(
    shared_test_cluster: &'static TestCluster,
) {
    let db = BookingDatabase::create(shared_test_cluster, "alloc_overlap").expect("database");
    let room = db.room("Atlas");
    let allocations = db.allocations(BookingConfig::default());
    db.runtime
        .block_on(allocations.create(booking_request(
            &room,
            "dora@example.com",
            days_ahead_at(3, 9, 0),
            days_ahead_at(3, 10, 0),
        )))
        .expect("first booking");

    let overlapping = db.runtime.block_on(allocations.create(booking_request(
        &room,
        "eli@example.com",
        days_ahead_at(3, 9, 30),
        days_ahead_at(3, 10, 30),
    )));
    match overlapping {
        Err(AllocationServiceError::Validation(failure)) => {
            assert!(failure.errors().contains(Field::StartAt, Violation::Overlaps));
        }
        other => panic!("expected overlap rejection, got {other:?}"),
    }

    db.runtime
        .block_on(allocations.create(booking_request(
            &room,
            "eli@example.com",
            days_ahead_at(3, 10, 0),
            days_ahead_at(3, 11, 0),
        )))
        .expect("touching booking");
}

#[rstest]
fn insert_for_unknown_room_is_room_not_found(shared_test_cluster: &'static TestCluster) {
    let db = BookingDatabase::create(shared_test_cluster, "alloc_fk").expect("database");
    let missing = RoomId::new();
    let allocation = Allocation::new(
        NewAllocation {
            room_id: missing,
            subject: "Orphan".to_owned(),
            employee: Employee::new("Dora", "dora@example.com"),
            start_at: days_ahead_at(1, 9, 0),
            end_at: days_ahead_at(1, 10, 0),
        },
        &DefaultClock,
    );

    let result = db.runtime.block_on(db.repository.transaction(
        move |store| -> Result<Allocation, StoreError> { store.insert_allocation(&allocation) },
    ));

    assert!(
        matches!(result, Err(StoreError::RoomNotFound(id)) if id == missing),
        "expected RoomNotFound, got {result:?}"
    );
}

#[rstest]
fn concurrent_bookings_of_one_slot_store_exactly_one(shared_test_cluster: &'static TestCluster) {
    let db = BookingDatabase::create(shared_test_cluster, "alloc_race").expect("database");
    let room = db.room("Atlas");
    let allocations = Arc::new(db.allocations(BookingConfig::default()));
    let (start, end) = (days_ahead_at(4, 15, 0), days_ahead_at(4, 16, 0));

    let outcomes = db.runtime.block_on(async {
        let handles: Vec<_> = (0..6)
            .map(|attempt| {
                let service = Arc::clone(&allocations);
                let request = booking_request(&room, &format!("p{attempt}@example.com"), start, end);
                tokio::spawn(async move { service.create(request).await })
            })
            .collect();
        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.push(handle.await.expect("booking task should not panic"));
        }
        outcomes
    });

    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
    let stored = db
        .runtime
        .block_on(allocations.list(ListAllocationsRequest {
            room_id: Some(room.id()),
            ..ListAllocationsRequest::default()
        }))
        .expect("list allocations");
    assert_eq!(stored.len(), 1);
}
