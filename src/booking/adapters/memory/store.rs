//! In-memory booking repository for tests and embedding.

use crate::booking::{
    domain::{Allocation, AllocationFilter, AllocationId, PageRequest, Room, RoomId},
    ports::{BookingRepository, BookingStore, StoreError, StoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Thread-safe in-memory booking repository.
///
/// Transactions are fully serialized: each one runs against a copy of the
/// state that replaces the shared state only when the work succeeds.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingRepository {
    state: Arc<Mutex<BookingState>>,
}

#[derive(Debug, Clone, Default)]
struct BookingState {
    rooms: HashMap<RoomId, Room>,
    allocations: HashMap<AllocationId, Allocation>,
}

impl InMemoryBookingRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn BookingStore) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StoreError> + Send + 'static,
    {
        let mut state = self.state.lock().map_err(|err| {
            StoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut working = state.clone();
        let value = work(&mut working)?;
        *state = working;
        Ok(value)
    }
}

impl BookingState {
    fn active_name_taken(&self, name: &str, exclude: RoomId) -> bool {
        self.rooms
            .values()
            .any(|room| room.id() != exclude && room.is_active() && room.name() == name)
    }
}

impl BookingStore for BookingState {
    fn find_room_by_id(&mut self, id: RoomId) -> StoreResult<Option<Room>> {
        Ok(self.rooms.get(&id).cloned())
    }

    fn find_active_room_by_name(&mut self, name: &str) -> StoreResult<Option<Room>> {
        Ok(self
            .rooms
            .values()
            .find(|room| room.is_active() && room.name() == name)
            .cloned())
    }

    fn lock_room(&mut self, id: RoomId) -> StoreResult<()> {
        if self.rooms.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::RoomNotFound(id))
        }
    }

    fn insert_room(&mut self, room: &Room) -> StoreResult<()> {
        if room.is_active() && self.active_name_taken(room.name(), room.id()) {
            return Err(StoreError::DuplicateRoom(room.name().to_owned()));
        }
        self.rooms.insert(room.id(), room.clone());
        Ok(())
    }

    fn update_room(&mut self, room: &Room) -> StoreResult<()> {
        if !self.rooms.contains_key(&room.id()) {
            return Err(StoreError::RoomNotFound(room.id()));
        }
        if room.is_active() && self.active_name_taken(room.name(), room.id()) {
            return Err(StoreError::DuplicateRoom(room.name().to_owned()));
        }
        self.rooms.insert(room.id(), room.clone());
        Ok(())
    }

    fn find_allocation_by_id(&mut self, id: AllocationId) -> StoreResult<Option<Allocation>> {
        Ok(self.allocations.get(&id).cloned())
    }

    fn find_allocations_for_room_in_window(
        &mut self,
        room_id: RoomId,
        not_before: DateTime<Utc>,
        not_after: DateTime<Utc>,
    ) -> StoreResult<Vec<Allocation>> {
        let mut window: Vec<Allocation> = self
            .allocations
            .values()
            .filter(|allocation| {
                allocation.room_id() == room_id
                    && allocation.end_at() > not_before
                    && allocation.start_at() <= not_after
            })
            .cloned()
            .collect();
        window.sort_by_key(|allocation| (allocation.start_at(), allocation.id()));
        Ok(window)
    }

    fn find_allocations_with_filters(
        &mut self,
        filter: &AllocationFilter,
        page: &PageRequest,
    ) -> StoreResult<Vec<Allocation>> {
        let mut matching: Vec<&Allocation> = self
            .allocations
            .values()
            .filter(|allocation| filter.matches(allocation))
            .collect();
        matching.sort_by(|left, right| page.compare(left, right));

        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(skip).take(take).cloned().collect())
    }

    fn insert_allocation(&mut self, allocation: &Allocation) -> StoreResult<Allocation> {
        if !self.rooms.contains_key(&allocation.room_id()) {
            return Err(StoreError::RoomNotFound(allocation.room_id()));
        }
        self.allocations.insert(allocation.id(), allocation.clone());
        Ok(allocation.clone())
    }

    fn update_allocation_fields(
        &mut self,
        id: AllocationId,
        subject: &str,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let allocation = self
            .allocations
            .get_mut(&id)
            .ok_or(StoreError::AllocationNotFound(id))?;
        allocation.reschedule(subject, start_at, end_at);
        Ok(())
    }

    fn delete_allocation(&mut self, id: AllocationId) -> StoreResult<()> {
        self.allocations
            .remove(&id)
            .map(drop)
            .ok_or(StoreError::AllocationNotFound(id))
    }
}
