//! Persistence ports for rooms and allocations.

use crate::booking::domain::{
    Allocation, AllocationFilter, AllocationId, PageRequest, Room, RoomId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for booking store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Transaction boundary over booking persistence.
///
/// A mutation validates and writes inside one call to [`transaction`], so
/// no other mutation of the same room can interleave between the conflict
/// check and the commit.
///
/// [`transaction`]: BookingRepository::transaction
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Runs `work` against a transaction-scoped store.
    ///
    /// Changes made by `work` are committed when it returns `Ok` and
    /// discarded when it returns `Err`.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or a [`StoreError`] converted
    /// into `E` when the transaction itself cannot be opened or committed.
    async fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn BookingStore) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StoreError> + Send + 'static;
}

/// Persistence operations available inside a transaction.
pub trait BookingStore {
    /// Finds a room by identifier, whether active or not.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the lookup fails.
    fn find_room_by_id(&mut self, id: RoomId) -> StoreResult<Option<Room>>;

    /// Finds the active room named exactly `name`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the lookup fails.
    fn find_active_room_by_name(&mut self, name: &str) -> StoreResult<Option<Room>>;

    /// Serializes writers targeting the same room until the transaction
    /// ends.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RoomNotFound`] when the room does not exist.
    fn lock_room(&mut self, id: RoomId) -> StoreResult<()>;

    /// Stores a new room.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateRoom`] when another active room already
    /// uses the name.
    fn insert_room(&mut self, room: &Room) -> StoreResult<()>;

    /// Persists the name, seats, and active flag of an existing room.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RoomNotFound`] when the room does not exist.
    fn update_room(&mut self, room: &Room) -> StoreResult<()>;

    /// Finds an allocation by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the lookup fails.
    fn find_allocation_by_id(&mut self, id: AllocationId) -> StoreResult<Option<Allocation>>;

    /// Returns allocations of `room_id` that end after `not_before` and
    /// start at or before `not_after`, ordered by start.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the query fails.
    fn find_allocations_for_room_in_window(
        &mut self,
        room_id: RoomId,
        not_before: DateTime<Utc>,
        not_after: DateTime<Utc>,
    ) -> StoreResult<Vec<Allocation>>;

    /// Returns one page of allocations matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the query fails.
    fn find_allocations_with_filters(
        &mut self,
        filter: &AllocationFilter,
        page: &PageRequest,
    ) -> StoreResult<Vec<Allocation>>;

    /// Stores a new allocation and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RoomNotFound`] when the owning room does not
    /// exist.
    fn insert_allocation(&mut self, allocation: &Allocation) -> StoreResult<Allocation>;

    /// Replaces the subject and interval of an allocation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AllocationNotFound`] when the allocation does
    /// not exist.
    fn update_allocation_fields(
        &mut self,
        id: AllocationId,
        subject: &str,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Physically removes an allocation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AllocationNotFound`] when the allocation does
    /// not exist.
    fn delete_allocation(&mut self, id: AllocationId) -> StoreResult<()>;
}

/// Errors returned by booking store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The room does not exist.
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// The allocation does not exist.
    #[error("allocation not found: {0}")]
    AllocationNotFound(AllocationId),

    /// An active room with the same name already exists.
    #[error("duplicate active room name: {0}")]
    DuplicateRoom(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
