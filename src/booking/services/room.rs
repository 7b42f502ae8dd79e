//! Service layer for room management.

use super::requests::RoomRequest;
use crate::booking::{
    domain::{Room, RoomId},
    ports::{BookingRepository, BookingStore, StoreError},
    validation::{RoomValidator, ValidationFailure},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for room operations.
#[derive(Debug, Clone, Error)]
pub enum RoomServiceError {
    /// The request violated one or more field rules.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// The room is absent or inactive.
    #[error("room not found: {0}")]
    NotFound(RoomId),

    /// Persistence failed.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for RoomServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RoomNotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Result type for room service operations.
pub type RoomServiceResult<T> = Result<T, RoomServiceError>;

/// Room management service.
///
/// Rooms are never removed; deactivation hides a room from lookups and
/// booking and frees its name for reuse.
#[derive(Clone)]
pub struct RoomService<R, C>
where
    R: BookingRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    validator: RoomValidator,
}

impl<R, C> RoomService<R, C>
where
    R: BookingRepository,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new room service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            validator: RoomValidator::new(),
        }
    }

    /// Returns an active room.
    ///
    /// # Errors
    ///
    /// Returns [`RoomServiceError::NotFound`] when the room is absent or
    /// inactive, or [`RoomServiceError::Store`] when the lookup fails.
    pub async fn get(&self, id: RoomId) -> RoomServiceResult<Room> {
        self.repository
            .transaction(move |store| find_active(store, id))
            .await
    }

    /// Creates a room.
    ///
    /// # Errors
    ///
    /// Returns [`RoomServiceError::Validation`] with every violated rule,
    /// including a duplicate active name, or [`RoomServiceError::Store`].
    pub async fn create(&self, request: RoomRequest) -> RoomServiceResult<Room> {
        let validator = self.validator;
        let clock = Arc::clone(&self.clock);

        let room = self
            .repository
            .transaction(move |store| -> RoomServiceResult<Room> {
                let fields = validator.validate::<RoomServiceError>(
                    store,
                    request.name.as_deref(),
                    request.seats,
                    None,
                )?;
                let room = Room::new(fields.name, fields.seats, &*clock);
                store.insert_room(&room)?;
                Ok(room)
            })
            .await?;

        tracing::debug!(room_id = %room.id(), name = room.name(), "room created");
        Ok(room)
    }

    /// Renames and resizes an active room.
    ///
    /// Keeping the room's current name is not a duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`RoomServiceError::NotFound`],
    /// [`RoomServiceError::Validation`], or [`RoomServiceError::Store`].
    pub async fn update(&self, id: RoomId, request: RoomRequest) -> RoomServiceResult<Room> {
        let validator = self.validator;

        let room = self
            .repository
            .transaction(move |store| -> RoomServiceResult<Room> {
                let mut room = find_active(store, id)?;
                let fields = validator.validate::<RoomServiceError>(
                    store,
                    request.name.as_deref(),
                    request.seats,
                    Some(id),
                )?;
                room.rename_and_resize(fields.name, fields.seats);
                store.update_room(&room)?;
                Ok(room)
            })
            .await?;

        tracing::debug!(room_id = %id, "room updated");
        Ok(room)
    }

    /// Deactivates an active room.
    ///
    /// Existing allocations are kept; the room simply stops accepting new
    /// ones.
    ///
    /// # Errors
    ///
    /// Returns [`RoomServiceError::NotFound`] or [`RoomServiceError::Store`].
    pub async fn deactivate(&self, id: RoomId) -> RoomServiceResult<()> {
        self.repository
            .transaction(move |store| -> RoomServiceResult<()> {
                let mut room = find_active(store, id)?;
                room.deactivate();
                Ok(store.update_room(&room)?)
            })
            .await?;

        tracing::debug!(room_id = %id, "room deactivated");
        Ok(())
    }
}

fn find_active(store: &mut dyn BookingStore, id: RoomId) -> RoomServiceResult<Room> {
    store
        .find_room_by_id(id)?
        .filter(Room::is_active)
        .ok_or(RoomServiceError::NotFound(id))
}
