//! Service layer for the allocation lifecycle.

use super::{
    notify::dispatch,
    requests::{CreateAllocationRequest, ListAllocationsRequest, UpdateAllocationRequest},
};
use crate::booking::{
    domain::{
        Allocation, AllocationFilter, AllocationId, PageRequest, Room, RoomId, SortDirection,
        SortField, SortKey,
    },
    ports::{AllocationEvent, AllocationNotifier, BookingRepository, StoreError},
    validation::{
        AllocationValidator, Field, ValidationErrors, ValidationFailure, checks::validate_min_value,
    },
};
use crate::config::BookingConfig;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for allocation operations.
#[derive(Debug, Clone, Error)]
pub enum AllocationServiceError {
    /// The request violated one or more field rules.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// The target room is absent or inactive.
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// The allocation does not exist.
    #[error("allocation not found: {0}")]
    AllocationNotFound(AllocationId),

    /// The allocation has already ended and can no longer be changed.
    #[error("cannot update allocation {0}: it has already ended")]
    CannotUpdateElapsed(AllocationId),

    /// The allocation has already ended and can no longer be removed.
    #[error("cannot delete allocation {0}: it has already ended")]
    CannotDeleteElapsed(AllocationId),

    /// An `order_by` entry is unknown or not in the sortable allow-list.
    #[error("invalid order_by field: {0}")]
    InvalidOrderBy(String),

    /// Persistence failed.
    #[error(transparent)]
    Store(StoreError),
}

impl AllocationServiceError {
    /// Returns `true` for well-formed requests rejected because the
    /// allocation has already ended.
    #[must_use]
    pub const fn is_illegal_state_transition(&self) -> bool {
        matches!(
            self,
            Self::CannotUpdateElapsed(_) | Self::CannotDeleteElapsed(_)
        )
    }
}

impl From<StoreError> for AllocationServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RoomNotFound(id) => Self::RoomNotFound(id),
            StoreError::AllocationNotFound(id) => Self::AllocationNotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Result type for allocation service operations.
pub type AllocationServiceResult<T> = Result<T, AllocationServiceError>;

/// Allocation lifecycle orchestration service.
///
/// Every mutation validates and writes inside one repository transaction,
/// then announces the committed record on a detached task. The current
/// instant is sampled once per operation.
#[derive(Clone)]
pub struct AllocationService<R, N, C>
where
    R: BookingRepository,
    N: AllocationNotifier,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    notifier: Arc<N>,
    clock: Arc<C>,
    config: BookingConfig,
    validator: AllocationValidator,
}

impl<R, N, C> AllocationService<R, N, C>
where
    R: BookingRepository,
    N: AllocationNotifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new allocation service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        notifier: Arc<N>,
        clock: Arc<C>,
        config: BookingConfig,
    ) -> Self {
        let validator = AllocationValidator::new(&config);
        Self {
            repository,
            notifier,
            clock,
            config,
            validator,
        }
    }

    /// Books a room.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationServiceError::RoomNotFound`] when the room is
    /// absent or inactive, [`AllocationServiceError::Validation`] with every
    /// violated rule, or [`AllocationServiceError::Store`] when persistence
    /// fails.
    pub async fn create(
        &self,
        request: CreateAllocationRequest,
    ) -> AllocationServiceResult<Allocation> {
        let validator = self.validator.clone();
        let clock = Arc::clone(&self.clock);
        let now = self.now();

        let allocation = self
            .repository
            .transaction(move |store| -> AllocationServiceResult<Allocation> {
                let room_id = request.room_id;
                store
                    .find_room_by_id(room_id)?
                    .filter(Room::is_active)
                    .ok_or(AllocationServiceError::RoomNotFound(room_id))?;
                store.lock_room(room_id)?;

                let data = validator.validate_create::<AllocationServiceError>(store, &request, now)?;
                Ok(store.insert_allocation(&Allocation::new(data, &*clock))?)
            })
            .await?;

        tracing::debug!(
            allocation_id = %allocation.id(),
            room_id = %allocation.room_id(),
            "allocation created"
        );
        dispatch(&self.notifier, AllocationEvent::Created, allocation.clone());
        Ok(allocation)
    }

    /// Replaces the subject and interval of an allocation that has not yet
    /// ended.
    ///
    /// The allocation keeps its room and employee, and is excluded from its
    /// own conflict check. The returned record, which is also the one
    /// announced, is reloaded after the write.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationServiceError::AllocationNotFound`],
    /// [`AllocationServiceError::CannotUpdateElapsed`],
    /// [`AllocationServiceError::Validation`], or
    /// [`AllocationServiceError::Store`].
    pub async fn update(
        &self,
        id: AllocationId,
        request: UpdateAllocationRequest,
    ) -> AllocationServiceResult<Allocation> {
        let validator = self.validator.clone();
        let now = self.now();

        let allocation = self
            .repository
            .transaction(move |store| -> AllocationServiceResult<Allocation> {
                let existing = store
                    .find_allocation_by_id(id)?
                    .ok_or(AllocationServiceError::AllocationNotFound(id))?;
                if existing.is_elapsed(now) {
                    return Err(AllocationServiceError::CannotUpdateElapsed(id));
                }
                let room_id = existing.room_id();
                store.lock_room(room_id)?;

                let schedule = validator.validate_update::<AllocationServiceError>(
                    store,
                    Some(id),
                    room_id,
                    &request,
                    now,
                )?;
                store.update_allocation_fields(
                    id,
                    &schedule.subject,
                    schedule.start_at,
                    schedule.end_at,
                )?;
                store
                    .find_allocation_by_id(id)?
                    .ok_or(AllocationServiceError::AllocationNotFound(id))
            })
            .await?;

        tracing::debug!(allocation_id = %id, "allocation updated");
        dispatch(&self.notifier, AllocationEvent::Updated, allocation.clone());
        Ok(allocation)
    }

    /// Removes an allocation that has not yet ended.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationServiceError::AllocationNotFound`],
    /// [`AllocationServiceError::CannotDeleteElapsed`], or
    /// [`AllocationServiceError::Store`].
    pub async fn delete(&self, id: AllocationId) -> AllocationServiceResult<()> {
        let now = self.now();

        let removed = self
            .repository
            .transaction(move |store| -> AllocationServiceResult<Allocation> {
                let existing = store
                    .find_allocation_by_id(id)?
                    .ok_or(AllocationServiceError::AllocationNotFound(id))?;
                if existing.is_elapsed(now) {
                    return Err(AllocationServiceError::CannotDeleteElapsed(id));
                }
                store.delete_allocation(id)?;
                Ok(existing)
            })
            .await?;

        tracing::debug!(allocation_id = %id, "allocation deleted");
        dispatch(&self.notifier, AllocationEvent::Deleted, removed);
        Ok(())
    }

    /// Returns one page of allocations.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationServiceError::InvalidOrderBy`] for an unknown or
    /// non-sortable field, [`AllocationServiceError::Validation`] for a zero
    /// limit, or [`AllocationServiceError::Store`] when the query fails.
    pub async fn list(
        &self,
        request: ListAllocationsRequest,
    ) -> AllocationServiceResult<Vec<Allocation>> {
        let order = self.parse_order(request.order_by.as_deref())?;
        let limit = self.page_size(request.limit)?;
        let reference_time = self.config.reference_time;
        let filter = AllocationFilter {
            employee_email: request.employee_email,
            room_id: request.room_id,
            start_at: request
                .start_date
                .map(|date| reference_time.start_of_day(date)),
            end_at: request.end_date.map(|date| reference_time.end_of_day(date)),
        };
        let page = PageRequest::new(request.page, limit, order);

        self.repository
            .transaction(move |store| -> AllocationServiceResult<Vec<Allocation>> {
                Ok(store.find_allocations_with_filters(&filter, &page)?)
            })
            .await
    }

    fn parse_order(&self, order_by: Option<&str>) -> AllocationServiceResult<Vec<SortKey>> {
        order_by
            .into_iter()
            .flat_map(|raw| raw.split(','))
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| self.parse_sort_key(entry))
            .collect()
    }

    fn parse_sort_key(&self, entry: &str) -> AllocationServiceResult<SortKey> {
        let (direction, name) = entry.strip_prefix('-').map_or(
            (SortDirection::Ascending, entry),
            |name| (SortDirection::Descending, name),
        );
        let field = SortField::try_from(name)
            .ok()
            .filter(|field| self.config.is_sortable(*field))
            .ok_or_else(|| AllocationServiceError::InvalidOrderBy(name.to_owned()))?;
        Ok(SortKey { field, direction })
    }

    /// Samples the clock once, read in the reference zone.
    fn now(&self) -> DateTime<Utc> {
        self.config
            .reference_time
            .now(&*self.clock)
            .with_timezone(&Utc)
    }

    fn page_size(&self, limit: Option<u32>) -> AllocationServiceResult<u32> {
        let max = self.config.max_page_size;
        let requested = limit.unwrap_or(max);
        let mut errors = ValidationErrors::new();
        validate_min_value(Some(i64::from(requested)), Field::Limit, 1, &mut errors);
        errors.into_result()?;
        Ok(requested.min(max))
    }
}
