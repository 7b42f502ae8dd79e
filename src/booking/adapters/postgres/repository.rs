//! `PostgreSQL` repository implementation for room booking storage.

use super::{
    models::{AllocationRow, RoomRow},
    schema::{allocations, rooms},
};
use crate::booking::{
    domain::{
        Allocation, AllocationFilter, AllocationId, Employee, PageRequest, PersistedAllocationData,
        PersistedRoomData, Room, RoomId, SortDirection, SortField,
    },
    ports::{BookingRepository, BookingStore, StoreError, StoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by booking adapters.
pub type BookingPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed booking repository.
///
/// Each transaction runs at `SERIALIZABLE` isolation on a pooled connection
/// inside [`tokio::task::spawn_blocking`]. Writers lock the room row first,
/// so conflicting mutations of one room queue behind each other.
#[derive(Debug, Clone)]
pub struct PostgresBookingRepository {
    pool: BookingPgPool,
}

impl PostgresBookingRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BookingPgPool) -> Self {
        Self { pool }
    }
}

/// Error carried out of a Diesel transaction closure.
enum TxError<E> {
    Work(E),
    Database(DieselError),
}

impl<E> From<DieselError> for TxError<E> {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn BookingStore) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StoreError::persistence)?;
            connection
                .build_transaction()
                .serializable()
                .run(|tx_connection| {
                    let mut store = PgBookingStore {
                        connection: tx_connection,
                    };
                    work(&mut store).map_err(TxError::Work)
                })
                .map_err(|err| match err {
                    TxError::Work(work_err) => work_err,
                    TxError::Database(db_err) => E::from(StoreError::persistence(db_err)),
                })
        })
        .await
        .map_err(StoreError::persistence)?
    }
}

/// Transaction-scoped store over one `PostgreSQL` connection.
struct PgBookingStore<'a> {
    connection: &'a mut PgConnection,
}

impl BookingStore for PgBookingStore<'_> {
    fn find_room_by_id(&mut self, id: RoomId) -> StoreResult<Option<Room>> {
        let row = rooms::table
            .find(id.into_inner())
            .select(RoomRow::as_select())
            .first::<RoomRow>(self.connection)
            .optional()
            .map_err(StoreError::persistence)?;
        Ok(row.map(row_to_room))
    }

    fn find_active_room_by_name(&mut self, name: &str) -> StoreResult<Option<Room>> {
        let row = rooms::table
            .filter(rooms::name.eq(name))
            .filter(rooms::active.eq(true))
            .select(RoomRow::as_select())
            .first::<RoomRow>(self.connection)
            .optional()
            .map_err(StoreError::persistence)?;
        Ok(row.map(row_to_room))
    }

    fn lock_room(&mut self, id: RoomId) -> StoreResult<()> {
        rooms::table
            .find(id.into_inner())
            .select(rooms::id)
            .for_update()
            .first::<uuid::Uuid>(self.connection)
            .optional()
            .map_err(StoreError::persistence)?
            .map(drop)
            .ok_or(StoreError::RoomNotFound(id))
    }

    fn insert_room(&mut self, room: &Room) -> StoreResult<()> {
        diesel::insert_into(rooms::table)
            .values(&room_to_row(room))
            .execute(self.connection)
            .map_err(|err| map_room_write_error(err, room))?;
        Ok(())
    }

    fn update_room(&mut self, room: &Room) -> StoreResult<()> {
        let updated = diesel::update(rooms::table.find(room.id().into_inner()))
            .set((
                rooms::name.eq(room.name()),
                rooms::seats.eq(room.seats()),
                rooms::active.eq(room.is_active()),
            ))
            .execute(self.connection)
            .map_err(|err| map_room_write_error(err, room))?;
        if updated == 0 {
            return Err(StoreError::RoomNotFound(room.id()));
        }
        Ok(())
    }

    fn find_allocation_by_id(&mut self, id: AllocationId) -> StoreResult<Option<Allocation>> {
        let row = allocations::table
            .find(id.into_inner())
            .select(AllocationRow::as_select())
            .first::<AllocationRow>(self.connection)
            .optional()
            .map_err(StoreError::persistence)?;
        Ok(row.map(row_to_allocation))
    }

    fn find_allocations_for_room_in_window(
        &mut self,
        room_id: RoomId,
        not_before: DateTime<Utc>,
        not_after: DateTime<Utc>,
    ) -> StoreResult<Vec<Allocation>> {
        let rows = allocations::table
            .filter(allocations::room_id.eq(room_id.into_inner()))
            .filter(allocations::end_at.gt(not_before))
            .filter(allocations::start_at.le(not_after))
            .order((allocations::start_at.asc(), allocations::id.asc()))
            .select(AllocationRow::as_select())
            .load::<AllocationRow>(self.connection)
            .map_err(StoreError::persistence)?;
        Ok(rows.into_iter().map(row_to_allocation).collect())
    }

    fn find_allocations_with_filters(
        &mut self,
        filter: &AllocationFilter,
        page: &PageRequest,
    ) -> StoreResult<Vec<Allocation>> {
        let mut query = allocations::table
            .select(AllocationRow::as_select())
            .into_boxed::<Pg>();

        if let Some(email) = &filter.employee_email {
            query = query.filter(allocations::employee_email.eq(email.clone()));
        }
        if let Some(room_id) = filter.room_id {
            query = query.filter(allocations::room_id.eq(room_id.into_inner()));
        }
        if let Some(start_at) = filter.start_at {
            query = query.filter(allocations::end_at.ge(start_at));
        }
        if let Some(end_at) = filter.end_at {
            query = query.filter(allocations::start_at.le(end_at));
        }

        for key in page.order() {
            query = match (key.field, key.direction) {
                (SortField::StartAt, SortDirection::Ascending) => {
                    query.then_order_by(allocations::start_at.asc())
                }
                (SortField::StartAt, SortDirection::Descending) => {
                    query.then_order_by(allocations::start_at.desc())
                }
                (SortField::EndAt, SortDirection::Ascending) => {
                    query.then_order_by(allocations::end_at.asc())
                }
                (SortField::EndAt, SortDirection::Descending) => {
                    query.then_order_by(allocations::end_at.desc())
                }
                (SortField::CreatedAt, SortDirection::Ascending) => {
                    query.then_order_by(allocations::created_at.asc())
                }
                (SortField::CreatedAt, SortDirection::Descending) => {
                    query.then_order_by(allocations::created_at.desc())
                }
            };
        }
        query = query
            .then_order_by(allocations::start_at.asc())
            .then_order_by(allocations::id.asc());

        let limit = i64::from(page.limit());
        let offset = i64::try_from(page.offset()).map_err(StoreError::persistence)?;
        let rows = query
            .limit(limit)
            .offset(offset)
            .load::<AllocationRow>(self.connection)
            .map_err(StoreError::persistence)?;
        Ok(rows.into_iter().map(row_to_allocation).collect())
    }

    fn insert_allocation(&mut self, allocation: &Allocation) -> StoreResult<Allocation> {
        diesel::insert_into(allocations::table)
            .values(&allocation_to_row(allocation))
            .execute(self.connection)
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    StoreError::RoomNotFound(allocation.room_id())
                }
                _ => StoreError::persistence(err),
            })?;
        Ok(allocation.clone())
    }

    fn update_allocation_fields(
        &mut self,
        id: AllocationId,
        subject: &str,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let updated = diesel::update(allocations::table.find(id.into_inner()))
            .set((
                allocations::subject.eq(subject),
                allocations::start_at.eq(start_at),
                allocations::end_at.eq(end_at),
            ))
            .execute(self.connection)
            .map_err(StoreError::persistence)?;
        if updated == 0 {
            return Err(StoreError::AllocationNotFound(id));
        }
        Ok(())
    }

    fn delete_allocation(&mut self, id: AllocationId) -> StoreResult<()> {
        let deleted = diesel::delete(allocations::table.find(id.into_inner()))
            .execute(self.connection)
            .map_err(StoreError::persistence)?;
        if deleted == 0 {
            return Err(StoreError::AllocationNotFound(id));
        }
        Ok(())
    }
}

fn map_room_write_error(err: DieselError, room: &Room) -> StoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StoreError::DuplicateRoom(room.name().to_owned())
        }
        _ => StoreError::persistence(err),
    }
}

fn room_to_row(room: &Room) -> RoomRow {
    RoomRow {
        id: room.id().into_inner(),
        name: room.name().to_owned(),
        seats: room.seats(),
        active: room.is_active(),
        created_at: room.created_at(),
    }
}

fn row_to_room(row: RoomRow) -> Room {
    Room::from_persisted(PersistedRoomData {
        id: RoomId::from_uuid(row.id),
        name: row.name,
        seats: row.seats,
        active: row.active,
        created_at: row.created_at,
    })
}

fn allocation_to_row(allocation: &Allocation) -> AllocationRow {
    AllocationRow {
        id: allocation.id().into_inner(),
        room_id: allocation.room_id().into_inner(),
        subject: allocation.subject().to_owned(),
        employee_name: allocation.employee().name().to_owned(),
        employee_email: allocation.employee().email().to_owned(),
        start_at: allocation.start_at(),
        end_at: allocation.end_at(),
        created_at: allocation.created_at(),
    }
}

fn row_to_allocation(row: AllocationRow) -> Allocation {
    Allocation::from_persisted(PersistedAllocationData {
        id: AllocationId::from_uuid(row.id),
        room_id: RoomId::from_uuid(row.room_id),
        subject: row.subject,
        employee: Employee::new(row.employee_name, row.employee_email),
        start_at: row.start_at,
        end_at: row.end_at,
        created_at: row.created_at,
    })
}
