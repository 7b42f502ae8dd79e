//! Shared helpers for `PostgreSQL` booking tests.

use std::sync::Arc;

use atrium::booking::{
    adapters::{memory::RecordingNotifier, postgres::PostgresBookingRepository},
    domain::Room,
    services::{AllocationService, CreateAllocationRequest, RoomRequest, RoomService},
};
use atrium::config::BookingConfig;
use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::{Clock, DefaultClock};
use pg_embedded_setup_unpriv::TestCluster;
use tokio::runtime::Runtime;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SQL creating the rooms and allocations tables.
pub const CREATE_BOOKING_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_rooms_and_allocations/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "atrium_test_template";

/// Allocation service over `PostgreSQL`.
pub type PgAllocationService =
    AllocationService<PostgresBookingRepository, RecordingNotifier, DefaultClock>;

/// Room service over `PostgreSQL`.
pub type PgRoomService = RoomService<PostgresBookingRepository, DefaultClock>;

/// Creates a multi-threaded runtime so blocking transactions can overlap.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the schema applied.
fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_BOOKING_SCHEMA_SQL)
                .map_err(|e| eyre::eyre!("schema setup failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Drops a test database once every connection to it is released.
struct CleanupGuard {
    cluster: &'static TestCluster,
    db_name: String,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Err(e) = self.cluster.drop_database(self.db_name.as_str()) {
            eprintln!("Warning: failed to drop test database {}: {e}", self.db_name);
        }
    }
}

/// Database cloned from the template, dropped again when the test ends.
///
/// Fields drop in declaration order, so the pool closes before the guard
/// removes the database.
pub struct BookingDatabase {
    pub runtime: Runtime,
    pub repository: Arc<PostgresBookingRepository>,
    _guard: CleanupGuard,
}

impl BookingDatabase {
    /// Creates a fresh database whose name starts with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template, database, or pool cannot be set up.
    pub fn create(cluster: &'static TestCluster, prefix: &str) -> Result<Self, BoxError> {
        ensure_template(cluster)?;
        let db_name = format!("{prefix}_{}", uuid::Uuid::new_v4().simple());
        cluster
            .create_database_from_template(db_name.as_str(), TEMPLATE_DB)
            .map_err(|e| Box::new(e) as BoxError)?;
        let url = cluster.connection().database_url(&db_name);
        let pool = Pool::builder()
            .max_size(4)
            .build(ConnectionManager::<PgConnection>::new(url))
            .map_err(|e| Box::new(e) as BoxError)?;
        Ok(Self {
            runtime: test_runtime(),
            repository: Arc::new(PostgresBookingRepository::new(pool)),
            _guard: CleanupGuard { cluster, db_name },
        })
    }

    /// Returns a room service over this database.
    pub fn rooms(&self) -> PgRoomService {
        RoomService::new(Arc::clone(&self.repository), Arc::new(DefaultClock))
    }

    /// Returns an allocation service over this database.
    pub fn allocations(&self, config: BookingConfig) -> PgAllocationService {
        AllocationService::new(
            Arc::clone(&self.repository),
            Arc::new(RecordingNotifier::new()),
            Arc::new(DefaultClock),
            config,
        )
    }

    /// Creates an active room through the room service.
    pub fn room(&self, name: &str) -> Room {
        self.runtime
            .block_on(self.rooms().create(RoomRequest::new(name, 6)))
            .expect("room should be created")
    }
}

/// Returns `hour:minute` UTC, `days` after today.
pub fn days_ahead_at(days: i64, hour: u32, minute: u32) -> DateTime<Utc> {
    let date = DefaultClock.utc().date_naive() + TimeDelta::days(days);
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    date.and_time(time).and_utc()
}

/// Builds a complete booking request for `room`.
pub fn booking_request(
    room: &Room,
    email: &str,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
) -> CreateAllocationRequest {
    CreateAllocationRequest::new(room.id())
        .with_subject("Sprint review")
        .with_employee("Dora", email)
        .with_interval(start_at, end_at)
}
