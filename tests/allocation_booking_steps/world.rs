//! Shared world state for allocation booking BDD scenarios.

use std::sync::{Arc, Mutex, PoisonError};

use atrium::booking::{
    adapters::memory::{InMemoryBookingRepository, RecordingNotifier},
    domain::{Allocation, Room},
    services::{AllocationService, AllocationServiceError, RoomService, RoomServiceError},
};
use atrium::config::BookingConfig;
use chrono::{DateTime, Local, NaiveTime, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

/// Clock that stands still until a step moves it forward.
#[derive(Debug)]
pub struct SteppingClock {
    now: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Allocation service type used by the BDD world.
pub type TestAllocationService =
    AllocationService<InMemoryBookingRepository, RecordingNotifier, SteppingClock>;

/// Room service type used by the BDD world.
pub type TestRoomService = RoomService<InMemoryBookingRepository, SteppingClock>;

/// Scenario world for allocation booking behaviour tests.
pub struct BookingWorld {
    pub clock: Arc<SteppingClock>,
    pub notifier: RecordingNotifier,
    pub rooms: TestRoomService,
    pub allocations: TestAllocationService,
    pub room: Option<Room>,
    pub last_allocation: Option<Allocation>,
    pub last_booking: Option<Result<Allocation, AllocationServiceError>>,
    pub last_deletion: Option<Result<(), AllocationServiceError>>,
    pub last_room_creation: Option<Result<Room, RoomServiceError>>,
}

impl BookingWorld {
    /// Creates a world whose clock reads Monday 2 March 2026, 12:00 UTC.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 2, 12, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        let clock = Arc::new(SteppingClock::starting_at(start));
        let repository = Arc::new(InMemoryBookingRepository::new());
        let notifier = RecordingNotifier::new();

        Self {
            rooms: RoomService::new(Arc::clone(&repository), Arc::clone(&clock)),
            allocations: AllocationService::new(
                repository,
                Arc::new(notifier.clone()),
                Arc::clone(&clock),
                BookingConfig::default(),
            ),
            clock,
            notifier,
            room: None,
            last_allocation: None,
            last_booking: None,
            last_deletion: None,
            last_room_creation: None,
        }
    }

    /// Returns the instant at `time` (UTC) on the day after the current one.
    ///
    /// # Errors
    ///
    /// Returns an error when `time` is not formatted as `HH:MM`.
    pub fn tomorrow_at(&self, time: &str) -> Result<DateTime<Utc>, eyre::Report> {
        let time = NaiveTime::parse_from_str(time, "%H:%M")
            .map_err(|err| eyre::eyre!("invalid time {time:?} in scenario: {err}"))?;
        let tomorrow = self.clock.utc().date_naive() + TimeDelta::days(1);
        Ok(tomorrow.and_time(time).and_utc())
    }

    /// Returns the room created by an earlier step.
    ///
    /// # Errors
    ///
    /// Returns an error when no room has been set up.
    pub fn room(&self) -> Result<&Room, eyre::Report> {
        self.room
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing room in scenario world"))
    }
}

impl Default for BookingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BookingWorld {
    BookingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
