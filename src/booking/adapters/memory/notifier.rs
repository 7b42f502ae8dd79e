//! Recording notifier for tests.

use crate::booking::{
    domain::Allocation,
    ports::{AllocationEvent, AllocationNotifier, NotifierError, NotifierResult},
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Notifier that records every announcement it receives.
///
/// A failing recorder still records the attempt before returning an error.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<(AllocationEvent, Allocation)>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingNotifier {
    /// Creates a notifier that accepts every announcement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a notifier that rejects every announcement.
    #[must_use]
    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.set_failing(true);
        notifier
    }

    /// Switches failure mode on or off.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns the recorded announcements in arrival order.
    #[must_use]
    pub fn events(&self) -> Vec<(AllocationEvent, Allocation)> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn record(&self, event: AllocationEvent, allocation: &Allocation) -> NotifierResult<()> {
        self.events
            .lock()
            .map_err(|err| NotifierError::delivery(std::io::Error::other(err.to_string())))?
            .push((event, allocation.clone()));
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifierError::delivery(std::io::Error::other(
                "recording notifier set to fail",
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl AllocationNotifier for RecordingNotifier {
    async fn notify_created(&self, allocation: &Allocation) -> NotifierResult<()> {
        self.record(AllocationEvent::Created, allocation)
    }

    async fn notify_updated(&self, allocation: &Allocation) -> NotifierResult<()> {
        self.record(AllocationEvent::Updated, allocation)
    }

    async fn notify_deleted(&self, allocation: &Allocation) -> NotifierResult<()> {
        self.record(AllocationEvent::Deleted, allocation)
    }
}
