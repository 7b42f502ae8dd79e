//! Notification port for committed allocation changes.

use crate::booking::domain::Allocation;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notifier operations.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Kind of committed allocation change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocationEvent {
    /// A new allocation was stored.
    Created,
    /// An allocation was rescheduled or renamed.
    Updated,
    /// An allocation was removed.
    Deleted,
}

impl AllocationEvent {
    /// Returns a stable label for logs and templates.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

/// Best-effort notification of allocation changes.
///
/// Called after commit and never awaited by the request that triggered it;
/// a failure is logged and does not affect the stored booking.
#[async_trait]
pub trait AllocationNotifier: Send + Sync {
    /// Announces a newly created allocation.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError`] when delivery fails.
    async fn notify_created(&self, allocation: &Allocation) -> NotifierResult<()>;

    /// Announces an updated allocation, as committed.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError`] when delivery fails.
    async fn notify_updated(&self, allocation: &Allocation) -> NotifierResult<()>;

    /// Announces a deleted allocation.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError`] when delivery fails.
    async fn notify_deleted(&self, allocation: &Allocation) -> NotifierResult<()>;
}

/// Errors returned by notifier implementations.
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    /// The notification could not be rendered.
    #[error("failed to render {event} notification: {reason}")]
    Render {
        /// Event being announced.
        event: &'static str,
        /// Renderer failure description.
        reason: String,
    },

    /// The notification could not be delivered.
    #[error("notification delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotifierError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
