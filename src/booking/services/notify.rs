//! Post-commit notification dispatch.

use crate::booking::{
    domain::Allocation,
    ports::{AllocationEvent, AllocationNotifier},
};
use std::sync::Arc;
use tokio::runtime::Handle;

/// Fires one notification on a detached task.
///
/// The caller never waits for delivery: the attempt runs at most once, and
/// a failure, or the absence of a runtime to run it on, is only logged.
pub(crate) fn dispatch<N>(notifier: &Arc<N>, event: AllocationEvent, allocation: Allocation)
where
    N: AllocationNotifier + 'static,
{
    let Ok(handle) = Handle::try_current() else {
        tracing::warn!(
            event = event.as_str(),
            allocation_id = %allocation.id(),
            "no async runtime available; notification dropped"
        );
        return;
    };

    let notifier = Arc::clone(notifier);
    drop(handle.spawn(async move {
        let outcome = match event {
            AllocationEvent::Created => notifier.notify_created(&allocation).await,
            AllocationEvent::Updated => notifier.notify_updated(&allocation).await,
            AllocationEvent::Deleted => notifier.notify_deleted(&allocation).await,
        };
        if let Err(err) = outcome {
            tracing::warn!(
                event = event.as_str(),
                allocation_id = %allocation.id(),
                error = %err,
                "allocation notification failed"
            );
        }
    }));
}
