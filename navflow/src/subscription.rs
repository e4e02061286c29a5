//! Subscription lifetime management.
//!
//! Every stream a coordinator listens to is drained by a spawned task.
//! `SubscriptionSet` owns those tasks and cancels all of them when it is
//! dropped, so a coordinator's subscriptions end with the coordinator no
//! matter what released it.

use std::future::Future;
use tokio::task::AbortHandle;

/// A handle to one spawned subscription task.
#[derive(Debug)]
pub struct SubscriptionHandle {
    abort_handle: AbortHandle,
}

impl SubscriptionHandle {
    pub fn new(abort_handle: AbortHandle) -> Self {
        Self { abort_handle }
    }

    /// Cancel the subscription at its next await point.
    pub fn cancel(&self) {
        self.abort_handle.abort();
    }

    /// Whether the task has finished, by completing or by being cancelled.
    pub fn is_finished(&self) -> bool {
        self.abort_handle.is_finished()
    }
}

/// Subscriptions that are cancelled together.
///
/// # Example
/// ```ignore
/// let mut subscriptions = SubscriptionSet::new();
/// subscriptions.spawn(async move {
///     while let Some(event) = rx.recv().await {
///         // react
///     }
/// });
/// drop(subscriptions); // the loop above stops here
/// ```
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    handles: Vec<SubscriptionHandle>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self { handles: Vec::new() }
    }

    /// Spawn `future` on the current tokio runtime and track it.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        self.track(SubscriptionHandle::new(handle.abort_handle()));
    }

    /// Track an already spawned task.
    pub fn track(&mut self, handle: SubscriptionHandle) {
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(handle);
    }

    /// Cancel every tracked subscription.
    pub fn cancel_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.cancel();
        }
    }

    /// Number of subscriptions still running.
    pub fn active_count(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }
}

impl Drop for SubscriptionSet {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
