//! Stack cleanup monitor.
//!
//! A host surface only announces "this is the new top screen". The monitor
//! turns that into "this screen was removed": if the transition's `from` unit
//! is missing from the post-transition stack, it was popped (by a back gesture
//! or anything else the coordinator did not ask for), and its identity is
//! reported as an eviction.

use crate::config::CoordinatorConfig;
use crate::fanout::Fanout;
use crate::screen::ScreenId;
use crate::subscription::SubscriptionSet;
use crate::surface::{NavigationSurface, ShowEvent, SurfaceEvent};
use tokio::sync::mpsc;

/// The screen a transition removed from the stack, if any.
///
/// `None` when the previous top is still on the stack (a push), when there
/// was no previous top, or when the removed unit is not a navigable screen.
pub fn evicted_screen(event: &ShowEvent) -> Option<ScreenId> {
    let from = event.from.as_ref()?;
    if event.contains(from) {
        return None;
    }
    from.screen_id()
}

/// The screen a surface event evicts, if any.
pub fn evicted_by(event: &SurfaceEvent, evict_on_dismiss: bool) -> Option<ScreenId> {
    match event {
        SurfaceEvent::DidShow(show) => evicted_screen(show),
        SurfaceEvent::Dismissed(unit) if evict_on_dismiss => unit.screen_id(),
        SurfaceEvent::Dismissed(_) | SurfaceEvent::Presented(_) => None,
    }
}

/// Watches one surface and reports the identities of removed screens to
/// every subscriber, none skipped however far behind it is.
///
/// Dropping the monitor stops watching and closes every [`EvictionStream`].
pub struct StackCleanupMonitor {
    tx: Fanout<ScreenId>,
    subscriptions: SubscriptionSet,
}

impl StackCleanupMonitor {
    /// Start watching `surface`.
    ///
    /// Events raised after this returns are guaranteed to be seen.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn bind(surface: &dyn NavigationSurface, config: &CoordinatorConfig) -> Self {
        let tx = Fanout::new();
        let mut events = surface.subscribe();
        let evict_on_dismiss = config.evict_on_dismiss;
        let sender = tx.clone();

        let mut subscriptions = SubscriptionSet::new();
        subscriptions.spawn(async move {
            while let Some(event) = events.recv().await {
                if let Some(id) = evicted_by(&event, evict_on_dismiss) {
                    tracing::debug!(screen = %id, "screen left the surface");
                    sender.send(id);
                }
            }
        });

        Self { tx, subscriptions }
    }

    pub fn subscribe(&self) -> EvictionStream {
        EvictionStream {
            rx: self.tx.subscribe(),
        }
    }

    /// Whether the watching task is still running.
    pub fn is_active(&self) -> bool {
        self.subscriptions.active_count() > 0
    }
}

impl std::fmt::Debug for StackCleanupMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StackCleanupMonitor")
            .field("listeners", &self.tx.receiver_count())
            .finish()
    }
}

/// Identities of screens removed from a surface.
#[derive(Debug)]
pub struct EvictionStream {
    rx: mpsc::UnboundedReceiver<ScreenId>,
}

impl EvictionStream {
    /// Wait for the next eviction. `None` once the monitor is gone.
    pub async fn next(&mut self) -> Option<ScreenId> {
        self.rx.recv().await
    }
}
