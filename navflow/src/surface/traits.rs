//! Navigation surface trait definition.

use crate::screen::DisplayUnit;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Whether two handles point at the same unit.
pub fn same_unit(a: &Arc<dyn DisplayUnit>, b: &Arc<dyn DisplayUnit>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// "A new top screen is showing."
///
/// `screens` is the stack right after the transition, bottom first. Taking the
/// snapshot when the event is raised keeps later transitions from leaking into
/// the diff a listener does.
#[derive(Clone)]
pub struct ShowEvent {
    pub shown: Arc<dyn DisplayUnit>,
    pub from: Option<Arc<dyn DisplayUnit>>,
    pub screens: Vec<Arc<dyn DisplayUnit>>,
}

impl ShowEvent {
    /// Whether `unit` is still on the stack after the transition.
    pub fn contains(&self, unit: &Arc<dyn DisplayUnit>) -> bool {
        self.screens.iter().any(|screen| same_unit(screen, unit))
    }
}

impl std::fmt::Debug for ShowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShowEvent")
            .field("shown", &self.shown.title())
            .field("from", &self.from.as_ref().map(|unit| unit.title()))
            .field("depth", &self.screens.len())
            .finish()
    }
}

/// Notifications a surface sends to its observers.
#[derive(Clone)]
pub enum SurfaceEvent {
    /// The stack settled on a new top screen (push or pop).
    DidShow(ShowEvent),
    /// A unit was presented modally.
    Presented(Arc<dyn DisplayUnit>),
    /// A modally presented unit went away.
    Dismissed(Arc<dyn DisplayUnit>),
}

impl std::fmt::Debug for SurfaceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceEvent::DidShow(event) => f.debug_tuple("DidShow").field(event).finish(),
            SurfaceEvent::Presented(unit) => f.debug_tuple("Presented").field(&unit.title()).finish(),
            SurfaceEvent::Dismissed(unit) => f.debug_tuple("Dismissed").field(&unit.title()).finish(),
        }
    }
}

/// The host navigation surface a coordinator issues transitions against.
///
/// Implementations are shared by every coordinator in a parent/child chain, so
/// all methods take `&self`.
pub trait NavigationSurface: Send + Sync {
    /// Push onto the stack, keeping back navigation.
    fn push(&self, unit: Arc<dyn DisplayUnit>);

    /// Show modally over whatever is visible.
    fn present(&self, unit: Arc<dyn DisplayUnit>);

    /// Current stack, bottom first.
    fn screens(&self) -> Vec<Arc<dyn DisplayUnit>>;

    /// Observe transitions, including those the coordinator did not issue.
    ///
    /// Every event raised after this returns must be delivered, in order; a
    /// dropped event is a child coordinator that never gets evicted.
    /// [`Fanout`](crate::fanout::Fanout) gives implementations that for free.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<SurfaceEvent>;
}
