//! In-memory navigation stack.
//!
//! `NavigationStack` keeps a stack of pushed units on top of a fixed root plus
//! a stack of modal units, and sends a [`SurfaceEvent`] to every subscriber
//! for every change.
//! Hosts drive `pop`/`dismiss` themselves in response to user input; those
//! are the removals coordinators learn about only through events.

use super::traits::{NavigationSurface, ShowEvent, SurfaceEvent};
use crate::fanout::Fanout;
use crate::screen::DisplayUnit;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::mpsc;

struct StackState {
    stack: Vec<Arc<dyn DisplayUnit>>,
    modals: Vec<Arc<dyn DisplayUnit>>,
}

/// A stack-based host surface with modal presentation.
///
/// # Example
/// ```ignore
/// let stack = NavigationStack::new(home.display_unit());
/// stack.push(settings.display_unit());
/// assert_eq!(stack.depth(), 2);
/// stack.pop();
/// assert_eq!(stack.depth(), 1);
/// ```
pub struct NavigationStack {
    state: RwLock<StackState>,
    tx: Fanout<SurfaceEvent>,
}

impl NavigationStack {
    /// Create a stack showing `root`. The root is never popped.
    pub fn new(root: Arc<dyn DisplayUnit>) -> Self {
        Self {
            state: RwLock::new(StackState {
                stack: vec![root],
                modals: Vec::new(),
            }),
            tx: Fanout::new(),
        }
    }

    // The state is a pair of Vecs mutated in single steps, so it is sound to
    // keep using it after a panic elsewhere.
    fn read(&self) -> RwLockReadGuard<'_, StackState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StackState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // Called with the write lock held so observers see events in mutation order.
    fn notify(&self, event: SurfaceEvent) {
        tracing::trace!(?event, "surface event");
        self.tx.send(event);
    }

    /// Pop the top pushed unit, like a back gesture. Returns `None` at the root.
    pub fn pop(&self) -> Option<Arc<dyn DisplayUnit>> {
        let mut state = self.write();
        if state.stack.len() <= 1 {
            return None;
        }
        let popped = state.stack.pop()?;
        let shown = state.stack.last().cloned()?;
        tracing::debug!(from = popped.title(), to = shown.title(), "pop");
        self.notify(SurfaceEvent::DidShow(ShowEvent {
            shown,
            from: Some(Arc::clone(&popped)),
            screens: state.stack.clone(),
        }));
        Some(popped)
    }

    /// Pop everything above the root, top first, one event per removed unit.
    pub fn pop_to_root(&self) -> Vec<Arc<dyn DisplayUnit>> {
        let mut popped = Vec::new();
        while let Some(unit) = self.pop() {
            popped.push(unit);
        }
        popped
    }

    /// Dismiss the top modal unit. Returns `None` when nothing is presented.
    pub fn dismiss(&self) -> Option<Arc<dyn DisplayUnit>> {
        let mut state = self.write();
        let dismissed = state.modals.pop()?;
        tracing::debug!(unit = dismissed.title(), "dismiss");
        self.notify(SurfaceEvent::Dismissed(Arc::clone(&dismissed)));
        Some(dismissed)
    }

    /// The visible unit: the top modal if any, else the top of the stack.
    pub fn top(&self) -> Option<Arc<dyn DisplayUnit>> {
        let state = self.read();
        state.modals.last().or(state.stack.last()).cloned()
    }

    /// Modal units, bottom first.
    pub fn presented(&self) -> Vec<Arc<dyn DisplayUnit>> {
        self.read().modals.clone()
    }

    /// Number of units on the stack, root included.
    pub fn depth(&self) -> usize {
        self.read().stack.len()
    }

    /// Whether the stack can go back.
    pub fn can_pop(&self) -> bool {
        self.depth() > 1
    }
}

impl NavigationSurface for NavigationStack {
    fn push(&self, unit: Arc<dyn DisplayUnit>) {
        let mut state = self.write();
        let from = state.stack.last().cloned();
        tracing::debug!(to = unit.title(), "push");
        state.stack.push(Arc::clone(&unit));
        self.notify(SurfaceEvent::DidShow(ShowEvent {
            shown: unit,
            from,
            screens: state.stack.clone(),
        }));
    }

    fn present(&self, unit: Arc<dyn DisplayUnit>) {
        let mut state = self.write();
        tracing::debug!(unit = unit.title(), "present");
        state.modals.push(Arc::clone(&unit));
        self.notify(SurfaceEvent::Presented(unit));
    }

    fn screens(&self) -> Vec<Arc<dyn DisplayUnit>> {
        self.read().stack.clone()
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<SurfaceEvent> {
        self.tx.subscribe()
    }
}
