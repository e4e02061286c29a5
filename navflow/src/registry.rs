//! Child coordinator registry.
//!
//! A coordinator owns its children through a [`SharedRegistry`]; the tasks
//! that react to intents and evictions only hold a [`WeakRegistry`], so they
//! never keep a torn down coordinator's children alive.

use crate::coordinator::AnyCoordinator;
use crate::screen::ScreenId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, Weak};
use tokio::sync::watch;

/// Child coordinators keyed by the identity of the screen they drive.
#[derive(Default)]
pub struct ChildRegistry {
    children: HashMap<ScreenId, Box<dyn AnyCoordinator>>,
    revision: usize,
}

impl ChildRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a child, handing back whatever was registered under `id` before.
    pub fn insert(
        &mut self,
        id: ScreenId,
        child: Box<dyn AnyCoordinator>,
    ) -> Option<Box<dyn AnyCoordinator>> {
        self.revision = self.revision.wrapping_add(1);
        self.children.insert(id, child)
    }

    /// Remove a child. Removing an absent id changes nothing, revision included.
    pub fn remove(&mut self, id: &ScreenId) -> Option<Box<dyn AnyCoordinator>> {
        let removed = self.children.remove(id);
        if removed.is_some() {
            self.revision = self.revision.wrapping_add(1);
        }
        removed
    }

    pub fn get(&self, id: &ScreenId) -> Option<&dyn AnyCoordinator> {
        self.children.get(id).map(|child| child.as_ref())
    }

    pub fn contains(&self, id: &ScreenId) -> bool {
        self.children.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Counts actual changes: inserts and removals that found something.
    pub fn revision(&self) -> usize {
        self.revision
    }

    /// Registered identities, sorted.
    pub fn ids(&self) -> Vec<ScreenId> {
        let mut ids: Vec<ScreenId> = self.children.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl std::fmt::Debug for ChildRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.ids()).finish()
    }
}

/// Owning handle to a registry.
///
/// Observers can wait on the registry's revision, which only moves when an
/// `update` actually changed the registry.
pub struct SharedRegistry {
    inner: Arc<RwLock<ChildRegistry>>,
    tx: watch::Sender<usize>,
}

/// Non-owning handle to a registry.
pub struct WeakRegistry {
    inner: Weak<RwLock<ChildRegistry>>,
    tx: watch::Sender<usize>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self {
            inner: Arc::new(RwLock::new(ChildRegistry::new())),
            tx,
        }
    }

    /// Mutate the registry and notify observers if it changed.
    ///
    /// Values returned from `f` are dropped after the lock is released, so
    /// return removed children instead of dropping them inside `f`.
    pub fn update<F, R>(&self, f: F) -> crate::Result<R>
    where
        F: FnOnce(&mut ChildRegistry) -> R,
    {
        let mut guard = self.inner.write().map_err(|_| crate::Error::LockPoisoned)?;
        let res = f(&mut guard);
        let revision = guard.revision();
        drop(guard);
        self.tx.send_if_modified(|current| {
            let changed = *current != revision;
            *current = revision;
            changed
        });
        Ok(res)
    }

    pub fn read<F, R>(&self, f: F) -> crate::Result<R>
    where
        F: FnOnce(&ChildRegistry) -> R,
    {
        let guard = self.inner.read().map_err(|_| crate::Error::LockPoisoned)?;
        Ok(f(&guard))
    }

    pub fn downgrade(&self) -> WeakRegistry {
        WeakRegistry {
            inner: Arc::downgrade(&self.inner),
            tx: self.tx.clone(),
        }
    }

    /// Watch the revision counter.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.tx.subscribe()
    }
}

impl Default for SharedRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WeakRegistry {
    /// Upgrade to an owning handle if the registry is still alive.
    pub fn upgrade(&self) -> Option<SharedRegistry> {
        self.inner.upgrade().map(|inner| SharedRegistry {
            inner,
            tx: self.tx.clone(),
        })
    }
}

impl Clone for WeakRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
            tx: self.tx.clone(),
        }
    }
}
