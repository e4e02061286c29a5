//! The coordinator: one node of the coordinator tree.
//!
//! A `Coordinator<I>` listens to the intents its screen emits and to the
//! evictions its surface's cleanup monitor reports:
//!
//! ```text
//!   screen ──intent──▶ flow resolver ──FlowResult──▶ registry += child
//!                                                     surface.push / present
//!   surface ──DidShow──▶ cleanup monitor ──ScreenId──▶ registry -= child
//! ```
//!
//! Both listeners hold only a weak handle to the registry, and both are
//! cancelled when the coordinator is dropped. Dropping a child from the
//! registry therefore tears down its whole subtree.

pub mod traits;

pub use traits::{AnyCoordinator, FlowResolver, FlowResult, Transition};

use crate::config::CoordinatorConfig;
use crate::intent::{narrow, IntentStream, NavigationIntent};
use crate::monitor::{EvictionStream, StackCleanupMonitor};
use crate::registry::{SharedRegistry, WeakRegistry};
use crate::screen::{Screen, ScreenId};
use crate::subscription::SubscriptionSet;
use crate::surface::NavigationSurface;
use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::watch;

/// Coordinates navigation away from one screen.
///
/// # Example
/// ```ignore
/// let coordinator = Coordinator::new(&home, Some(stack.clone()), move |intent: &RootIntent| {
///     match intent {
///         RootIntent::StationList => {
///             let screen = HostedScreen::new(StationListView::new());
///             let child = Coordinator::new(&screen, Some(stack.clone()), station_flow(stack.clone()));
///             Some(FlowResult::push(child, &screen))
///         }
///         RootIntent::Chromecast | RootIntent::Settings => None,
///     }
/// });
/// ```
pub struct Coordinator<I: NavigationIntent> {
    subscriptions: SubscriptionSet,
    monitor: Option<StackCleanupMonitor>,
    surface: Option<Arc<dyn NavigationSurface>>,
    children: SharedRegistry,
    screen: ScreenId,
    _intent: PhantomData<fn(I)>,
}

impl<I: NavigationIntent> Coordinator<I> {
    /// Create a coordinator with the default config.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime while there is anything to
    /// listen to (a surface, or a screen that emits intents).
    pub fn new<F>(screen: &dyn Screen, surface: Option<Arc<dyn NavigationSurface>>, flow: F) -> Self
    where
        F: FlowResolver<I>,
    {
        Self::with_config(screen, surface, flow, &CoordinatorConfig::default())
    }

    pub fn with_config<F>(
        screen: &dyn Screen,
        surface: Option<Arc<dyn NavigationSurface>>,
        flow: F,
        config: &CoordinatorConfig,
    ) -> Self
    where
        F: FlowResolver<I>,
    {
        let screen_id = screen.id();
        let children = SharedRegistry::new();
        let mut subscriptions = SubscriptionSet::new();

        let monitor = surface
            .as_deref()
            .map(|surface| StackCleanupMonitor::bind(surface, config));
        if let Some(monitor) = &monitor {
            subscriptions.spawn(evict_children(monitor.subscribe(), children.downgrade()));
        }

        match screen.display_unit().event_source() {
            Some(source) => {
                let intents = source.intents();
                subscriptions.spawn(follow_intents(
                    intents,
                    flow,
                    children.downgrade(),
                    surface.clone(),
                    screen_id,
                ));
            }
            None => tracing::debug!(screen = %screen_id, "screen emits no intents; leaf coordinator"),
        }

        Self {
            subscriptions,
            monitor,
            surface,
            children,
            screen: screen_id,
            _intent: PhantomData,
        }
    }

    /// Register `child` as the coordinator of screen `id`.
    ///
    /// A child already registered under `id` is replaced and torn down.
    pub fn add_child(&self, child: Box<dyn AnyCoordinator>, id: ScreenId) -> crate::Result<()> {
        insert_child(&self.children, child, id)
    }

    /// Drop the child registered under `id`, if any.
    pub fn remove_child(&self, id: ScreenId) -> crate::Result<()> {
        remove_child(&self.children, id)
    }

    pub fn contains_child(&self, id: ScreenId) -> bool {
        self.children.read(|r| r.contains(&id)).unwrap_or(false)
    }

    /// Identity of the screen this coordinator listens to.
    pub fn screen_id(&self) -> ScreenId {
        self.screen
    }

    pub fn surface(&self) -> Option<&Arc<dyn NavigationSurface>> {
        self.surface.as_ref()
    }

    /// A receiver that changes whenever the child registry does.
    pub fn watch_children(&self) -> watch::Receiver<usize> {
        self.children.subscribe()
    }

    /// Whether a cleanup monitor is watching this coordinator's surface.
    pub fn is_watching_surface(&self) -> bool {
        self.monitor.as_ref().is_some_and(StackCleanupMonitor::is_active)
    }

    /// Number of streams this coordinator is still listening to.
    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.active_count()
    }
}

impl<I: NavigationIntent> AnyCoordinator for Coordinator<I> {
    fn child_ids(&self) -> Vec<ScreenId> {
        match self.children.read(|r| r.ids()) {
            Ok(ids) => ids,
            Err(err) => {
                tracing::error!(screen = %self.screen, %err, "cannot list children");
                Vec::new()
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<I: NavigationIntent> std::fmt::Debug for Coordinator<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("intent", &std::any::type_name::<I>())
            .field("screen", &self.screen)
            .field("children", &self.child_ids())
            .field("has_surface", &self.surface.is_some())
            .finish()
    }
}

fn insert_child(
    registry: &SharedRegistry,
    child: Box<dyn AnyCoordinator>,
    id: ScreenId,
) -> crate::Result<()> {
    let replaced = registry.update(|r| r.insert(id, child))?;
    if replaced.is_some() {
        tracing::warn!(screen = %id, "child coordinator replaced without eviction");
    }
    // `replaced` drops here, outside the registry lock.
    Ok(())
}

fn remove_child(registry: &SharedRegistry, id: ScreenId) -> crate::Result<()> {
    let removed = registry.update(|r| r.remove(&id))?;
    if removed.is_some() {
        tracing::debug!(screen = %id, "child coordinator evicted");
    }
    Ok(())
}

async fn evict_children(mut evictions: EvictionStream, registry: WeakRegistry) {
    while let Some(id) = evictions.next().await {
        let Some(registry) = registry.upgrade() else {
            break;
        };
        if let Err(err) = remove_child(&registry, id) {
            tracing::error!(screen = %id, %err, "eviction failed");
        }
    }
}

async fn follow_intents<I, F>(
    mut intents: IntentStream,
    flow: F,
    registry: WeakRegistry,
    surface: Option<Arc<dyn NavigationSurface>>,
    screen: ScreenId,
) where
    I: NavigationIntent,
    F: FlowResolver<I>,
{
    while let Some(value) = intents.next().await {
        let Some(value) = value else {
            continue;
        };
        let Some(intent) = narrow::<I>(&value) else {
            tracing::trace!(screen = %screen, "ignoring intent of another type");
            continue;
        };
        let Some(registry) = registry.upgrade() else {
            break;
        };

        let Some(FlowResult {
            child,
            screen: next,
            transition,
        }) = flow.resolve(&intent)
        else {
            tracing::debug!(screen = %screen, intent = intent.name(), "intent leads nowhere");
            continue;
        };

        tracing::debug!(
            screen = %screen,
            intent = intent.name(),
            next = %next,
            ?transition,
            "navigating"
        );
        if let Err(err) = insert_child(&registry, child, next) {
            tracing::error!(screen = %screen, %err, "cannot register child coordinator");
            continue;
        }

        match surface.as_deref() {
            Some(surface) => match transition {
                Transition::Push(unit) => surface.push(unit),
                Transition::Present(unit) => surface.present(unit),
            },
            None => tracing::warn!(screen = %screen, ?transition, "no navigation surface; transition dropped"),
        }
    }
}
