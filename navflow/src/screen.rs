//! Screen contracts.
//!
//! The core never looks inside a screen. It needs three capabilities:
//! - a [`DisplayUnit`] the host surface can push or present,
//! - a stable [`ScreenId`] on units that belong to navigable screens,
//! - optionally a [`NavigationEventSource`] to listen to.

use crate::intent::{IntentChannel, IntentStream};
use std::any::Any;
use std::sync::Arc;
use uuid::Uuid;

/// Identity of one screen instance. Generated once, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScreenId(Uuid);

impl ScreenId {
    /// Generate a fresh identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ScreenId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ScreenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Something a host surface can show.
pub trait DisplayUnit: Any + Send + Sync {
    /// Human readable title, used by hosts and logs.
    fn title(&self) -> &str;

    /// Downcast hook for hosts that render concrete unit types.
    fn as_any(&self) -> &dyn Any;

    /// The owning screen's identity, if this unit belongs to a navigable screen.
    fn screen_id(&self) -> Option<ScreenId> {
        None
    }

    /// The intent source behind this unit, if it emits navigation intents.
    fn event_source(&self) -> Option<&dyn NavigationEventSource> {
        None
    }
}

/// The Screen Identity Contract.
pub trait Screen: Send + Sync {
    fn id(&self) -> ScreenId;

    fn display_unit(&self) -> Arc<dyn DisplayUnit>;
}

/// The Navigation Event Source Contract.
pub trait NavigationEventSource: Send + Sync {
    /// Open a stream of optional intents.
    fn intents(&self) -> IntentStream;
}

impl NavigationEventSource for IntentChannel {
    fn intents(&self) -> IntentStream {
        self.subscribe()
    }
}

/// A screen's controller: what a [`HostedScreen`] wraps.
pub trait View: Send + Sync + 'static {
    fn title(&self) -> &str;

    fn event_source(&self) -> Option<&dyn NavigationEventSource> {
        None
    }
}

/// A view paired with a freshly generated [`ScreenId`].
///
/// `Arc<HostedScreen<V>>` is a [`Screen`] whose display unit is itself, so the
/// unit found on a host stack can always be traced back to its identity.
#[derive(Debug)]
pub struct HostedScreen<V> {
    id: ScreenId,
    view: V,
}

impl<V: View> HostedScreen<V> {
    pub fn new(view: V) -> Arc<Self> {
        Arc::new(Self {
            id: ScreenId::new(),
            view,
        })
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}

impl<V: View> DisplayUnit for HostedScreen<V> {
    fn title(&self) -> &str {
        self.view.title()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn screen_id(&self) -> Option<ScreenId> {
        Some(self.id)
    }

    fn event_source(&self) -> Option<&dyn NavigationEventSource> {
        self.view.event_source()
    }
}

impl<V: View> Screen for Arc<HostedScreen<V>> {
    fn id(&self) -> ScreenId {
        self.id
    }

    fn display_unit(&self) -> Arc<dyn DisplayUnit> {
        Arc::clone(self) as Arc<dyn DisplayUnit>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Plain;

    impl View for Plain {
        fn title(&self) -> &str {
            "plain"
        }
    }

    struct Emitting(IntentChannel);

    impl View for Emitting {
        fn title(&self) -> &str {
            "emitting"
        }

        fn event_source(&self) -> Option<&dyn NavigationEventSource> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_screen_ids_are_unique() {
        let ids: HashSet<ScreenId> = (0..1000).map(|_| ScreenId::new()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_hosted_screen_unit_carries_identity() {
        let screen = HostedScreen::new(Plain);
        let unit = screen.display_unit();
        assert_eq!(unit.screen_id(), Some(screen.id()));
        assert_eq!(unit.title(), "plain");
        assert!(unit.event_source().is_none());
        assert!(unit.as_any().downcast_ref::<HostedScreen<Plain>>().is_some());
    }

    #[test]
    fn test_two_screens_of_same_view_differ() {
        let a = HostedScreen::new(Plain);
        let b = HostedScreen::new(Plain);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_event_source_capability_is_forwarded() {
        let channel = IntentChannel::new();
        let screen = HostedScreen::new(Emitting(channel.clone()));
        let unit = screen.display_unit();
        let _stream = unit.event_source().map(|source| source.intents());
        assert_eq!(channel.subscriber_count(), 1);
    }
}
