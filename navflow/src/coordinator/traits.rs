//! Coordinator traits and flow resolution types.

use crate::intent::NavigationIntent;
use crate::screen::{DisplayUnit, Screen, ScreenId};
use std::any::Any;
use std::sync::Arc;

/// A coordinator of any intent type.
///
/// This is what a parent stores for its children, so children driving
/// different intent types fit in one registry.
pub trait AnyCoordinator: Any + Send + Sync {
    /// Identities of the screens this coordinator's children drive.
    fn child_ids(&self) -> Vec<ScreenId>;

    fn child_count(&self) -> usize {
        self.child_ids().len()
    }

    fn as_any(&self) -> &dyn Any;
}

/// How a new screen is shown.
#[derive(Clone)]
pub enum Transition {
    /// Push onto the stack, keeping back navigation.
    Push(Arc<dyn DisplayUnit>),
    /// Present modally.
    Present(Arc<dyn DisplayUnit>),
}

impl Transition {
    pub fn unit(&self) -> &Arc<dyn DisplayUnit> {
        match self {
            Transition::Push(unit) | Transition::Present(unit) => unit,
        }
    }

    pub fn is_modal(&self) -> bool {
        matches!(self, Transition::Present(_))
    }
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_modal() { "Present" } else { "Push" };
        f.debug_tuple(kind).field(&self.unit().title()).finish()
    }
}

/// What a flow resolver decided for one intent: the child coordinator to
/// keep alive, the identity of its screen, and how to show that screen.
pub struct FlowResult {
    pub child: Box<dyn AnyCoordinator>,
    pub screen: ScreenId,
    pub transition: Transition,
}

impl FlowResult {
    /// Push `screen`, driven by `child`.
    pub fn push(child: impl AnyCoordinator, screen: &dyn Screen) -> Self {
        Self {
            child: Box::new(child),
            screen: screen.id(),
            transition: Transition::Push(screen.display_unit()),
        }
    }

    /// Present `screen` modally, driven by `child`.
    pub fn present(child: impl AnyCoordinator, screen: &dyn Screen) -> Self {
        Self {
            child: Box::new(child),
            screen: screen.id(),
            transition: Transition::Present(screen.display_unit()),
        }
    }
}

impl std::fmt::Debug for FlowResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowResult")
            .field("screen", &self.screen)
            .field("transition", &self.transition)
            .finish_non_exhaustive()
    }
}

/// Decides what an intent leads to.
///
/// Must handle every case of `I`, returning `None` for the ones that lead
/// nowhere. Any `Fn(&I) -> Option<FlowResult>` closure is a resolver.
pub trait FlowResolver<I: NavigationIntent>: Send + Sync + 'static {
    fn resolve(&self, intent: &I) -> Option<FlowResult>;
}

impl<I, F> FlowResolver<I> for F
where
    I: NavigationIntent,
    F: Fn(&I) -> Option<FlowResult> + Send + Sync + 'static,
{
    fn resolve(&self, intent: &I) -> Option<FlowResult> {
        self(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::{HostedScreen, View};
    use crate::surface::same_unit;

    struct Page;

    impl View for Page {
        fn title(&self) -> &str {
            "page"
        }
    }

    #[test]
    fn test_transition_exposes_its_unit() {
        let screen = HostedScreen::new(Page);
        let push = Transition::Push(screen.display_unit());
        let present = Transition::Present(screen.display_unit());

        assert!(same_unit(push.unit(), &screen.display_unit()));
        assert!(same_unit(present.unit(), push.unit()));
        assert!(!push.is_modal());
        assert!(present.is_modal());
        assert_eq!(format!("{push:?}"), "Push(\"page\")");
        assert_eq!(format!("{present:?}"), "Present(\"page\")");
    }
}
