//! Coordinator tree for screen navigation.
//!
//! Screens emit navigation intents. A [`Coordinator`] turns each intent into a
//! child coordinator plus a push or present on the host [`NavigationSurface`],
//! and drops that child again when its screen leaves the surface, including
//! removals the coordinator did not issue, such as a back gesture.

extern crate self as navflow;

pub mod config;
pub mod coordinator;
pub mod error;
pub mod fanout;
pub mod intent;
pub mod monitor;
pub mod registry;
pub mod screen;
pub mod subscription;
pub mod surface;

pub use error::{Error, Result};

// Re-export common types for convenience
pub use config::CoordinatorConfig;
pub use coordinator::{AnyCoordinator, Coordinator, FlowResolver, FlowResult, Transition};
pub use fanout::Fanout;
pub use intent::{narrow, AnyIntent, IntentChannel, IntentStream, NavigationIntent};
pub use monitor::{evicted_screen, EvictionStream, StackCleanupMonitor};
pub use navflow_macros::navigation_intent;
pub use screen::{DisplayUnit, HostedScreen, NavigationEventSource, Screen, ScreenId, View};
pub use subscription::{SubscriptionHandle, SubscriptionSet};
pub use surface::{NavigationStack, NavigationSurface, ShowEvent, SurfaceEvent};
