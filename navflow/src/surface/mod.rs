//! Host navigation surface.
//!
//! Provides the `NavigationSurface` contract the coordinator drives, and
//! `NavigationStack`, an in-memory surface for hosts and tests.

pub mod stack;
pub mod traits;

pub use stack::NavigationStack;
pub use traits::{same_unit, NavigationSurface, ShowEvent, SurfaceEvent};
