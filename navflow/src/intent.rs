//! Navigation intents and the streams that carry them.
//!
//! A screen's controller owns an [`IntentChannel`] and emits typed intents on
//! it. Coordinators subscribe through [`IntentStream`], which carries the
//! intents type-erased as [`AnyIntent`]; each coordinator narrows the stream
//! back to its own intent type with [`narrow`] and silently drops the rest.

use crate::fanout::Fanout;
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::mpsc;

/// A closed set of symbolic "the user wants to go here" values.
///
/// Implement it with the `#[navigation_intent]` attribute rather than by hand:
///
/// ```ignore
/// use navflow::navigation_intent;
///
/// #[navigation_intent]
/// pub enum RootIntent {
///     StationList,
///     Chromecast,
///     Settings,
/// }
/// ```
pub trait NavigationIntent: Any + Clone + Debug + Send + Sync + 'static {
    /// Every case, in declaration order. Empty for screens with nowhere to go.
    const ALL: &'static [Self];

    /// The case name, for logs.
    fn name(&self) -> &'static str;
}

/// A type-erased intent as it travels on an intent stream.
pub type AnyIntent = Arc<dyn Any + Send + Sync>;

/// Recover a typed intent from an erased one.
///
/// Returns `None` when the intent belongs to some other intent type.
pub fn narrow<I: NavigationIntent>(intent: &AnyIntent) -> Option<I> {
    (**intent).downcast_ref::<I>().cloned()
}

/// The sending half of a screen's intent stream.
///
/// Cloning shares the same channel, so a controller can hand copies to the
/// closures that react to user input.
#[derive(Debug, Clone)]
pub struct IntentChannel {
    tx: Fanout<Option<AnyIntent>>,
}

impl IntentChannel {
    pub fn new() -> Self {
        Self { tx: Fanout::new() }
    }

    /// Emit a typed intent.
    pub fn emit<I: NavigationIntent>(&self, intent: I) {
        tracing::trace!(intent = intent.name(), "emit");
        self.emit_any(Arc::new(intent));
    }

    /// Emit an already erased intent.
    pub fn emit_any(&self, intent: AnyIntent) {
        // No subscribers just means no coordinator is listening yet.
        self.tx.send(Some(intent));
    }

    /// Emit the "nothing" value, resetting the screen's navigation request.
    pub fn clear(&self) {
        self.tx.send(None);
    }

    /// Open a new stream that sees every value emitted from now on.
    pub fn subscribe(&self) -> IntentStream {
        IntentStream {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of open streams.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for IntentChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// The receiving half of a screen's intent stream.
///
/// Every value emitted after `subscribe` is delivered, in emission order.
#[derive(Debug)]
pub struct IntentStream {
    rx: mpsc::UnboundedReceiver<Option<AnyIntent>>,
}

impl IntentStream {
    /// Wait for the next value.
    ///
    /// The outer `None` means the screen's channel is gone. The inner `None`
    /// is the "nothing" value.
    pub async fn next(&mut self) -> Option<Option<AnyIntent>> {
        self.rx.recv().await
    }
}
