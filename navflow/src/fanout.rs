//! Lossless one-to-many delivery.
//!
//! Every subscriber gets its own unbounded queue. A slow reader falls behind
//! but never misses a value, which eviction and intent delivery depend on.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

/// Sending side shared by every clone. Receivers close once all clones are gone.
pub struct Fanout<T> {
    senders: Arc<Mutex<Vec<mpsc::UnboundedSender<T>>>>,
}

impl<T: Clone> Fanout<T> {
    pub fn new() -> Self {
        Self {
            senders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Open a receiver that sees every value sent from now on.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().push(tx);
        rx
    }

    /// Deliver `value` to every open receiver, forgetting the closed ones.
    pub fn send(&self, value: T) {
        self.lock().retain(|tx| tx.send(value.clone()).is_ok());
    }

    /// Number of receivers still open.
    pub fn receiver_count(&self) -> usize {
        let mut senders = self.lock();
        senders.retain(|tx| !tx.is_closed());
        senders.len()
    }

    // A Vec of senders is never left half-updated.
    fn lock(&self) -> MutexGuard<'_, Vec<mpsc::UnboundedSender<T>>> {
        self.senders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Default for Fanout<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Fanout<T> {
    fn clone(&self) -> Self {
        Self {
            senders: Arc::clone(&self.senders),
        }
    }
}

impl<T: Clone> std::fmt::Debug for Fanout<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fanout")
            .field("receivers", &self.receiver_count())
            .finish()
    }
}
