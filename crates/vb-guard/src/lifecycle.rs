//! Host lifecycle notifications and the subscription handle.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

const CHANNEL_CAPACITY: usize = 16;

/// Host application visibility transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    Foreground,
    Background,
    Inactive,
}

impl LifecycleEvent {
    /// Background and inactive both mean the operator may no longer be present.
    #[must_use]
    pub const fn leaves_foreground(self) -> bool {
        matches!(self, Self::Background | Self::Inactive)
    }
}

/// Broadcasts lifecycle events to every subscribed guard.
#[derive(Debug, Clone)]
pub struct LifecycleNotifier {
    tx: broadcast::Sender<LifecycleEvent>,
}

impl Default for LifecycleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleNotifier {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish an event; returns how many listeners will see it.
    pub fn publish(&self, event: LifecycleEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub(crate) fn receiver(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.tx.subscribe()
    }
}

/// Live lifecycle subscription. Releasing it (explicitly or on drop) stops
/// the listener task.
#[derive(Debug)]
pub struct LifecycleSubscription {
    handle: Option<JoinHandle<()>>,
}

impl LifecycleSubscription {
    pub(crate) const fn new(handle: JoinHandle<()>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop listening immediately. Events not yet handled are discarded.
    pub fn unsubscribe(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Wait for the listener to drain and exit.
    ///
    /// The listener exits once every `LifecycleNotifier` clone is dropped, so
    /// drop the notifier first or this waits forever.
    pub async fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            // Cancellation is the only error and it means the task is gone.
            let _ = handle.await;
        }
    }
}

impl Drop for LifecycleSubscription {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
