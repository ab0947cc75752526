//! Receiver subscription state shared between the transport and the bridge.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::application::bridge_input::InputBridge;

/// Whether a receiver is currently subscribed to packet notifications.
///
/// The transport owns and updates this; the bridge only reads it.  Reads are
/// lock-free so the hook thread can consult it on every motion sample.
#[derive(Debug)]
pub struct LinkState {
    subscribed: AtomicBool,
    changes: watch::Sender<bool>,
}

impl LinkState {
    /// Creates a link with no receiver.
    pub fn new() -> Self {
        let (changes, _) = watch::channel(false);
        Self {
            subscribed: AtomicBool::new(false),
            changes,
        }
    }

    /// Records a subscription change and notifies watchers.
    pub fn set_subscribed(&self, subscribed: bool) {
        self.subscribed.store(subscribed, Ordering::Release);
        self.changes.send_replace(subscribed);
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::Acquire)
    }

    /// Returns a receiver that wakes on every subscription change.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.changes.subscribe()
    }
}

impl Default for LinkState {
    fn default() -> Self {
        Self::new()
    }
}

/// Forwards subscription changes into the bridge until shutdown.
///
/// Losing the receiver while in Remote mode forces Local mode immediately,
/// without waiting for the next input event.
///
/// The subscription is taken when this is called, not when the returned
/// future first runs, and the current state is applied on entry.  A loss
/// that lands between spawning the watcher and its first poll is therefore
/// never missed.
pub fn watch_link(
    link: &LinkState,
    bridge: Arc<InputBridge>,
    mut shutdown: watch::Receiver<bool>,
) -> impl Future<Output = ()> + Send + 'static {
    let mut changes = link.subscribe();
    async move {
        let subscribed = *changes.borrow_and_update();
        debug!(subscribed, "link watcher started");
        bridge.on_link_changed(subscribed);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.changed() => break,
                changed = changes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let subscribed = *changes.borrow_and_update();
                    info!(subscribed, "receiver subscription changed");
                    bridge.on_link_changed(subscribed);
                }
            }
        }
        debug!("link watcher stopped");
    }
}
