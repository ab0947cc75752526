//! The inbound receive loop.
//!
//! The radio backend delivers each notification as one `Vec<u8>` on an mpsc
//! channel.  [`run_inbound`] owns the [`InboundDispatcher`] and feeds it one
//! payload at a time, so packets are injected in arrival order.

use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::application::dispatch_inbound::{DispatchStats, InboundDispatcher};

/// Capacity of the notification channel between the radio and the loop.
pub const INBOUND_CHANNEL_CAPACITY: usize = 256;

/// Creates the channel a radio backend pushes notifications into.
pub fn inbound_channel() -> (mpsc::Sender<Vec<u8>>, mpsc::Receiver<Vec<u8>>) {
    mpsc::channel(INBOUND_CHANNEL_CAPACITY)
}

/// Dispatches notifications until shutdown or until the radio side closes.
///
/// Returns the dispatcher's final counters.  Notifications still queued when
/// shutdown is signalled are discarded: once the target stops, injecting
/// stale input would surprise the user.
pub async fn run_inbound(
    mut notifications: mpsc::Receiver<Vec<u8>>,
    mut dispatcher: InboundDispatcher,
    mut shutdown: watch::Receiver<bool>,
) -> DispatchStats {
    debug!("inbound loop started");
    loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            next = notifications.recv() => match next {
                Some(bytes) => {
                    dispatcher.dispatch(&bytes);
                }
                None => {
                    debug!("notification channel closed");
                    break;
                }
            },
        }
    }

    let stats = dispatcher.stats();
    info!(
        injected = stats.injected,
        skipped_keys = stats.skipped_keys,
        dropped = stats.dropped,
        "inbound loop stopped"
    );
    stats
}
