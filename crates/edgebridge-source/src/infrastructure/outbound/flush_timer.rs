//! Deadline flush for motion the coalescer is holding back.
//!
//! The coalescer only decides to emit when a sample arrives.  When the user
//! stops moving, the last few pixels would sit in it until the next event;
//! this task wakes at the flush deadline and sends them.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time;
use tracing::{debug, trace};

use crate::application::bridge_input::InputBridge;

/// Flushes held-back motion at its deadline until shutdown.
///
/// Sleeps until the bridge signals that motion is pending, then follows the
/// deadline, which moves forward whenever a sample flushes on its own.
pub async fn run_flush_timer(bridge: Arc<InputBridge>, mut shutdown: watch::Receiver<bool>) {
    debug!("flush timer started");
    'run: loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break 'run;
                }
                continue 'run;
            }
            _ = bridge.motion_pending() => {}
        }

        while let Some(deadline) = bridge.flush_deadline() {
            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break 'run;
                    }
                }
                _ = time::sleep_until(time::Instant::from_std(deadline)) => {
                    trace!("flush deadline reached");
                    bridge.flush_due();
                }
            }
        }
    }
    debug!("flush timer stopped");
}
