//! Outbound packet queue between the hook thread and the send loop.
//!
//! The hook thread must never block, so it hands packets to an unbounded
//! channel through [`OutboundSender::enqueue`].  The single consumer,
//! [`OutboundQueue`], merges runs of consecutive MouseMove packets as it
//! dequeues them.  While the radio is slow, motion therefore collapses into
//! one packet instead of piling up, and discrete packets (buttons, keys,
//! wheel) are never merged or dropped.

use edgebridge_core::{clamp_i16, Packet};
use tokio::sync::mpsc;
use tracing::trace;

pub mod flush_timer;
pub mod send_loop;

pub use flush_timer::run_flush_timer;
pub use send_loop::{SendLoop, SendStats};

/// Creates a connected sender/queue pair.
pub fn outbound_channel() -> (OutboundSender, OutboundQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        OutboundSender { tx },
        OutboundQueue {
            rx,
            held: None,
            merged: 0,
        },
    )
}

/// Producer half, safe to call from the OS hook thread.
#[derive(Debug, Clone)]
pub struct OutboundSender {
    tx: mpsc::UnboundedSender<Packet>,
}

impl OutboundSender {
    /// Queues a packet without blocking.
    ///
    /// Returns `false` if the send loop has already shut down, in which case
    /// the packet is discarded.
    pub fn enqueue(&self, packet: Packet) -> bool {
        let accepted = self.tx.send(packet).is_ok();
        if !accepted {
            trace!(?packet, "outbound queue closed; packet discarded");
        }
        accepted
    }
}

/// Consumer half, owned by the send loop.
#[derive(Debug)]
pub struct OutboundQueue {
    rx: mpsc::UnboundedReceiver<Packet>,
    /// A discrete packet found while merging motion; it becomes the next head.
    held: Option<Packet>,
    merged: u64,
}

impl OutboundQueue {
    /// Waits for the next packet, merging any MouseMove run behind it.
    ///
    /// Returns `None` once every sender is gone and the queue is empty.
    pub async fn next(&mut self) -> Option<Packet> {
        let head = match self.held.take() {
            Some(packet) => packet,
            None => self.rx.recv().await?,
        };
        Some(self.merge_motion(head))
    }

    /// Like [`next`](Self::next) but returns `None` immediately when the
    /// queue is empty.
    pub fn try_next(&mut self) -> Option<Packet> {
        let head = match self.held.take() {
            Some(packet) => packet,
            None => self.rx.try_recv().ok()?,
        };
        Some(self.merge_motion(head))
    }

    /// Stops accepting new packets; already queued packets stay readable.
    pub fn close(&mut self) {
        self.rx.close();
    }

    /// Number of MouseMove packets folded into an earlier one so far.
    pub fn merged(&self) -> u64 {
        self.merged
    }

    fn merge_motion(&mut self, head: Packet) -> Packet {
        let Packet::MouseMove { mut dx, mut dy } = head else {
            return head;
        };
        while let Ok(next) = self.rx.try_recv() {
            match next {
                Packet::MouseMove { dx: ndx, dy: ndy } => {
                    dx = clamp_i16(i32::from(dx) + i32::from(ndx));
                    dy = clamp_i16(i32::from(dy) + i32::from(ndy));
                    self.merged += 1;
                }
                other => {
                    self.held = Some(other);
                    break;
                }
            }
        }
        Packet::MouseMove { dx, dy }
    }
}
