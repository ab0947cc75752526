//! The asynchronous send loop.
//!
//! Runs as one tokio task: takes coalesced packets from the
//! [`OutboundQueue`], encodes them and awaits the transport one at a time.
//! A failed send is logged and counted; the packet is not retried, since a
//! stale motion or key event is worse than a lost one.

use std::sync::Arc;

use edgebridge_core::protocol::{encode_packet_into, Packet, MAX_PACKET_LEN};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::OutboundQueue;
use crate::infrastructure::transport::PacketTransport;

/// Counters reported when the send loop exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendStats {
    /// Packets the transport accepted.
    pub sent: u64,
    /// Packets the transport rejected.
    pub failed: u64,
    /// MouseMove packets folded into a neighbour before sending.
    pub merged: u64,
}

/// Consumer of the outbound queue.
pub struct SendLoop {
    queue: OutboundQueue,
    transport: Arc<dyn PacketTransport>,
    shutdown: watch::Receiver<bool>,
    buf: Vec<u8>,
    stats: SendStats,
}

impl SendLoop {
    pub fn new(
        queue: OutboundQueue,
        transport: Arc<dyn PacketTransport>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            queue,
            transport,
            shutdown,
            buf: Vec::with_capacity(MAX_PACKET_LEN),
            stats: SendStats::default(),
        }
    }

    /// Sends packets until shutdown is signalled or every sender is gone.
    ///
    /// On shutdown the queue is closed and whatever is still in it is sent
    /// best-effort before returning.
    pub async fn run(mut self) -> SendStats {
        debug!("send loop started");
        loop {
            let packet = tokio::select! {
                biased;
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                    continue;
                }
                next = self.queue.next() => match next {
                    Some(packet) => packet,
                    None => break,
                },
            };
            self.send(packet).await;
        }

        self.queue.close();
        while let Some(packet) = self.queue.try_next() {
            self.send(packet).await;
        }

        self.stats.merged = self.queue.merged();
        info!(
            sent = self.stats.sent,
            failed = self.stats.failed,
            merged = self.stats.merged,
            "send loop stopped"
        );
        self.stats
    }

    async fn send(&mut self, packet: Packet) {
        self.buf.clear();
        encode_packet_into(&packet, &mut self.buf);
        match self.transport.send(&self.buf).await {
            Ok(()) => self.stats.sent += 1,
            Err(e) => {
                self.stats.failed += 1;
                warn!(error = %e, ?packet, "send failed; packet dropped");
            }
        }
    }
}
