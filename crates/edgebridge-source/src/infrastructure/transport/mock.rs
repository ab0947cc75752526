//! In-memory transports.
//!
//! [`RecordingTransport`] keeps every packet it is handed so tests can assert
//! on the exact bytes that would have gone over the air.  [`LoggingTransport`]
//! stands in for the radio in the headless binary and discards packets after
//! logging them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use edgebridge_core::{decode_packet, Packet};
use tracing::trace;

use super::{LinkState, PacketTransport, TransportError};

/// A transport that records every sent payload.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Vec<u8>>>,
    should_fail: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent send fail with [`TransportError::Write`].
    pub fn set_failing(&self, failing: bool) {
        self.should_fail.store(failing, Ordering::SeqCst);
    }

    /// Raw payloads in send order.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Sent payloads decoded back into packets.  Undecodable payloads are skipped.
    pub fn sent_packets(&self) -> Vec<Packet> {
        self.sent()
            .iter()
            .filter_map(|bytes| decode_packet(bytes).ok())
            .collect()
    }
}

#[async_trait]
impl PacketTransport for RecordingTransport {
    async fn send(&self, bytes: &[u8]) -> Result<(), TransportError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(TransportError::Write("injected failure".to_string()));
        }
        self.sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(bytes.to_vec());
        Ok(())
    }
}

/// A transport that logs each payload at `trace` level and drops it.
///
/// Like a real notification channel it refuses to send while no receiver
/// is subscribed.
#[derive(Debug)]
pub struct LoggingTransport {
    link: Arc<LinkState>,
}

impl LoggingTransport {
    pub fn new(link: Arc<LinkState>) -> Self {
        Self { link }
    }
}

#[async_trait]
impl PacketTransport for LoggingTransport {
    async fn send(&self, bytes: &[u8]) -> Result<(), TransportError> {
        if !self.link.is_subscribed() {
            return Err(TransportError::NotSubscribed);
        }
        trace!(?bytes, "notification");
        Ok(())
    }
}
