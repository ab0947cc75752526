//! Radio transport seam for the source application.
//!
//! Establishing the wireless session (advertising, accepting a connection,
//! tracking the receiver's notification subscription) belongs to the
//! platform integration.  The bridge only needs two things from it:
//!
//! - a way to push one encoded packet as one notification
//!   ([`PacketTransport`]), and
//! - the "has an active receiver" flag with change notification
//!   ([`link::LinkState`]).

use async_trait::async_trait;
use thiserror::Error;

pub mod link;
pub mod mock;

pub use link::{watch_link, LinkState};

/// Error type for transport sends.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No receiver is subscribed to notifications.
    #[error("no receiver is subscribed")]
    NotSubscribed,

    /// The radio stack rejected or failed the write.
    #[error("notification write failed: {0}")]
    Write(String),
}

/// Delivers encoded packets to the target.
///
/// Each call carries exactly one packet.  Implementations may suspend on
/// link-level flow control; the send loop awaits them one at a time.
#[async_trait]
pub trait PacketTransport: Send + Sync {
    async fn send(&self, bytes: &[u8]) -> Result<(), TransportError>;
}
