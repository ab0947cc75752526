//! Binary codec for encoding and decoding EdgeBridge packets.
//!
//! Wire format:
//! ```text
//! MouseMove    [0x01][dx:i16][dy:i16]        5 bytes
//! MouseButton  [0x02][button:u8][down:u8]    3 bytes
//! Key          [0x03][usage:u16][down:u8]    4 bytes
//! Wheel        [0x04][delta:i16]             3 bytes
//! ```
//! All multi-byte integers are little-endian.  Bytes past a packet's fixed
//! length are ignored on decode.

use thiserror::Error;

use crate::protocol::packet::{MouseButtonId, Packet, PacketKind, MAX_PACKET_LEN};

/// Errors that can occur while decoding a packet.
///
/// Encoding is total and never fails.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// The leading type byte is not a recognized packet kind.
    #[error("unknown packet type: 0x{0:02X}")]
    UnknownPacketType(u8),

    /// The byte slice is shorter than the packet kind requires.
    #[error("truncated packet: need {needed} bytes, got {available}")]
    TruncatedPacket { needed: usize, available: usize },

    /// The MouseButton payload names a button outside 1..=3.
    #[error("invalid mouse button: {0}")]
    InvalidButton(u8),
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes a [`Packet`] into a freshly allocated byte vector.
///
/// # Examples
///
/// ```rust
/// use edgebridge_core::protocol::{decode_packet, encode_packet, Packet};
///
/// let packet = Packet::MouseMove { dx: -3, dy: 7 };
/// let bytes = encode_packet(&packet);
/// assert_eq!(bytes, [0x01, 0xFD, 0xFF, 0x07, 0x00]);
/// assert_eq!(decode_packet(&bytes).unwrap(), packet);
/// ```
pub fn encode_packet(packet: &Packet) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MAX_PACKET_LEN);
    encode_packet_into(packet, &mut buf);
    buf
}

/// Appends the encoding of `packet` to `buf`.
///
/// Lets the send loop reuse one buffer for every notification.
pub fn encode_packet_into(packet: &Packet, buf: &mut Vec<u8>) {
    buf.push(packet.kind() as u8);
    match *packet {
        Packet::MouseMove { dx, dy } => {
            buf.extend_from_slice(&dx.to_le_bytes());
            buf.extend_from_slice(&dy.to_le_bytes());
        }
        Packet::MouseButton { id, down } => {
            buf.push(id as u8);
            buf.push(flag(down));
        }
        Packet::Key { usage, down } => {
            buf.extend_from_slice(&usage.to_le_bytes());
            buf.push(flag(down));
        }
        Packet::Wheel { delta } => {
            buf.extend_from_slice(&delta.to_le_bytes());
        }
    }
}

/// Decodes one [`Packet`] from the beginning of `bytes`.
///
/// # Errors
///
/// - [`ProtocolError::TruncatedPacket`] if `bytes` is empty or shorter than
///   the packet kind's fixed length.
/// - [`ProtocolError::UnknownPacketType`] for an unrecognized type byte.
/// - [`ProtocolError::InvalidButton`] for a MouseButton outside 1..=3.
pub fn decode_packet(bytes: &[u8]) -> Result<Packet, ProtocolError> {
    let Some(&type_byte) = bytes.first() else {
        return Err(ProtocolError::TruncatedPacket {
            needed: 1,
            available: 0,
        });
    };
    let kind =
        PacketKind::try_from(type_byte).map_err(|_| ProtocolError::UnknownPacketType(type_byte))?;

    let needed = kind.wire_len();
    if bytes.len() < needed {
        return Err(ProtocolError::TruncatedPacket {
            needed,
            available: bytes.len(),
        });
    }

    let p = &bytes[1..needed];
    let packet = match kind {
        PacketKind::MouseMove => Packet::MouseMove {
            dx: i16::from_le_bytes([p[0], p[1]]),
            dy: i16::from_le_bytes([p[2], p[3]]),
        },
        PacketKind::MouseButton => Packet::MouseButton {
            id: MouseButtonId::try_from(p[0]).map_err(|_| ProtocolError::InvalidButton(p[0]))?,
            down: p[1] != 0,
        },
        PacketKind::Key => Packet::Key {
            usage: u16::from_le_bytes([p[0], p[1]]),
            down: p[2] != 0,
        },
        PacketKind::Wheel => Packet::Wheel {
            delta: i16::from_le_bytes([p[0], p[1]]),
        },
    };
    Ok(packet)
}

fn flag(value: bool) -> u8 {
    if value {
        0x01
    } else {
        0x00
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
