//! All EdgeBridge packet types.
//!
//! Every packet travels as a single transport notification: one leading type
//! byte followed by a fixed-size little-endian payload.  The key usage carried
//! in [`Packet::Key`] is a USB HID usage ID (page 0x07).

// ── Packet type codes ─────────────────────────────────────────────────────────

/// Leading type byte of every packet on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketKind {
    MouseMove = 0x01,
    MouseButton = 0x02,
    Key = 0x03,
    Wheel = 0x04,
}

impl PacketKind {
    /// Total encoded length of a packet of this kind, type byte included.
    pub const fn wire_len(self) -> usize {
        match self {
            PacketKind::MouseMove => 5,
            PacketKind::MouseButton => 3,
            PacketKind::Key => 4,
            PacketKind::Wheel => 3,
        }
    }
}

impl TryFrom<u8> for PacketKind {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0x01 => Ok(PacketKind::MouseMove),
            0x02 => Ok(PacketKind::MouseButton),
            0x03 => Ok(PacketKind::Key),
            0x04 => Ok(PacketKind::Wheel),
            _ => Err(()),
        }
    }
}

/// Longest encoded packet in bytes (MouseMove).
pub const MAX_PACKET_LEN: usize = PacketKind::MouseMove.wire_len();

// ── Mouse buttons ─────────────────────────────────────────────────────────────

/// Mouse button identifier as carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButtonId {
    Left = 1,
    Right = 2,
    Middle = 3,
}

impl TryFrom<u8> for MouseButtonId {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MouseButtonId::Left),
            2 => Ok(MouseButtonId::Right),
            3 => Ok(MouseButtonId::Middle),
            _ => Err(()),
        }
    }
}

// ── Packet ────────────────────────────────────────────────────────────────────

/// One unit of forwarded input.
///
/// Packets are plain `Copy` values: once built they are never mutated, and
/// handing one to the outbound queue moves it there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Packet {
    /// Relative cursor motion since the previous MouseMove.
    MouseMove { dx: i16, dy: i16 },
    /// A mouse button changed state.
    MouseButton { id: MouseButtonId, down: bool },
    /// A key changed state.  `usage` is the raw HID usage ID.
    Key { usage: u16, down: bool },
    /// Vertical wheel movement; positive scrolls away from the user.
    Wheel { delta: i16 },
}

impl Packet {
    /// Returns the wire type of this packet.
    pub fn kind(&self) -> PacketKind {
        match self {
            Packet::MouseMove { .. } => PacketKind::MouseMove,
            Packet::MouseButton { .. } => PacketKind::MouseButton,
            Packet::Key { .. } => PacketKind::Key,
            Packet::Wheel { .. } => PacketKind::Wheel,
        }
    }
}
