//! Protocol module containing the packet types and the binary codec.

pub mod codec;
pub mod packet;

pub use codec::{decode_packet, encode_packet, encode_packet_into, ProtocolError};
pub use packet::*;
