//! # edgebridge-core
//!
//! Shared library for EdgeBridge containing the wire packet codec, the
//! motion coalescer, and the key usage translation tables.
//!
//! This crate is used by both the source and target applications.
//! It has no dependencies on OS input APIs, async runtimes, or radio stacks.
//!
//! # Architecture overview
//!
//! EdgeBridge lets the keyboard and mouse of one machine (the *source*) drive
//! a second machine (the *target*) over a short-range wireless link.  Pushing
//! the cursor against the configured screen edge switches the source into
//! *Remote* mode; from then on local input is swallowed and forwarded until
//! the exit key is pressed or the receiver goes away.
//!
//! - **`protocol`** – The four packet kinds and their fixed little-endian
//!   byte layout (one type byte followed by at most four payload bytes).
//!
//! - **`domain`** – Pure logic with no OS dependencies: the
//!   [`DeltaCoalescer`] that batches relative motion and the [`Tuning`]
//!   constants that bound it.
//!
//! - **`keymap`** – Data-driven tables that convert platform key codes
//!   (macOS `CGKeyCode`, Windows virtual keys, Linux evdev codes) to and from
//!   the USB HID usage IDs carried on the wire.
//!
//! - **`paths`** – Where both applications look for their TOML configuration.

pub mod domain;
pub mod keymap;
pub mod paths;
pub mod protocol;

pub use domain::coalescer::{clamp_i16, DeltaCoalescer};
pub use domain::tuning::Tuning;
pub use keymap::hid::HidKeyCode;
pub use keymap::KeyTable;
pub use protocol::codec::{decode_packet, encode_packet, ProtocolError};
pub use protocol::packet::{MouseButtonId, Packet, PacketKind};
