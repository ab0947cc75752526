//! edgebridge-target library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the target do? (for beginners)
//!
//! The *target* is the machine being driven.  It never sees the source's
//! keyboard or mouse directly; it only receives small packets over the
//! wireless link while the source is in Remote mode.
//!
//! The target application:
//!
//! 1. Receives one notification per packet from the link.
//! 2. Decodes it with the shared codec in `edgebridge-core`.  Malformed
//!    packets are dropped and logged, never fatal.
//! 3. Translates HID key usages to this platform's native key codes.
//! 4. Hands the result to an [`InputInjector`](application::dispatch_inbound::InputInjector),
//!    which synthesises the event as if a local device had produced it.

/// Application layer: the inbound dispatcher.
pub mod application;

/// Infrastructure layer: injection backends, the inbound link loop, config.
pub mod infrastructure;
