//! InboundDispatcher: turns received packets into injected input.
//!
//! This use case sits at the application layer and delegates the actual
//! event synthesis to an [`InputInjector`] trait object.  The platform
//! implementations live in the infrastructure layer.
//!
//! Each notification from the link carries exactly one packet.  The
//! dispatcher decodes it, translates key usages to native codes through the
//! configured [`KeyTable`], and calls the injector.  Nothing here is fatal:
//! a malformed packet or an unmapped key is logged, counted, and skipped.

use std::sync::Arc;

use edgebridge_core::{decode_packet, HidKeyCode, KeyTable, MouseButtonId, Packet, ProtocolError};
use tracing::{debug, trace};

/// Synthesises local input on the target machine.
///
/// Calls are fire-and-forget: an injection the OS rejects is the backend's
/// concern to log, and the dispatcher carries on with the next packet.
#[cfg_attr(test, mockall::automock)]
pub trait InputInjector: Send + Sync {
    /// Moves the cursor by a relative offset.
    fn move_cursor_by(&self, dx: i32, dy: i32);

    /// Presses or releases a mouse button.
    fn set_button(&self, id: MouseButtonId, down: bool);

    /// Presses or releases a key identified by its native key code.
    fn set_key(&self, native: u16, down: bool);

    /// Scrolls the vertical wheel by `lines` notches.
    fn scroll(&self, lines: i32);
}

/// What became of one received notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The packet was decoded and handed to the injector.
    Injected(Packet),
    /// A Key packet whose usage has no native key on this platform.
    SkippedUnmappedKey(u16),
    /// The bytes did not decode to a packet.
    Dropped(ProtocolError),
}

/// Running counters kept by the dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub injected: u64,
    pub skipped_keys: u64,
    pub dropped: u64,
}

/// The Inbound Dispatch use case.
pub struct InboundDispatcher {
    injector: Arc<dyn InputInjector>,
    keys: &'static KeyTable,
    stats: DispatchStats,
}

impl InboundDispatcher {
    /// Creates a dispatcher that translates keys with `keys`.
    pub fn new(injector: Arc<dyn InputInjector>, keys: &'static KeyTable) -> Self {
        Self {
            injector,
            keys,
            stats: DispatchStats::default(),
        }
    }

    pub fn key_table(&self) -> &'static KeyTable {
        self.keys
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Decodes one notification payload and injects it.
    pub fn dispatch(&mut self, bytes: &[u8]) -> DispatchOutcome {
        let packet = match decode_packet(bytes) {
            Ok(packet) => packet,
            Err(e) => {
                self.stats.dropped += 1;
                debug!(error = %e, len = bytes.len(), "malformed packet dropped");
                return DispatchOutcome::Dropped(e);
            }
        };

        match packet {
            Packet::MouseMove { dx, dy } => {
                self.injector.move_cursor_by(i32::from(dx), i32::from(dy));
            }
            Packet::MouseButton { id, down } => self.injector.set_button(id, down),
            Packet::Wheel { delta } => self.injector.scroll(i32::from(delta)),
            Packet::Key { usage, down } => {
                let Some(native) = self.keys.to_native(HidKeyCode::from_u16(usage)) else {
                    self.stats.skipped_keys += 1;
                    trace!(usage, table = self.keys.name(), "unmapped key usage skipped");
                    return DispatchOutcome::SkippedUnmappedKey(usage);
                };
                self.injector.set_key(native, down);
            }
        }

        self.stats.injected += 1;
        DispatchOutcome::Injected(packet)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use edgebridge_core::encode_packet;
    use edgebridge_core::keymap::linux_evdev::LINUX_EVDEV;
    use edgebridge_core::keymap::windows_vk::WINDOWS_VK;
    use mockall::predicate::eq;

    fn dispatcher(injector: MockInputInjector) -> InboundDispatcher {
        InboundDispatcher::new(Arc::new(injector), &WINDOWS_VK)
    }

    // ── Motion, buttons, wheel ────────────────────────────────────────────────

    #[test]
    fn test_mouse_move_is_injected_as_relative_motion() {
        // Arrange
        let mut injector = MockInputInjector::new();
        injector
            .expect_move_cursor_by()
            .with(eq(-20), eq(7))
            .times(1)
            .return_const(());
        let mut d = dispatcher(injector);
        let packet = Packet::MouseMove { dx: -20, dy: 7 };

        // Act
        let outcome = d.dispatch(&encode_packet(&packet));

        // Assert
        assert_eq!(outcome, DispatchOutcome::Injected(packet));
        assert_eq!(d.stats().injected, 1);
    }

    #[test]
    fn test_mouse_button_is_injected() {
        let mut injector = MockInputInjector::new();
        injector
            .expect_set_button()
            .with(eq(MouseButtonId::Middle), eq(false))
            .times(1)
            .return_const(());
        let mut d = dispatcher(injector);

        d.dispatch(&[0x02, 0x03, 0x00]);
    }

    #[test]
    fn test_wheel_delta_becomes_scroll_lines() {
        let mut injector = MockInputInjector::new();
        injector
            .expect_scroll()
            .with(eq(-3))
            .times(1)
            .return_const(());
        let mut d = dispatcher(injector);

        d.dispatch(&encode_packet(&Packet::Wheel { delta: -3 }));
    }

    // ── Keys ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_key_usage_is_translated_with_the_configured_table() {
        // Arrange: HID 0x04 is 'A'; VK_A is 0x41.
        let mut injector = MockInputInjector::new();
        injector
            .expect_set_key()
            .with(eq(0x41), eq(true))
            .times(1)
            .return_const(());
        let mut d = dispatcher(injector);

        // Act
        let outcome = d.dispatch(&encode_packet(&Packet::Key { usage: 0x04, down: true }));

        // Assert
        assert!(matches!(outcome, DispatchOutcome::Injected(Packet::Key { .. })));
    }

    #[test]
    fn test_same_usage_maps_to_a_different_native_code_on_linux() {
        let mut injector = MockInputInjector::new();
        // KEY_A is evdev code 30.
        injector
            .expect_set_key()
            .with(eq(30), eq(false))
            .times(1)
            .return_const(());
        let mut d = InboundDispatcher::new(Arc::new(injector), &LINUX_EVDEV);

        d.dispatch(&encode_packet(&Packet::Key { usage: 0x04, down: false }));
    }

    #[test]
    fn test_unassigned_usage_is_skipped() {
        // Arrange
        let mut injector = MockInputInjector::new();
        injector.expect_set_key().never();
        let mut d = dispatcher(injector);

        // Act
        let outcome = d.dispatch(&encode_packet(&Packet::Key { usage: 0x0FFF, down: true }));

        // Assert
        assert_eq!(outcome, DispatchOutcome::SkippedUnmappedKey(0x0FFF));
        assert_eq!(d.stats().skipped_keys, 1);
        assert_eq!(d.stats().injected, 0);
    }

    #[test]
    fn test_usage_without_a_native_key_is_skipped() {
        // Windows has no key for NumpadEnter in the shipped table.
        let mut injector = MockInputInjector::new();
        injector.expect_set_key().never();
        let mut d = dispatcher(injector);
        let usage = HidKeyCode::NumpadEnter.as_u16();

        let outcome = d.dispatch(&encode_packet(&Packet::Key { usage, down: true }));

        assert_eq!(outcome, DispatchOutcome::SkippedUnmappedKey(usage));
    }

    // ── Malformed input ───────────────────────────────────────────────────────

    #[test]
    fn test_malformed_packets_are_dropped_without_injection() {
        // Arrange: no expectations, so any injector call panics.
        let mut d = dispatcher(MockInputInjector::new());

        // Act
        let outcomes = [
            d.dispatch(&[]),
            d.dispatch(&[0x09, 0x00]),
            d.dispatch(&[0x01, 0x05]),
            d.dispatch(&[0x02, 0x00, 0x01]),
        ];

        // Assert
        assert_eq!(
            outcomes,
            [
                DispatchOutcome::Dropped(ProtocolError::TruncatedPacket { needed: 1, available: 0 }),
                DispatchOutcome::Dropped(ProtocolError::UnknownPacketType(0x09)),
                DispatchOutcome::Dropped(ProtocolError::TruncatedPacket { needed: 5, available: 2 }),
                DispatchOutcome::Dropped(ProtocolError::InvalidButton(0x00)),
            ]
        );
        assert_eq!(d.stats().dropped, 4);
    }

    #[test]
    fn test_dispatch_continues_after_a_dropped_packet() {
        let mut injector = MockInputInjector::new();
        injector.expect_scroll().times(1).return_const(());
        let mut d = dispatcher(injector);

        d.dispatch(&[0xFF]);
        let outcome = d.dispatch(&[0x04, 0x01, 0x00]);

        assert_eq!(outcome, DispatchOutcome::Injected(Packet::Wheel { delta: 1 }));
        assert_eq!(
            d.stats(),
            DispatchStats {
                injected: 1,
                skipped_keys: 0,
                dropped: 1
            }
        );
    }
}
