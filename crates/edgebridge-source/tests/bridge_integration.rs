//! End-to-end tests of the source pipeline.
//!
//! Events enter through [`MockInputHook`] exactly as a platform hook would
//! deliver them, pass through the [`InputBridge`] and the outbound queue, and
//! leave through a [`RecordingTransport`].  The send loop is started only
//! after the events are queued, so the bytes it emits do not depend on
//! scheduling.

use std::sync::Arc;
use std::time::{Duration, Instant};

use edgebridge_core::keymap::macos_cg::KVK_F14;
use edgebridge_core::{MouseButtonId, Packet};
use edgebridge_source::application::bridge_input::{InputBridge, InputHandler};
use edgebridge_source::application::mode::{BridgeSettings, Mode, ModeMachine, ScreenEdge};
use edgebridge_source::application::recenter::CursorWarper;
use edgebridge_source::infrastructure::input_capture::mock::{MockInputHook, RecordingWarper};
use edgebridge_source::infrastructure::input_capture::InputHook;
use edgebridge_source::infrastructure::outbound::{
    outbound_channel, run_flush_timer, OutboundQueue, SendLoop, SendStats,
};
use edgebridge_source::infrastructure::transport::mock::RecordingTransport;
use edgebridge_source::infrastructure::transport::{watch_link, LinkState, PacketTransport};
use tokio::sync::watch;

// ── Harness ───────────────────────────────────────────────────────────────────

struct Harness {
    hook: MockInputHook,
    bridge: Arc<InputBridge>,
    link: Arc<LinkState>,
    warper: Arc<RecordingWarper>,
    transport: Arc<RecordingTransport>,
    queue: Option<OutboundQueue>,
}

impl Harness {
    fn new() -> Self {
        Self::with_settings(BridgeSettings::default())
    }

    fn with_settings(settings: BridgeSettings) -> Self {
        let link = Arc::new(LinkState::new());
        link.set_subscribed(true);
        let warper = Arc::new(RecordingWarper::new());
        let (outbound, queue) = outbound_channel();
        let bridge = Arc::new(InputBridge::new(
            ModeMachine::new(settings, Instant::now()),
            Arc::clone(&link),
            outbound,
            Arc::clone(&warper) as Arc<dyn CursorWarper>,
        ));
        let hook = MockInputHook::new();
        let handler = Arc::clone(&bridge) as Arc<dyn InputHandler>;
        hook.install(handler).expect("mock hook installs");
        Self {
            hook,
            bridge,
            link,
            warper,
            transport: Arc::new(RecordingTransport::new()),
            queue: Some(queue),
        }
    }

    /// Runs the send loop over everything queued so far and returns what
    /// reached the transport.
    async fn flush_to_transport(&mut self) -> (Vec<Packet>, SendStats) {
        let queue = self.queue.take().expect("send loop runs once per test");
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let transport = Arc::clone(&self.transport) as Arc<dyn PacketTransport>;
        shutdown_tx.send(true).expect("loop holds a receiver");
        let stats = SendLoop::new(queue, transport, shutdown_rx).run().await;
        (self.transport.sent_packets(), stats)
    }
}

// ── Edge entry and motion ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_edge_entry_then_four_samples_send_one_move() {
    // Arrange
    let mut h = Harness::new();

    // Act
    assert!(h.hook.inject_motion(0, 300, false), "edge hit is suppressed");
    for x in [965, 970, 975, 980] {
        assert!(h.hook.inject_motion(x, 300, false));
    }
    let (sent, _) = h.flush_to_transport().await;

    // Assert
    assert_eq!(h.bridge.mode(), Mode::Remote);
    assert_eq!(h.warper.warps(), vec![(960, 300)]);
    assert_eq!(sent, vec![Packet::MouseMove { dx: 20, dy: 0 }]);
}

#[tokio::test]
async fn test_warp_echo_is_not_forwarded() {
    let mut h = Harness::new();
    h.hook.inject_motion(0, 300, false);

    // The warp to the anchor comes back as a synthetic sample.
    assert!(h.hook.inject_motion(960, 300, true));
    h.bridge.release();
    let (sent, _) = h.flush_to_transport().await;

    assert!(sent.is_empty(), "synthetic motion must not be sent: {sent:?}");
}

#[tokio::test]
async fn test_local_mode_passes_everything_through() {
    let mut h = Harness::new();

    assert!(!h.hook.inject_motion(500, 500, false));
    assert!(!h.hook.inject_button(MouseButtonId::Left, true));
    assert!(!h.hook.inject_key(0x00, true));
    assert!(!h.hook.inject_wheel(-1));
    let (sent, stats) = h.flush_to_transport().await;

    assert!(sent.is_empty());
    assert_eq!(stats, SendStats::default());
}

#[tokio::test]
async fn test_straying_cursor_is_warped_back_to_anchor() {
    let h = Harness::new();
    h.hook.inject_motion(0, 540, false);

    // 250 px right of the anchor, past the 200 px radius.
    h.hook.inject_motion(960 + 250, 540, false);

    assert_eq!(h.warper.warps(), vec![(960, 540), (960, 540)]);
}

// ── Ordering ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_pending_motion_is_sent_before_a_click() {
    // Arrange
    let mut h = Harness::new();
    h.hook.inject_motion(0, 300, false);
    h.hook.inject_motion(963, 301, false);

    // Act
    assert!(h.hook.inject_button(MouseButtonId::Left, true));
    assert!(h.hook.inject_button(MouseButtonId::Left, false));
    let (sent, _) = h.flush_to_transport().await;

    // Assert
    assert_eq!(
        sent,
        vec![
            Packet::MouseMove { dx: 3, dy: 1 },
            Packet::MouseButton { id: MouseButtonId::Left, down: true },
            Packet::MouseButton { id: MouseButtonId::Left, down: false },
        ]
    );
}

#[tokio::test]
async fn test_keys_are_sent_as_hid_usages() {
    let mut h = Harness::new();
    h.hook.inject_motion(0, 300, false);

    // kVK_ANSI_A (0x00) is HID usage 0x04.
    assert!(h.hook.inject_key(0x00, true));
    assert!(h.hook.inject_key(0x00, false));
    let (sent, _) = h.flush_to_transport().await;

    assert_eq!(
        sent,
        vec![
            Packet::Key { usage: 0x04, down: true },
            Packet::Key { usage: 0x04, down: false },
        ]
    );
}

#[tokio::test]
async fn test_wheel_is_forwarded_in_remote_mode() {
    let mut h = Harness::new();
    h.hook.inject_motion(0, 300, false);

    assert!(h.hook.inject_wheel(-2));
    let (sent, _) = h.flush_to_transport().await;

    assert_eq!(sent, vec![Packet::Wheel { delta: -2 }]);
}

// ── Leaving Remote mode ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_exit_key_returns_to_local_and_is_idempotent() {
    // Arrange
    let mut h = Harness::new();
    h.hook.inject_motion(0, 300, false);

    // Act
    assert!(h.hook.inject_key(KVK_F14, true), "exit key is swallowed");
    assert!(!h.hook.inject_key(KVK_F14, false), "release arrives in Local");
    assert!(!h.hook.inject_key(KVK_F14, true), "pressing again in Local does nothing");
    let (sent, _) = h.flush_to_transport().await;

    // Assert
    assert_eq!(h.bridge.mode(), Mode::Local);
    assert!(sent.is_empty(), "exit key is never forwarded: {sent:?}");
}

#[tokio::test]
async fn test_losing_the_receiver_forces_local_without_retrigger() {
    // Arrange
    let h = Harness::new();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let watcher = tokio::spawn(watch_link(&h.link, Arc::clone(&h.bridge), shutdown_rx));
    h.hook.inject_motion(0, 300, false);
    assert_eq!(h.bridge.mode(), Mode::Remote);

    // Act
    h.link.set_subscribed(false);
    let deadline = Instant::now() + Duration::from_secs(2);
    while h.bridge.mode() == Mode::Remote && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    // Assert
    assert_eq!(h.bridge.mode(), Mode::Local);
    assert!(!h.hook.inject_motion(0, 300, false), "no receiver, no Remote mode");
    assert_eq!(h.bridge.mode(), Mode::Local);

    shutdown_tx.send(true).unwrap();
    watcher.await.unwrap();
}

#[tokio::test]
async fn test_loss_between_spawning_the_watcher_and_its_first_run_is_seen() {
    // Arrange
    let h = Harness::new();
    h.hook.inject_motion(0, 300, false);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Act: the watcher task has not been polled when the receiver leaves.
    let watcher = tokio::spawn(watch_link(&h.link, Arc::clone(&h.bridge), shutdown_rx));
    h.link.set_subscribed(false);
    let deadline = Instant::now() + Duration::from_secs(2);
    while h.bridge.mode() == Mode::Remote && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    // Assert
    assert_eq!(h.bridge.mode(), Mode::Local);

    shutdown_tx.send(true).unwrap();
    watcher.await.unwrap();
}

// ── Deadline flush ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_small_trailing_move_reaches_the_transport() {
    // Arrange
    let mut h = Harness::new();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let timer = tokio::spawn(run_flush_timer(Arc::clone(&h.bridge), shutdown_rx));
    h.hook.inject_motion(0, 300, false);

    // Act: a single 4 px move, then nothing.
    assert!(h.hook.inject_motion(964, 300, false));
    let deadline = Instant::now() + Duration::from_secs(2);
    while h.bridge.flush_deadline().is_some() && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    shutdown_tx.send(true).unwrap();
    timer.await.unwrap();
    let (sent, _) = h.flush_to_transport().await;

    // Assert
    assert_eq!(h.bridge.mode(), Mode::Remote);
    assert_eq!(sent, vec![Packet::MouseMove { dx: 4, dy: 0 }]);
}

#[tokio::test]
async fn test_release_on_shutdown_flushes_pending_motion() {
    let mut h = Harness::new();
    h.hook.inject_motion(0, 300, false);
    h.hook.inject_motion(962, 299, false);

    h.hook.uninstall();
    h.bridge.release();
    let (sent, stats) = h.flush_to_transport().await;

    assert_eq!(h.bridge.mode(), Mode::Local);
    assert_eq!(sent, vec![Packet::MouseMove { dx: 2, dy: -1 }]);
    assert_eq!(stats.sent, 1);
    assert!(!h.hook.inject_motion(0, 300, false), "uninstalled hook delivers nothing");
}

#[tokio::test]
async fn test_failed_hook_install_leaves_nothing_installed() {
    let hook = MockInputHook::failing();
    let bridge = Harness::new().bridge;

    let result = hook.install(bridge as Arc<dyn InputHandler>);
    hook.uninstall();

    assert!(result.is_err());
    assert!(!hook.is_installed());
    assert_eq!(hook.uninstall_count(), 1);
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_right_edge_configuration_triggers_on_the_right() {
    let mut settings = BridgeSettings::default();
    settings.trigger.edge = ScreenEdge::Right;
    settings.trigger.threshold = 1919;
    let h = Harness::with_settings(settings);

    assert!(!h.hook.inject_motion(0, 300, false));
    assert_eq!(h.bridge.mode(), Mode::Local);
    assert!(h.hook.inject_motion(1919, 300, false));
    assert_eq!(h.bridge.mode(), Mode::Remote);
}
