//! The Local/Remote mode state machine.
//!
//! [`ModeMachine`] is the single owner of all mutable bridging state: the
//! current [`Mode`], the [`CursorTracking`] used to turn absolute hook
//! coordinates into relative motion, and the [`DeltaCoalescer`] holding
//! motion that has not been sent yet.
//!
//! Every handler takes `now` explicitly and returns a [`Reaction`] describing
//! what the caller must do: whether to swallow the OS event, which packets to
//! enqueue, and whether to warp the local cursor.  The machine itself performs
//! no I/O, so the caller can release its lock before acting on the reaction.
//!
//! # State diagram
//!
//! ```text
//!            edge hit && subscribed && !synthetic
//!   ┌───────┐ ───────────────────────────────────▶ ┌────────┐
//!   │ Local │                                      │ Remote │
//!   └───────┘ ◀─────────────────────────────────── └────────┘
//!               exit key down | link lost | release
//! ```

use std::time::Instant;

use edgebridge_core::{clamp_i16, DeltaCoalescer, KeyTable, MouseButtonId, Packet, Tuning};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::application::recenter::RecenterPolicy;

// ── Mode ──────────────────────────────────────────────────────────────────────

/// Where local input currently goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Input stays on the source machine.
    #[default]
    Local,
    /// Input is swallowed locally and forwarded to the target.
    Remote,
}

// ── Cursor tracking ───────────────────────────────────────────────────────────

/// Absolute-to-relative motion bookkeeping.
///
/// Only meaningful in [`Mode::Remote`]; reset to the default on every return
/// to [`Mode::Local`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorTracking {
    pub last_x: i32,
    pub last_y: i32,
    pub has_last_point: bool,
    pub anchor_x: i32,
    pub anchor_y: i32,
    /// Set on entry so the first accepted sample warps the cursor to the anchor.
    pub needs_recenter: bool,
}

// ── Edge trigger ──────────────────────────────────────────────────────────────

/// Which side of the source screen leads to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenEdge {
    Left,
    Right,
}

/// The screen-edge gesture that switches to Remote mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeTrigger {
    pub edge: ScreenEdge,
    /// X coordinate at (or past) which the edge counts as hit.
    pub threshold: i32,
}

impl EdgeTrigger {
    /// Returns `true` if an x coordinate is at or past the edge.
    pub fn is_hit(&self, x: i32) -> bool {
        match self.edge {
            ScreenEdge::Left => x <= self.threshold,
            ScreenEdge::Right => x >= self.threshold,
        }
    }
}

impl Default for EdgeTrigger {
    fn default() -> Self {
        Self {
            edge: ScreenEdge::Left,
            threshold: 0,
        }
    }
}

// ── Settings ──────────────────────────────────────────────────────────────────

/// Fixed parameters of a [`ModeMachine`], built from the source configuration.
#[derive(Debug, Clone, Copy)]
pub struct BridgeSettings {
    pub screen_width: i32,
    pub screen_height: i32,
    pub trigger: EdgeTrigger,
    /// Native key code that returns control to the source.
    pub exit_key: u16,
    /// Translates native key codes captured on this machine.
    pub key_table: &'static KeyTable,
    pub tuning: Tuning,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            screen_width: 1920,
            screen_height: 1080,
            trigger: EdgeTrigger::default(),
            exit_key: edgebridge_core::keymap::macos_cg::KVK_F14,
            key_table: &edgebridge_core::keymap::macos_cg::MACOS_CG,
            tuning: Tuning::default(),
        }
    }
}

// ── Reaction ──────────────────────────────────────────────────────────────────

/// What the caller must do after a [`ModeMachine`] handler returns.
///
/// At most two packets result from one event: flushed motion followed by
/// the discrete packet that forced the flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reaction {
    /// Swallow the OS event so the local system never sees it.
    pub suppress: bool,
    packets: [Option<Packet>; 2],
    /// Warp the local cursor to this point, outside the lock.
    pub warp: Option<(i32, i32)>,
}

impl Reaction {
    fn pass_through() -> Self {
        Self::default()
    }

    fn suppressed() -> Self {
        Self {
            suppress: true,
            ..Self::default()
        }
    }

    fn push(&mut self, packet: Option<Packet>) {
        let Some(packet) = packet else { return };
        if let Some(slot) = self.packets.iter_mut().find(|slot| slot.is_none()) {
            *slot = Some(packet);
        }
    }

    /// The packets to enqueue, in order.
    pub fn packets(&self) -> impl Iterator<Item = Packet> + '_ {
        self.packets.iter().flatten().copied()
    }
}

// ── ModeMachine ───────────────────────────────────────────────────────────────

/// Decides the fate of every captured input event.
#[derive(Debug)]
pub struct ModeMachine {
    mode: Mode,
    tracking: CursorTracking,
    coalescer: DeltaCoalescer,
    recenter: RecenterPolicy,
    settings: BridgeSettings,
}

impl ModeMachine {
    /// Creates a machine in [`Mode::Local`].
    pub fn new(settings: BridgeSettings, now: Instant) -> Self {
        let tuning = settings.tuning;
        Self {
            mode: Mode::Local,
            tracking: CursorTracking::default(),
            coalescer: DeltaCoalescer::new(tuning.flush_interval, tuning.flush_magnitude, now),
            recenter: RecenterPolicy::new(tuning.recenter_radius),
            settings,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn tracking(&self) -> &CursorTracking {
        &self.tracking
    }

    /// Motion accumulated but not yet emitted.
    pub fn pending(&self) -> (i32, i32) {
        self.coalescer.pending()
    }

    /// When pending motion must go out if no further sample arrives.
    ///
    /// Always `None` in Local mode.
    pub fn flush_deadline(&self) -> Option<Instant> {
        match self.mode {
            Mode::Local => None,
            Mode::Remote => self.coalescer.deadline(),
        }
    }

    /// Handles an absolute cursor sample.
    ///
    /// `synthetic` marks samples generated by the system itself (including
    /// the echo of our own recenter warp).  `subscribed` is the current link
    /// state; Remote mode is never entered without a receiver.
    pub fn on_motion(
        &mut self,
        x: i32,
        y: i32,
        synthetic: bool,
        subscribed: bool,
        now: Instant,
    ) -> Reaction {
        match self.mode {
            Mode::Local => {
                if synthetic || !subscribed || !self.settings.trigger.is_hit(x) {
                    return Reaction::pass_through();
                }
                self.enter_remote(y, now);
                let mut reaction = Reaction::suppressed();
                reaction.warp = self.recenter.check(&mut self.tracking);
                reaction
            }
            Mode::Remote => {
                if synthetic {
                    return Reaction::suppressed();
                }
                self.track_motion(x, y, now)
            }
        }
    }

    /// Handles a mouse button transition.
    pub fn on_button(&mut self, id: MouseButtonId, down: bool, now: Instant) -> Reaction {
        self.discrete(Some(Packet::MouseButton { id, down }), now)
    }

    /// Handles a vertical wheel step.
    pub fn on_wheel(&mut self, delta: i16, now: Instant) -> Reaction {
        self.discrete(Some(Packet::Wheel { delta }), now)
    }

    /// Handles a key transition identified by its native key code.
    ///
    /// The exit key never reaches the target.  Its key-down in Remote mode
    /// returns control to the source; keys with no usage mapping are
    /// swallowed but not forwarded.
    pub fn on_key(&mut self, native: u16, down: bool, now: Instant) -> Reaction {
        if self.mode == Mode::Local {
            return Reaction::pass_through();
        }

        if native == self.settings.exit_key {
            let mut reaction = Reaction::suppressed();
            if down {
                info!("exit key pressed; returning to local mode");
                reaction.push(self.exit_remote(now));
            }
            return reaction;
        }

        let packet = match self.settings.key_table.to_usage(native) {
            Some(usage) => Some(Packet::Key {
                usage: usage.as_u16(),
                down,
            }),
            None => {
                trace!(native, table = self.settings.key_table.name(), "unmapped key dropped");
                None
            }
        };
        self.discrete(packet, now)
    }

    /// Forces Local mode because the receiver went away.
    ///
    /// Pending motion is discarded: there is nobody left to deliver it to.
    /// Returns `true` if the mode changed.
    pub fn on_link_lost(&mut self, now: Instant) -> bool {
        if self.mode == Mode::Local {
            return false;
        }
        info!("receiver unsubscribed; returning to local mode");
        self.coalescer.reset(now);
        self.clear_tracking();
        true
    }

    /// Emits pending motion whose flush interval has run out with no
    /// further samples to carry it.
    pub fn on_flush_timer(&mut self, now: Instant) -> Reaction {
        let mut reaction = Reaction::pass_through();
        if self.mode == Mode::Remote {
            reaction.push(self.coalescer.flush(false, now));
        }
        reaction
    }

    /// Returns control to the source ahead of shutdown.
    ///
    /// Unlike [`on_link_lost`](Self::on_link_lost), pending motion is flushed
    /// because the link may still be up.
    pub fn release(&mut self, now: Instant) -> Reaction {
        if self.mode == Mode::Local {
            return Reaction::pass_through();
        }
        info!("releasing remote mode");
        let mut reaction = Reaction::pass_through();
        reaction.push(self.exit_remote(now));
        reaction
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn enter_remote(&mut self, y: i32, now: Instant) {
        let (anchor_x, anchor_y) = self.anchor_for(y);
        self.tracking = CursorTracking {
            last_x: anchor_x,
            last_y: anchor_y,
            has_last_point: true,
            anchor_x,
            anchor_y,
            needs_recenter: true,
        };
        self.coalescer.reset(now);
        self.mode = Mode::Remote;
        info!(anchor_x, anchor_y, "edge reached; entering remote mode");
    }

    /// Mid-screen horizontally, at `y` pulled into a band that keeps the
    /// recenter circle on screen.
    fn anchor_for(&self, y: i32) -> (i32, i32) {
        let height = self.settings.screen_height.max(1);
        let band = self.settings.tuning.recenter_radius.min(height / 2).max(0);
        (self.settings.screen_width / 2, y.clamp(band, height - band))
    }

    fn track_motion(&mut self, x: i32, y: i32, now: Instant) -> Reaction {
        let mut reaction = Reaction::suppressed();

        if !self.tracking.has_last_point {
            self.tracking.last_x = x;
            self.tracking.last_y = y;
            self.tracking.has_last_point = true;
            return reaction;
        }

        let raw_dx = x.saturating_sub(self.tracking.last_x);
        let raw_dy = y.saturating_sub(self.tracking.last_y);
        self.tracking.last_x = x;
        self.tracking.last_y = y;

        let limit = self.settings.tuning.spike_limit.unsigned_abs();
        if raw_dx.unsigned_abs() > limit || raw_dy.unsigned_abs() > limit {
            debug!(raw_dx, raw_dy, "motion spike discarded");
            return reaction;
        }

        let dx = i32::from(clamp_i16(raw_dx));
        let dy = i32::from(clamp_i16(raw_dy));
        reaction.push(self.coalescer.accumulate(dx, dy, now));
        reaction.warp = self.recenter.check(&mut self.tracking);
        reaction
    }

    /// Flushes pending motion ahead of `packet` so the target replays them
    /// in the order the user produced them.
    fn discrete(&mut self, packet: Option<Packet>, now: Instant) -> Reaction {
        if self.mode == Mode::Local {
            return Reaction::pass_through();
        }
        let mut reaction = Reaction::suppressed();
        reaction.push(self.coalescer.flush(true, now));
        reaction.push(packet);
        reaction
    }

    fn exit_remote(&mut self, now: Instant) -> Option<Packet> {
        let flushed = self.coalescer.flush(true, now);
        self.coalescer.reset(now);
        self.clear_tracking();
        flushed
    }

    fn clear_tracking(&mut self) {
        self.tracking = CursorTracking::default();
        self.mode = Mode::Local;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
