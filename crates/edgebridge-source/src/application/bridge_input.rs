//! The hook-facing facade of the source application.
//!
//! [`InputBridge`] implements [`InputHandler`], the callback interface every
//! platform hook drives.  For each event it:
//!
//! 1. locks the [`ModeMachine`] and lets it decide,
//! 2. releases the lock,
//! 3. enqueues the resulting packets and performs any cursor warp,
//! 4. returns the suppress decision to the hook.
//!
//! Neither the enqueue nor the warp happens with the lock held, so a warp
//! whose echo re-enters the hook synchronously cannot deadlock.
//!
//! Motion held back by the coalescer is released by a timer task: the bridge
//! signals [`InputBridge::motion_pending`] whenever a step leaves a flush
//! deadline armed, and the task calls [`InputBridge::flush_due`] once it
//! passes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use edgebridge_core::MouseButtonId;
use tokio::sync::Notify;

use crate::application::mode::{Mode, ModeMachine, Reaction};
use crate::application::recenter::CursorWarper;
use crate::infrastructure::outbound::OutboundSender;
use crate::infrastructure::transport::LinkState;

/// Callback interface implemented by whatever consumes hook events.
///
/// Every method returns `true` to swallow the event (the local system never
/// sees it) or `false` to let it through.  Implementations must return
/// promptly: they run on the system's input delivery thread.
pub trait InputHandler: Send + Sync {
    /// An absolute cursor sample.  `synthetic` is set for events the system
    /// generated itself, such as the echo of a cursor warp.
    fn on_motion(&self, x: i32, y: i32, synthetic: bool) -> bool;
    fn on_button(&self, id: MouseButtonId, down: bool) -> bool;
    /// A key transition identified by its native key code.
    fn on_key(&self, native: u16, down: bool) -> bool;
    fn on_wheel(&self, delta: i16) -> bool;
}

/// Connects the mode machine to the outbound queue and the cursor.
pub struct InputBridge {
    state: Mutex<ModeMachine>,
    /// Mirror of `state.mode() == Remote` for lock-free reads.
    remote: AtomicBool,
    link: Arc<LinkState>,
    outbound: OutboundSender,
    warper: Arc<dyn CursorWarper>,
    motion_pending: Notify,
}

impl InputBridge {
    pub fn new(
        machine: ModeMachine,
        link: Arc<LinkState>,
        outbound: OutboundSender,
        warper: Arc<dyn CursorWarper>,
    ) -> Self {
        let remote = machine.mode() == Mode::Remote;
        Self {
            state: Mutex::new(machine),
            remote: AtomicBool::new(remote),
            link,
            outbound,
            warper,
            motion_pending: Notify::new(),
        }
    }

    /// Approximate current mode, read without taking the lock.
    pub fn mode(&self) -> Mode {
        if self.remote.load(Ordering::Acquire) {
            Mode::Remote
        } else {
            Mode::Local
        }
    }

    /// Reacts to a receiver subscription change.
    ///
    /// Losing the receiver while in Remote returns to Local and discards
    /// pending motion.  Gaining one changes nothing until the next edge hit.
    ///
    /// A loss always takes the lock, which orders it against a concurrent
    /// edge hit.
    pub fn on_link_changed(&self, subscribed: bool) {
        if subscribed {
            return;
        }
        let mut machine = self.lock();
        machine.on_link_lost(Instant::now());
        self.remote
            .store(machine.mode() == Mode::Remote, Ordering::Release);
    }

    /// When held-back motion must be sent if no further sample arrives.
    pub fn flush_deadline(&self) -> Option<Instant> {
        self.lock().flush_deadline()
    }

    /// Sends held-back motion whose deadline has passed.
    pub fn flush_due(&self) {
        let reaction = self.react(|machine, now| machine.on_flush_timer(now));
        self.apply(reaction);
    }

    /// Completes once a step has left a flush deadline armed.
    ///
    /// A signal raised while nobody waits is kept for the next call.
    pub async fn motion_pending(&self) {
        self.motion_pending.notified().await;
    }

    /// Returns to Local mode ahead of shutdown, flushing pending motion.
    pub fn release(&self) {
        let reaction = self.react(|machine, now| machine.release(now));
        self.apply(reaction);
    }

    /// Runs one state-machine step under the lock and refreshes the mirror.
    fn react(&self, step: impl FnOnce(&mut ModeMachine, Instant) -> Reaction) -> Reaction {
        let (reaction, armed) = {
            let mut machine = self.lock();
            let reaction = step(&mut machine, Instant::now());
            self.remote
                .store(machine.mode() == Mode::Remote, Ordering::Release);
            (reaction, machine.flush_deadline().is_some())
        };
        if armed {
            self.motion_pending.notify_one();
        }
        reaction
    }

    /// Performs a reaction's side effects.  Must be called without the lock.
    fn apply(&self, reaction: Reaction) -> bool {
        for packet in reaction.packets() {
            self.outbound.enqueue(packet);
        }
        if let Some((x, y)) = reaction.warp {
            self.warper.warp_to(x, y);
        }
        reaction.suppress
    }

    /// A panic while holding the lock must not take the input hook down
    /// with it, so a poisoned lock is reclaimed.
    fn lock(&self) -> std::sync::MutexGuard<'_, ModeMachine> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl InputHandler for InputBridge {
    fn on_motion(&self, x: i32, y: i32, synthetic: bool) -> bool {
        // The link is read under the lock so a concurrent loss is ordered
        // against the edge decision.
        let reaction = self.react(|machine, now| {
            let subscribed = self.link.is_subscribed();
            machine.on_motion(x, y, synthetic, subscribed, now)
        });
        self.apply(reaction)
    }

    fn on_button(&self, id: MouseButtonId, down: bool) -> bool {
        if self.mode() == Mode::Local {
            return false;
        }
        let reaction = self.react(|machine, now| machine.on_button(id, down, now));
        self.apply(reaction)
    }

    fn on_key(&self, native: u16, down: bool) -> bool {
        if self.mode() == Mode::Local {
            return false;
        }
        let reaction = self.react(|machine, now| machine.on_key(native, down, now));
        self.apply(reaction)
    }

    fn on_wheel(&self, delta: i16) -> bool {
        if self.mode() == Mode::Local {
            return false;
        }
        let reaction = self.react(|machine, now| machine.on_wheel(delta, now));
        self.apply(reaction)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
