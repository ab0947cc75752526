//! In-memory input injectors.
//!
//! # Why a recording injector?
//!
//! A real injector moves the cursor and presses keys on the machine running
//! the tests, and its effects cannot be observed from Rust.  The
//! [`RecordingInjector`] pushes every call into a `Mutex<Vec<...>>` so test
//! assertions can inspect exactly what was injected and in what order.

use std::sync::{Mutex, PoisonError};

use edgebridge_core::MouseButtonId;
use tracing::debug;

use crate::application::dispatch_inbound::InputInjector;

/// One call made on an [`InputInjector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedEvent {
    Move { dx: i32, dy: i32 },
    Button { id: MouseButtonId, down: bool },
    Key { native: u16, down: bool },
    Scroll { lines: i32 },
}

/// An injector that records all calls without touching the OS.
#[derive(Debug, Default)]
pub struct RecordingInjector {
    events: Mutex<Vec<InjectedEvent>>,
}

impl RecordingInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every injected event, in call order.
    pub fn events(&self) -> Vec<InjectedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sum of all relative cursor motion injected so far.
    pub fn total_motion(&self) -> (i32, i32) {
        self.events().iter().fold((0, 0), |(x, y), event| match *event {
            InjectedEvent::Move { dx, dy } => (x + dx, y + dy),
            _ => (x, y),
        })
    }

    fn record(&self, event: InjectedEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl InputInjector for RecordingInjector {
    fn move_cursor_by(&self, dx: i32, dy: i32) {
        self.record(InjectedEvent::Move { dx, dy });
    }

    fn set_button(&self, id: MouseButtonId, down: bool) {
        self.record(InjectedEvent::Button { id, down });
    }

    fn set_key(&self, native: u16, down: bool) {
        self.record(InjectedEvent::Key { native, down });
    }

    fn scroll(&self, lines: i32) {
        self.record(InjectedEvent::Scroll { lines });
    }
}

/// An injector that only logs, used by the headless binary.
#[derive(Debug, Default)]
pub struct LoggingInjector;

impl InputInjector for LoggingInjector {
    fn move_cursor_by(&self, dx: i32, dy: i32) {
        debug!(dx, dy, "inject move");
    }

    fn set_button(&self, id: MouseButtonId, down: bool) {
        debug!(?id, down, "inject button");
    }

    fn set_key(&self, native: u16, down: bool) {
        debug!(native, down, "inject key");
    }

    fn scroll(&self, lines: i32) {
        debug!(lines, "inject scroll");
    }
}
