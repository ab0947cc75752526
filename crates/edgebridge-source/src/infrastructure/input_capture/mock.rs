//! Mock input hook and cursor warpers.
//!
//! [`MockInputHook`] replaces the OS hook: tests call its `inject_*` methods
//! to deliver events exactly as the platform callback would, and read back
//! the suppress decision.  [`RecordingWarper`] records every warp request.
//! [`LoggingWarper`] only logs, for the headless binary.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use edgebridge_core::MouseButtonId;
use tracing::debug;

use super::{CaptureError, InputHook};
use crate::application::bridge_input::InputHandler;
use crate::application::recenter::CursorWarper;

/// An [`InputHook`] driven by test code.
#[derive(Default)]
pub struct MockInputHook {
    handler: Mutex<Option<Arc<dyn InputHandler>>>,
    fail_install: AtomicBool,
    uninstall_count: AtomicU32,
}

impl MockInputHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// A hook whose `install` fails, as when the input-monitoring permission
    /// has not been granted.
    pub fn failing() -> Self {
        let hook = Self::default();
        hook.fail_install.store(true, Ordering::SeqCst);
        hook
    }

    pub fn is_installed(&self) -> bool {
        self.current().is_some()
    }

    /// Number of times [`InputHook::uninstall`] was called.
    pub fn uninstall_count(&self) -> u32 {
        self.uninstall_count.load(Ordering::SeqCst)
    }

    /// Delivers a cursor sample.  Returns the suppress decision, or `false`
    /// (pass through) when no handler is installed.
    pub fn inject_motion(&self, x: i32, y: i32, synthetic: bool) -> bool {
        self.current()
            .is_some_and(|h| h.on_motion(x, y, synthetic))
    }

    pub fn inject_button(&self, id: MouseButtonId, down: bool) -> bool {
        self.current().is_some_and(|h| h.on_button(id, down))
    }

    pub fn inject_key(&self, native: u16, down: bool) -> bool {
        self.current().is_some_and(|h| h.on_key(native, down))
    }

    pub fn inject_wheel(&self, delta: i16) -> bool {
        self.current().is_some_and(|h| h.on_wheel(delta))
    }

    /// Clones the handler out so it is never called with the slot locked.
    fn current(&self) -> Option<Arc<dyn InputHandler>> {
        self.handler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl InputHook for MockInputHook {
    fn install(&self, handler: Arc<dyn InputHandler>) -> Result<(), CaptureError> {
        if self.fail_install.load(Ordering::SeqCst) {
            return Err(CaptureError::PermissionDenied(
                "input monitoring not granted".to_string(),
            ));
        }
        let mut slot = self.handler.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(CaptureError::AlreadyInstalled);
        }
        *slot = Some(handler);
        Ok(())
    }

    fn uninstall(&self) {
        self.uninstall_count.fetch_add(1, Ordering::SeqCst);
        *self.handler.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// A [`CursorWarper`] that records every warp target.
#[derive(Debug, Default)]
pub struct RecordingWarper {
    warps: Mutex<Vec<(i32, i32)>>,
}

impl RecordingWarper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warps(&self) -> Vec<(i32, i32)> {
        self.warps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CursorWarper for RecordingWarper {
    fn warp_to(&self, x: i32, y: i32) {
        self.warps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((x, y));
    }
}

/// A [`CursorWarper`] that only logs.
#[derive(Debug, Default)]
pub struct LoggingWarper;

impl CursorWarper for LoggingWarper {
    fn warp_to(&self, x: i32, y: i32) {
        debug!(x, y, "cursor warp");
    }
}
