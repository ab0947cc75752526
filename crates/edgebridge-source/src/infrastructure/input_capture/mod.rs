//! Input capture infrastructure for the source application.
//!
//! A platform hook (a macOS event tap, a Windows low-level hook, ...) sits
//! in front of the system's input pipeline and calls an
//! [`InputHandler`](crate::application::bridge_input::InputHandler) for every
//! event.  The handler's return value tells the hook whether to swallow the
//! event.
//!
//! # Real-time constraints
//!
//! Hook callbacks run on the thread that delivers all system input.  A slow
//! callback stalls the whole desktop, and some platforms disable a hook that
//! takes too long.  Handlers therefore only update in-memory state and
//! enqueue packets; nothing in the callback path awaits I/O.
//!
//! # Testability
//!
//! The [`InputHook`] trait lets tests and the headless binary use
//! [`mock::MockInputHook`], which feeds synthetic events to the handler.

use std::sync::Arc;

use crate::application::bridge_input::InputHandler;

pub mod mock;

/// Error type for hook installation.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The OS refused to install the hook.
    #[error("failed to install input hook: {0}")]
    InstallFailed(String),
    /// The process lacks the accessibility/input-monitoring permission.
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// A handler is already installed on this hook.
    #[error("input hook is already installed")]
    AlreadyInstalled,
}

/// A global input interception facility.
pub trait InputHook: Send + Sync {
    /// Starts delivering events to `handler`.
    fn install(&self, handler: Arc<dyn InputHandler>) -> Result<(), CaptureError>;

    /// Stops delivering events and releases OS resources.
    ///
    /// Idempotent: safe to call when nothing is installed, including after a
    /// failed or partial [`install`](Self::install).
    fn uninstall(&self);
}
