//! Application layer for the source machine.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure business rules in `edgebridge-core`) and the infrastructure
//! (OS hooks, radio transport, files).  Code here decides *what* happens to
//! each input event but never talks to the operating system directly: every
//! side effect goes through a trait that the infrastructure implements.
//!
//! # Sub-modules
//!
//! - **`mode`** – The Local/Remote state machine.  Decides for every captured
//!   event whether it is swallowed and which packets it produces.
//!
//! - **`recenter`** – Keeps the real cursor near the anchor while in Remote
//!   mode so hook coordinates never pin against a screen edge.
//!
//! - **`bridge_input`** – The [`bridge_input::InputBridge`] facade the OS hook
//!   calls into.  Owns the lock around the state machine and performs the
//!   enqueue and cursor warp after releasing it.

pub mod bridge_input;
pub mod mode;
pub mod recenter;
