//! Infrastructure layer for the source application.
//!
//! Contains OS-facing adapters: the input hook, the outbound packet queue
//! and its send loop, the radio transport seam, and configuration storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `edgebridge_core`, but MUST NOT be imported by the domain layer.

pub mod input_capture;
pub mod outbound;
pub mod storage;
pub mod transport;
