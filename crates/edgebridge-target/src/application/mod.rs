//! Application layer for the target.
//!
//! Contains the use case that turns received packets into injected input.

pub mod dispatch_inbound;
