//! Infrastructure layer for the target.
//!
//! - [`injection`] – [`InputInjector`](crate::application::dispatch_inbound::InputInjector)
//!   implementations (recording and logging backends).
//! - [`link`] – The receive loop that feeds notifications to the dispatcher.
//! - [`storage`] – `target.toml` loading.

pub mod injection;
pub mod link;
pub mod storage;
