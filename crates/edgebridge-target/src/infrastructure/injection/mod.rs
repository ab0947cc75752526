//! Input injection backends.
//!
//! Platform backends (`SendInput`, XTest, `CGEventPost`) are outside this
//! build.  [`mock`] provides a recording injector for tests and a logging
//! injector for the headless binary.

pub mod mock;

pub use mock::{InjectedEvent, LoggingInjector, RecordingInjector};
