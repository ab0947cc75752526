//! Storage infrastructure: configuration file loading.
//!
//! The source application reads `source.toml` from the platform config
//! directory once at startup.  Nothing is written back; EdgeBridge keeps no
//! state across restarts.

pub mod config;
