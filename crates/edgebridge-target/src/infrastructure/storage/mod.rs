//! Storage infrastructure: `target.toml` loading.

pub mod config;
