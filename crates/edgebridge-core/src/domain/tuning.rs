//! Numeric limits that shape forwarded motion.

use std::time::Duration;

/// Default largest per-axis jump accepted as genuine motion, in pixels.
pub const DEFAULT_SPIKE_LIMIT: i32 = 1200;
/// Default maximum time pending motion may wait before being flushed.
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_millis(8);
/// Default per-axis pending magnitude that forces an early flush.
pub const DEFAULT_FLUSH_MAGNITUDE: i32 = 20;
/// Default distance from the anchor that triggers a recenter warp.
pub const DEFAULT_RECENTER_RADIUS: i32 = 200;

/// Motion tuning constants.
///
/// The defaults suit a 1080p display driven by an ordinary mouse.  All values
/// can be overridden from the `[tuning]` table of the source configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuning {
    /// Samples whose raw per-axis delta exceeds this are discarded.
    pub spike_limit: i32,
    /// Flush pending motion at least this often while it keeps arriving.
    pub flush_interval: Duration,
    /// Flush as soon as either pending axis reaches this magnitude.
    pub flush_magnitude: i32,
    /// Warp the cursor back to the anchor once it strays this far.
    pub recenter_radius: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spike_limit: DEFAULT_SPIKE_LIMIT,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            flush_magnitude: DEFAULT_FLUSH_MAGNITUDE,
            recenter_radius: DEFAULT_RECENTER_RADIUS,
        }
    }
}
