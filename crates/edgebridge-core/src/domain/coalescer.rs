//! Motion coalescing.
//!
//! Pointer hardware reports motion far more often than a low-bandwidth radio
//! link can carry it.  [`DeltaCoalescer`] sums small relative deltas and hands
//! out a single [`Packet::MouseMove`] when either enough time has passed or
//! enough distance has piled up.
//!
//! The coalescer never reads a clock itself: every call takes `now`, which
//! keeps it deterministic under test.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::protocol::packet::Packet;

/// Clamps an `i32` into the `i16` range carried on the wire.
///
/// # Examples
///
/// ```rust
/// use edgebridge_core::clamp_i16;
///
/// assert_eq!(clamp_i16(40_000), i16::MAX);
/// assert_eq!(clamp_i16(-40_000), i16::MIN);
/// assert_eq!(clamp_i16(-5), -5);
/// ```
pub fn clamp_i16(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Accumulates relative motion and decides when to emit it.
#[derive(Debug, Clone)]
pub struct DeltaCoalescer {
    pending_dx: i32,
    pending_dy: i32,
    last_flush: Instant,
    interval: Duration,
    magnitude: i32,
}

impl DeltaCoalescer {
    /// Creates an empty coalescer whose flush timer starts at `now`.
    pub fn new(interval: Duration, magnitude: i32, now: Instant) -> Self {
        Self {
            pending_dx: 0,
            pending_dy: 0,
            last_flush: now,
            interval,
            magnitude,
        }
    }

    /// Adds one sample to the pending sum, then flushes if due.
    ///
    /// Returns the packet to forward, if the sample made one due.
    pub fn accumulate(&mut self, dx: i32, dy: i32, now: Instant) -> Option<Packet> {
        self.pending_dx = self.pending_dx.saturating_add(dx);
        self.pending_dy = self.pending_dy.saturating_add(dy);
        self.flush(false, now)
    }

    /// Emits the pending motion as one MouseMove and zeroes it.
    ///
    /// Without `force`, a packet is emitted only when the flush interval has
    /// elapsed since the previous flush or either axis has reached the flush
    /// magnitude.  Nothing is emitted when no motion is pending, even when
    /// forced.  Each axis is clamped to `i16` on the way out; the excess is
    /// discarded rather than carried over.
    pub fn flush(&mut self, force: bool, now: Instant) -> Option<Packet> {
        if self.pending_dx == 0 && self.pending_dy == 0 {
            return None;
        }

        if !force {
            let elapsed = now.saturating_duration_since(self.last_flush);
            let limit = self.magnitude.unsigned_abs();
            let large =
                self.pending_dx.unsigned_abs() >= limit || self.pending_dy.unsigned_abs() >= limit;
            if elapsed < self.interval && !large {
                return None;
            }
        }

        let packet = Packet::MouseMove {
            dx: clamp_i16(self.pending_dx),
            dy: clamp_i16(self.pending_dy),
        };
        trace!(
            dx = self.pending_dx,
            dy = self.pending_dy,
            force,
            "flushing coalesced motion"
        );
        self.pending_dx = 0;
        self.pending_dy = 0;
        self.last_flush = now;
        Some(packet)
    }

    /// Discards any pending motion and restarts the flush timer.
    pub fn reset(&mut self, now: Instant) {
        self.pending_dx = 0;
        self.pending_dy = 0;
        self.last_flush = now;
    }

    /// Returns the motion accumulated since the last flush.
    pub fn pending(&self) -> (i32, i32) {
        (self.pending_dx, self.pending_dy)
    }

    /// The instant at which pending motion becomes due by time alone.
    ///
    /// `None` while nothing is pending.  Once the deadline passes,
    /// `flush(false, now)` emits even if no further sample arrives.
    pub fn deadline(&self) -> Option<Instant> {
        if self.pending_dx == 0 && self.pending_dy == 0 {
            return None;
        }
        Some(self.last_flush + self.interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(8);

    fn coalescer(now: Instant) -> DeltaCoalescer {
        DeltaCoalescer::new(INTERVAL, 20, now)
    }

    // ── clamp_i16 ─────────────────────────────────────────────────────────────

    #[test]
    fn test_clamp_i16_saturates_at_both_ends() {
        assert_eq!(clamp_i16(i32::MAX), i16::MAX);
        assert_eq!(clamp_i16(i32::MIN), i16::MIN);
        assert_eq!(clamp_i16(32_767), 32_767);
        assert_eq!(clamp_i16(-32_768), -32_768);
    }

    // ── accumulate ────────────────────────────────────────────────────────────

    #[test]
    fn test_small_deltas_within_interval_are_held() {
        // Arrange
        let t0 = Instant::now();
        let mut c = coalescer(t0);

        // Act
        let first = c.accumulate(3, 2, t0 + Duration::from_millis(1));
        let second = c.accumulate(4, -1, t0 + Duration::from_millis(2));

        // Assert
        assert_eq!(first, None);
        assert_eq!(second, None);
        assert_eq!(c.pending(), (7, 1));
    }

    #[test]
    fn test_magnitude_threshold_flushes_immediately() {
        let t0 = Instant::now();
        let mut c = coalescer(t0);

        c.accumulate(10, 0, t0);
        let packet = c.accumulate(10, 3, t0);

        assert_eq!(packet, Some(Packet::MouseMove { dx: 20, dy: 3 }));
        assert_eq!(c.pending(), (0, 0));
    }

    #[test]
    fn test_negative_magnitude_also_flushes() {
        let t0 = Instant::now();
        let mut c = coalescer(t0);

        let packet = c.accumulate(0, -25, t0);

        assert_eq!(packet, Some(Packet::MouseMove { dx: 0, dy: -25 }));
    }

    #[test]
    fn test_elapsed_interval_flushes_small_motion() {
        let t0 = Instant::now();
        let mut c = coalescer(t0);

        assert_eq!(c.accumulate(1, 1, t0 + Duration::from_millis(3)), None);
        let packet = c.accumulate(1, 0, t0 + INTERVAL);

        assert_eq!(packet, Some(Packet::MouseMove { dx: 2, dy: 1 }));
    }

    #[test]
    fn test_flush_restarts_interval() {
        let t0 = Instant::now();
        let mut c = coalescer(t0);
        let t1 = t0 + INTERVAL;
        assert!(c.accumulate(1, 0, t1).is_some());

        // Only 4 ms since the last flush.
        assert_eq!(c.accumulate(1, 0, t1 + Duration::from_millis(4)), None);
    }

    #[test]
    fn test_saturating_accumulation_never_overflows() {
        let t0 = Instant::now();
        let mut c = DeltaCoalescer::new(INTERVAL, i32::MAX, t0);

        assert_eq!(c.accumulate(i32::MAX - 1, 0, t0), None);
        let packet = c.accumulate(i32::MAX - 1, 0, t0);

        assert_eq!(packet, Some(Packet::MouseMove { dx: i16::MAX, dy: 0 }));
    }

    // ── flush ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_forced_flush_emits_pending_regardless_of_timers() {
        let t0 = Instant::now();
        let mut c = coalescer(t0);
        c.accumulate(2, -3, t0);

        assert_eq!(c.flush(true, t0), Some(Packet::MouseMove { dx: 2, dy: -3 }));
    }

    #[test]
    fn test_forced_flush_with_nothing_pending_emits_nothing() {
        let t0 = Instant::now();
        let mut c = coalescer(t0);

        assert_eq!(c.flush(true, t0 + Duration::from_secs(1)), None);
    }

    #[test]
    fn test_deltas_that_cancel_out_emit_nothing() {
        let t0 = Instant::now();
        let mut c = coalescer(t0);
        c.accumulate(5, 5, t0);
        c.accumulate(-5, -5, t0);

        assert_eq!(c.flush(true, t0), None);
    }

    #[test]
    fn test_flush_clamps_oversized_totals() {
        let t0 = Instant::now();
        let mut c = DeltaCoalescer::new(INTERVAL, i32::MAX, t0);
        c.accumulate(40_000, -40_000, t0);

        let packet = c.flush(true, t0);

        assert_eq!(
            packet,
            Some(Packet::MouseMove {
                dx: i16::MAX,
                dy: i16::MIN
            })
        );
        assert_eq!(c.pending(), (0, 0), "excess beyond i16 is discarded");
    }

    // ── reset ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_reset_discards_pending_motion() {
        let t0 = Instant::now();
        let mut c = coalescer(t0);
        c.accumulate(7, 7, t0);

        c.reset(t0);

        assert_eq!(c.pending(), (0, 0));
        assert_eq!(c.flush(true, t0), None);
    }

    // ── deadline ──────────────────────────────────────────────────────────────

    #[test]
    fn test_no_deadline_while_nothing_is_pending() {
        let t0 = Instant::now();
        let c = coalescer(t0);

        assert_eq!(c.deadline(), None);
    }

    #[test]
    fn test_lone_small_move_is_due_at_the_deadline() {
        // Arrange: one 5 px sample, then silence.
        let t0 = Instant::now();
        let mut c = coalescer(t0);
        assert_eq!(c.accumulate(5, 0, t0 + Duration::from_millis(1)), None);

        // Act
        let deadline = c.deadline();
        let early = c.flush(false, t0 + Duration::from_millis(7));
        let due = c.flush(false, t0 + INTERVAL);

        // Assert
        assert_eq!(deadline, Some(t0 + INTERVAL));
        assert_eq!(early, None);
        assert_eq!(due, Some(Packet::MouseMove { dx: 5, dy: 0 }));
        assert_eq!(c.deadline(), None);
    }

    #[test]
    fn test_deadline_follows_the_last_flush() {
        let t0 = Instant::now();
        let mut c = coalescer(t0);
        let t1 = t0 + Duration::from_millis(3);
        assert!(c.accumulate(25, 0, t1).is_some());

        c.accumulate(1, 0, t1);

        assert_eq!(c.deadline(), Some(t1 + INTERVAL));
    }
}
