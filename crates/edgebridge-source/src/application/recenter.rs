//! Cursor re-centering while in Remote mode.
//!
//! The OS hook reports absolute coordinates.  If the real cursor were allowed
//! to drift to a screen edge it would stop there, and so would the deltas we
//! derive from it.  [`RecenterPolicy`] therefore pulls the cursor back to the
//! anchor whenever it strays too far, and the resulting warp is performed by
//! a [`CursorWarper`] outside the state lock.
//!
//! The warp itself produces a synthetic motion sample, which the mode machine
//! discards in Remote mode, so it is never forwarded to the target.

use crate::application::mode::CursorTracking;

/// Moves the local cursor without generating forwarded motion.
///
/// Infrastructure implementations call the platform warp API; tests use
/// `MockCursorWarper` (generated by `mockall`) or a recording double.
#[cfg_attr(test, mockall::automock)]
pub trait CursorWarper: Send + Sync {
    /// Places the local cursor at (x, y) in screen coordinates.
    fn warp_to(&self, x: i32, y: i32);
}

/// Decides when the cursor has strayed far enough from the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecenterPolicy {
    radius: i32,
}

impl RecenterPolicy {
    pub fn new(radius: i32) -> Self {
        Self { radius }
    }

    /// Returns the warp target if the cursor must go back to the anchor.
    ///
    /// A warp is due when `needs_recenter` is set or when the last tracked
    /// point lies more than `radius` pixels (Euclidean) from the anchor.  On a
    /// warp the tracked point is reset to the anchor and the request cleared.
    pub fn check(&self, tracking: &mut CursorTracking) -> Option<(i32, i32)> {
        let dx = i64::from(tracking.last_x) - i64::from(tracking.anchor_x);
        let dy = i64::from(tracking.last_y) - i64::from(tracking.anchor_y);
        let radius = i64::from(self.radius);
        let distance_sq = (dx * dx).saturating_add(dy * dy);
        let strayed = distance_sq > radius * radius;

        if !tracking.needs_recenter && !strayed {
            return None;
        }

        tracking.last_x = tracking.anchor_x;
        tracking.last_y = tracking.anchor_y;
        tracking.needs_recenter = false;
        Some((tracking.anchor_x, tracking.anchor_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracking_at(x: i32, y: i32) -> CursorTracking {
        CursorTracking {
            last_x: x,
            last_y: y,
            has_last_point: true,
            anchor_x: 960,
            anchor_y: 540,
            needs_recenter: false,
        }
    }

    #[test]
    fn test_inside_radius_needs_no_warp() {
        // Arrange
        let policy = RecenterPolicy::new(200);
        let mut tracking = tracking_at(960 + 120, 540 + 160); // exactly 200 away

        // Act
        let warp = policy.check(&mut tracking);

        // Assert
        assert_eq!(warp, None);
        assert_eq!(tracking.last_x, 1080, "tracking must be untouched");
    }

    #[test]
    fn test_outside_radius_warps_to_anchor() {
        let policy = RecenterPolicy::new(200);
        let mut tracking = tracking_at(960 + 121, 540 + 160);

        let warp = policy.check(&mut tracking);

        assert_eq!(warp, Some((960, 540)));
        assert_eq!((tracking.last_x, tracking.last_y), (960, 540));
    }

    #[test]
    fn test_pending_request_warps_even_at_the_anchor() {
        let policy = RecenterPolicy::new(200);
        let mut tracking = tracking_at(960, 540);
        tracking.needs_recenter = true;

        assert_eq!(policy.check(&mut tracking), Some((960, 540)));
        assert!(!tracking.needs_recenter);
        assert_eq!(policy.check(&mut tracking), None, "request is consumed");
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let policy = RecenterPolicy::new(200);
        let mut tracking = tracking_at(i32::MAX, i32::MIN);

        assert_eq!(policy.check(&mut tracking), Some((960, 540)));
    }

    #[test]
    fn test_mock_warper_receives_policy_target() {
        // Arrange
        let policy = RecenterPolicy::new(50);
        let mut tracking = tracking_at(1100, 540);
        let mut warper = MockCursorWarper::new();
        warper
            .expect_warp_to()
            .withf(|&x, &y| x == 960 && y == 540)
            .times(1)
            .return_const(());

        // Act
        if let Some((x, y)) = policy.check(&mut tracking) {
            warper.warp_to(x, y);
        }

        // Assert: expectations are verified when `warper` drops.
    }
}
