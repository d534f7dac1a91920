//! Sweep-relative timing from horizontal point angles.
//!
//! The LiDAR does not timestamp individual returns, so a point's time offset
//! within the sweep is recovered from its horizontal angle and the sweep's
//! angular range. The unwrap is two-phase: before the angular midpoint a
//! point's azimuth is kept near the start azimuth, after it near the end
//! azimuth, which keeps the sequence monotonically consistent across
//! atan2's [-π, π) branch cuts.

use super::azimuth::AzimuthRange;
use crate::core::types::Point3D;
use std::f32::consts::PI;

/// Per-sweep timing model carrying the midpoint flag across points.
///
/// The `half_passed` flag is sweep-scoped control state threaded through the
/// per-point loop; create a fresh timer for every sweep.
#[derive(Debug, Clone)]
pub struct SweepTimer {
    range: AzimuthRange,
    period: f32,
    half_passed: bool,
}

impl SweepTimer {
    /// Create a timer for one sweep.
    pub fn new(range: AzimuthRange, period: f32) -> Self {
        Self {
            range,
            period,
            half_passed: false,
        }
    }

    /// Whether the sweep's angular midpoint has been crossed.
    #[inline]
    pub fn half_passed(&self) -> bool {
        self.half_passed
    }

    /// Time offset of a point from sweep start, in seconds.
    ///
    /// Points must be presented in acquisition order; the midpoint flag
    /// advances as a side effect. For well-formed sweeps the result lies in
    /// `[0, period)`.
    pub fn relative_time(&mut self, p: &Point3D) -> f32 {
        let mut ori = -p.x.atan2(p.z);

        if !self.half_passed {
            if ori < self.range.start - PI / 2.0 {
                ori += 2.0 * PI;
            } else if ori > self.range.start + PI * 3.0 / 2.0 {
                ori -= 2.0 * PI;
            }

            if ori - self.range.start > PI {
                self.half_passed = true;
            }
        } else {
            ori += 2.0 * PI;

            if ori < self.range.end - PI * 3.0 / 2.0 {
                ori += 2.0 * PI;
            } else if ori > self.range.end + PI / 2.0 {
                ori -= 2.0 * PI;
            }
        }

        self.period * (ori - self.range.start) / self.range.span()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn point_at_azimuth(ori: f32) -> Point3D {
        Point3D::new(-ori.sin(), 0.0, ori.cos())
    }

    fn full_turn_range() -> AzimuthRange {
        // One revolution starting at azimuth 0
        AzimuthRange::from_endpoints(&point_at_azimuth(0.0), &point_at_azimuth(-0.001))
    }

    #[test]
    fn test_first_point_at_time_zero() {
        let mut timer = SweepTimer::new(full_turn_range(), 0.1);
        let t = timer.relative_time(&point_at_azimuth(0.0));
        assert_relative_eq!(t, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_monotonic_over_full_revolution() {
        let mut timer = SweepTimer::new(full_turn_range(), 0.1);

        let steps = 64;
        let mut previous = -1.0f32;
        for i in 0..steps {
            // Azimuth advances through the whole revolution, wrapping at ±π
            let ori = 2.0 * PI * (i as f32 + 0.25) / steps as f32;
            let t = timer.relative_time(&point_at_azimuth(ori));

            assert!(
                t > previous,
                "relative time regressed at step {}: {} -> {}",
                i,
                previous,
                t
            );
            assert!((0.0..0.1).contains(&t), "t = {} out of [0, period)", t);
            previous = t;
        }
        assert!(timer.half_passed());
    }

    #[test]
    fn test_midpoint_flag_flips_once() {
        let mut timer = SweepTimer::new(full_turn_range(), 0.1);

        timer.relative_time(&point_at_azimuth(0.5));
        assert!(!timer.half_passed());

        // Just past half a revolution
        timer.relative_time(&point_at_azimuth(PI + 0.2));
        assert!(timer.half_passed());

        // Stays set for the rest of the sweep
        timer.relative_time(&point_at_azimuth(2.0 * PI - 0.5));
        assert!(timer.half_passed());
    }

    #[test]
    fn test_relative_time_scales_with_period() {
        let mut timer_fast = SweepTimer::new(full_turn_range(), 0.05);
        let mut timer_slow = SweepTimer::new(full_turn_range(), 0.2);

        let p = point_at_azimuth(1.0);
        let t_fast = timer_fast.relative_time(&p);
        let t_slow = timer_slow.relative_time(&p);

        assert_relative_eq!(t_slow, 4.0 * t_fast, epsilon = 1e-6);
    }
}
