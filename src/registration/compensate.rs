//! IMU motion compensation into the sweep-start frame.

use crate::core::math::{rotate_yxz, rotate_zxy};
use crate::core::types::{ImuState, Point3D};
use serde::{Deserialize, Serialize};

/// Projects points acquired mid-sweep back into the sweep-start frame.
///
/// Holds the reference inertial state established at sweep start. For each
/// point, the compensator composes the point's own interpolated pose with
/// the inverse of the reference pose: rotate into the world frame, apply
/// the position drift accumulated since sweep start, rotate back into the
/// start orientation.
#[derive(Debug, Clone, Copy)]
pub struct MotionCompensator {
    start: ImuState,
}

impl MotionCompensator {
    /// Create a compensator for a sweep whose start state is `start`.
    pub fn new(start: ImuState) -> Self {
        Self { start }
    }

    /// The sweep-start reference state.
    #[inline]
    pub fn start_state(&self) -> &ImuState {
        &self.start
    }

    /// Position drift at `rel_time` beyond constant-velocity motion.
    ///
    /// A sensor moving at the sweep-start velocity produces no distortion
    /// in its own odometry frame; only the deviation from that motion needs
    /// to be corrected.
    #[inline]
    pub fn position_shift(&self, current: &ImuState, rel_time: f32) -> Point3D {
        current.position - self.start.position - self.start.velocity * rel_time
    }

    /// Re-express a point in the sweep-start frame.
    ///
    /// `current` is the interpolated inertial state at the point's
    /// acquisition time. When `current` equals the start state and the
    /// drift is zero, this is the identity.
    pub fn to_sweep_start(&self, p: Point3D, current: &ImuState, rel_time: f32) -> Point3D {
        let world = rotate_zxy(p, current.roll, current.pitch, current.yaw);
        let shifted = world + self.position_shift(current, rel_time);
        rotate_yxz(shifted, -self.start.yaw, -self.start.pitch, -self.start.roll)
    }
}

/// Per-sweep motion summary for the downstream odometry stage.
///
/// Captures the inertial states at the sweep's boundaries together with the
/// accumulated drift and velocity change, both rotated into the sweep-start
/// frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepMotion {
    /// Inertial state at sweep start
    pub start: ImuState,
    /// Inertial state at the last processed point
    pub end: ImuState,
    /// Position drift over the sweep, in the sweep-start frame
    pub shift_from_start: Point3D,
    /// Velocity change over the sweep, in the sweep-start frame
    pub velocity_from_start: Point3D,
}

impl SweepMotion {
    /// Summarize a sweep's motion once all points are processed.
    pub fn compute(compensator: &MotionCompensator, end: ImuState, period: f32) -> Self {
        let start = *compensator.start_state();
        let inverse = |v: Point3D| rotate_yxz(v, -start.yaw, -start.pitch, -start.roll);

        Self {
            start,
            end,
            shift_from_start: inverse(compensator.position_shift(&end, period)),
            velocity_from_start: inverse(end.velocity - start.velocity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_at_sweep_start() {
        let start = ImuState {
            roll: 0.1,
            pitch: -0.05,
            yaw: 1.2,
            velocity: Point3D::new(1.0, 0.0, 2.0),
            position: Point3D::new(10.0, 0.5, -3.0),
        };
        let compensator = MotionCompensator::new(start);

        let p = Point3D::new(1.0, 2.0, 3.0);
        let result = compensator.to_sweep_start(p, &start, 0.0);

        assert_relative_eq!(result.x, p.x, epsilon = 1e-5);
        assert_relative_eq!(result.y, p.y, epsilon = 1e-5);
        assert_relative_eq!(result.z, p.z, epsilon = 1e-5);
    }

    #[test]
    fn test_constant_velocity_produces_no_shift() {
        let start = ImuState {
            velocity: Point3D::new(0.0, 0.0, 2.0),
            position: Point3D::new(0.0, 0.0, 0.0),
            ..ImuState::default()
        };
        // Halfway through the sweep the sensor moved exactly v·t
        let current = ImuState {
            position: Point3D::new(0.0, 0.0, 0.1),
            ..start
        };
        let compensator = MotionCompensator::new(start);

        let shift = compensator.position_shift(&current, 0.05);
        assert_relative_eq!(shift.norm(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pure_yaw_rotation_compensation() {
        // Sensor yawed by 0.2 rad since sweep start, no translation
        let start = ImuState::default();
        let current = ImuState {
            yaw: 0.2,
            ..ImuState::default()
        };
        let compensator = MotionCompensator::new(start);

        let p = Point3D::new(0.0, 0.0, 1.0);
        let result = compensator.to_sweep_start(p, &current, 0.05);

        // The point rotates with the sensor's yaw about the up axis
        assert_relative_eq!(result.x, 0.2f32.sin(), epsilon = 1e-5);
        assert_relative_eq!(result.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(result.z, 0.2f32.cos(), epsilon = 1e-5);
    }

    #[test]
    fn test_drift_translation_compensation() {
        // Sensor at rest nominally, but drifted 0.1 m forward
        let start = ImuState::default();
        let current = ImuState {
            position: Point3D::new(0.0, 0.0, 0.1),
            ..ImuState::default()
        };
        let compensator = MotionCompensator::new(start);

        let p = Point3D::new(0.0, 0.0, 1.0);
        let result = compensator.to_sweep_start(p, &current, 0.05);

        assert_relative_eq!(result.z, 1.1, epsilon = 1e-6);
    }

    #[test]
    fn test_sweep_motion_summary() {
        let start = ImuState {
            velocity: Point3D::new(0.0, 0.0, 1.0),
            ..ImuState::default()
        };
        let end = ImuState {
            velocity: Point3D::new(0.0, 0.0, 1.5),
            position: Point3D::new(0.0, 0.0, 0.15),
            ..ImuState::default()
        };
        let compensator = MotionCompensator::new(start);

        let motion = SweepMotion::compute(&compensator, end, 0.1);

        // Drift: 0.15 m travelled vs 0.1 m expected at the start velocity
        assert_relative_eq!(motion.shift_from_start.z, 0.05, epsilon = 1e-6);
        assert_relative_eq!(motion.velocity_from_start.z, 0.5, epsilon = 1e-6);
        assert_eq!(motion.start, start);
        assert_eq!(motion.end, end);
    }
}
