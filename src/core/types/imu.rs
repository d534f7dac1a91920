//! Inertial state types.

use super::point::Point3D;
use crate::core::math::angle_lerp;
use serde::{Deserialize, Serialize};

/// One raw inertial measurement in vehicle axes (x left, y up, z forward).
///
/// Orientation comes from the IMU's own attitude filter; the acceleration is
/// the body-frame reading with gravity still present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImuSample {
    /// Roll in radians (rotation about z)
    pub roll: f32,
    /// Pitch in radians (rotation about x)
    pub pitch: f32,
    /// Yaw in radians (rotation about y)
    pub yaw: f32,
    /// Body-frame linear acceleration in m/s², gravity included
    pub acceleration: Point3D,
}

/// Integrated inertial state: orientation plus world-frame velocity and
/// position.
///
/// Produced by [`crate::sensors::imu::ImuHistory`] when it integrates raw
/// samples; one interpolated instance is synthesized per registered point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImuState {
    /// Roll in radians (rotation about z)
    pub roll: f32,
    /// Pitch in radians (rotation about x)
    pub pitch: f32,
    /// Yaw in radians (rotation about y)
    pub yaw: f32,
    /// World-frame velocity in m/s
    pub velocity: Point3D,
    /// World-frame position in meters
    pub position: Point3D,
}

impl ImuState {
    /// Interpolate between two states.
    ///
    /// `t` is the fractional position between `a` (t = 0) and `b` (t = 1).
    /// Position and velocity interpolate linearly; orientation uses
    /// shortest-path angular interpolation per Euler component to stay
    /// continuous across the ±π boundary.
    pub fn interpolate(a: &ImuState, b: &ImuState, t: f32) -> ImuState {
        ImuState {
            roll: angle_lerp(a.roll, b.roll, t),
            pitch: angle_lerp(a.pitch, b.pitch, t),
            yaw: angle_lerp(a.yaw, b.yaw, t),
            velocity: a.velocity + (b.velocity - a.velocity) * t,
            position: a.position + (b.position - a.position) * t,
        }
    }
}
