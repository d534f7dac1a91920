//! Mathematical primitives for sweep registration.
//!
//! Angle arithmetic plus the 3D axis rotations used by IMU motion
//! compensation. All rotations operate in the vehicle axis convention
//! (x left, y up, z forward): roll is a rotation about z, pitch about x,
//! yaw about y.

use crate::core::types::Point3D;
use std::f32::consts::PI;

/// Normalize angle to [-π, π].
///
/// # Example
/// ```
/// use chakra_registration::core::math::normalize_angle;
/// use std::f32::consts::PI;
///
/// assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-6);
/// assert!((normalize_angle(-3.0 * PI) - (-PI)).abs() < 1e-6);
/// ```
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a < -PI {
        a += 2.0 * PI;
    }
    a
}

/// Shortest angular difference from angle `a` to angle `b`.
///
/// Returns the signed angle you need to add to `a` to reach `b`,
/// taking the shortest path around the circle.
#[inline]
pub fn angle_diff(a: f32, b: f32) -> f32 {
    normalize_angle(b - a)
}

/// Linear interpolation between two angles, taking the shortest path.
///
/// `t` should be in [0, 1] where 0 returns `a` and 1 returns `b`.
#[inline]
pub fn angle_lerp(a: f32, b: f32, t: f32) -> f32 {
    normalize_angle(a + angle_diff(a, b) * t)
}

/// Rotate a point about the x axis.
#[inline]
pub fn rot_x(p: Point3D, angle: f32) -> Point3D {
    let (sin_a, cos_a) = angle.sin_cos();
    Point3D::new(p.x, cos_a * p.y - sin_a * p.z, sin_a * p.y + cos_a * p.z)
}

/// Rotate a point about the y axis.
#[inline]
pub fn rot_y(p: Point3D, angle: f32) -> Point3D {
    let (sin_a, cos_a) = angle.sin_cos();
    Point3D::new(cos_a * p.x + sin_a * p.z, p.y, cos_a * p.z - sin_a * p.x)
}

/// Rotate a point about the z axis.
#[inline]
pub fn rot_z(p: Point3D, angle: f32) -> Point3D {
    let (sin_a, cos_a) = angle.sin_cos();
    Point3D::new(cos_a * p.x - sin_a * p.y, sin_a * p.x + cos_a * p.y, p.z)
}

/// Rotate about z, then x, then y.
///
/// Takes a point from the local frame of a roll/pitch/yaw state into the
/// world frame: `rotate_zxy(p, roll, pitch, yaw)`.
#[inline]
pub fn rotate_zxy(p: Point3D, ang_z: f32, ang_x: f32, ang_y: f32) -> Point3D {
    rot_y(rot_x(rot_z(p, ang_z), ang_x), ang_y)
}

/// Rotate about y, then x, then z.
///
/// The inverse composition order of [`rotate_zxy`]: applying
/// `rotate_yxz(p, -yaw, -pitch, -roll)` undoes `rotate_zxy(p, roll, pitch, yaw)`.
#[inline]
pub fn rotate_yxz(p: Point3D, ang_y: f32, ang_x: f32, ang_z: f32) -> Point3D {
    rot_z(rot_x(rot_y(p, ang_y), ang_x), ang_z)
}
