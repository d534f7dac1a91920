//! Point types for 3D sweep registration.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// A 3D point in meters, vehicle axis convention (x left, y up, z forward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    /// X coordinate in meters
    pub x: f32,
    /// Y coordinate in meters
    pub y: f32,
    /// Z coordinate in meters
    pub z: f32,
}

impl Point3D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Remap a raw sensor-frame point into the vehicle axis convention.
    ///
    /// The rotating LiDAR reports x forward, y left, z up. The registration
    /// pipeline works with x left, y up, z forward, so the remap is
    /// sensor-y→x, sensor-z→y, sensor-x→z.
    #[inline]
    pub fn from_sensor_frame(x: f32, y: f32, z: f32) -> Self {
        Self { x: y, y: z, z: x }
    }

    /// Squared Euclidean norm (avoids sqrt).
    #[inline]
    pub fn squared_norm(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Euclidean norm.
    #[inline]
    pub fn norm(&self) -> f32 {
        self.squared_norm().sqrt()
    }

    /// Check that every coordinate is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Point3D {
    type Output = Point3D;

    #[inline]
    fn add(self, rhs: Point3D) -> Point3D {
        Point3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Point3D {
    #[inline]
    fn add_assign(&mut self, rhs: Point3D) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Point3D {
    type Output = Point3D;

    #[inline]
    fn sub(self, rhs: Point3D) -> Point3D {
        Point3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Point3D {
    type Output = Point3D;

    #[inline]
    fn mul(self, rhs: f32) -> Point3D {
        Point3D::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// A registered point with the packed ring/time intensity field.
///
/// `intensity = ring + rel_time` where the integer part is the scan ring id
/// and the fractional part is the point's time offset from sweep start in
/// seconds. The offset is always below one second (a sweep lasts ~0.1 s),
/// so the two never collide. Downstream feature extraction depends on this
/// encoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanPoint {
    /// X coordinate in meters (vehicle axes, sweep-start frame)
    pub x: f32,
    /// Y coordinate in meters
    pub y: f32,
    /// Z coordinate in meters
    pub z: f32,
    /// Packed ring id + relative time in seconds
    pub intensity: f32,
}

impl ScanPoint {
    /// Pack a position with its ring id and time offset from sweep start.
    #[inline]
    pub fn pack(position: Point3D, ring: u16, rel_time: f32) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            intensity: ring as f32 + rel_time,
        }
    }

    /// The point's position.
    #[inline]
    pub fn position(&self) -> Point3D {
        Point3D::new(self.x, self.y, self.z)
    }

    /// Ring id decoded from the intensity field.
    #[inline]
    pub fn ring(&self) -> u16 {
        self.intensity as u16
    }

    /// Time offset from sweep start in seconds.
    #[inline]
    pub fn time_offset(&self) -> f32 {
        self.intensity.fract()
    }

    /// Normalized time-in-sweep in [0, 1) for the given sweep period.
    #[inline]
    pub fn time_fraction(&self, period: f32) -> f32 {
        self.time_offset() / period
    }
}
