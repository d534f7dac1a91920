//! Sweep azimuth range estimation.

use crate::core::types::Point3D;
use std::f32::consts::PI;

/// Unwrapped start/end horizontal angle of one sweep.
///
/// The raw end azimuth is taken one revolution past the raw start, then
/// adjusted by ±2π so the span lands in (π, 3π]. This keeps the sweep
/// spanning roughly one full revolution even when the last point's raw
/// azimuth numerically precedes the first's across the atan2 branch cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AzimuthRange {
    /// Start azimuth in radians
    pub start: f32,
    /// End azimuth in radians, unwrapped past the start
    pub end: f32,
}

impl AzimuthRange {
    /// Estimate the sweep's azimuth range from its first and last point
    /// (vehicle axes, i.e. after the sensor remap).
    ///
    /// Caller must guarantee the sweep holds at least two points; a
    /// single-point sweep has no meaningful range.
    pub fn from_endpoints(first: &Point3D, last: &Point3D) -> Self {
        let start = -first.x.atan2(first.z);
        let mut end = -last.x.atan2(last.z) + 2.0 * PI;

        if end - start > 3.0 * PI {
            end -= 2.0 * PI;
        } else if end - start <= PI {
            // A span at or below π cannot be a real revolution; the raw end
            // azimuth wrapped. Widening here may push the span up to 3π.
            end += 2.0 * PI;
        }

        Self { start, end }
    }

    /// Angular span in radians, guaranteed in (π, 3π].
    #[inline]
    pub fn span(&self) -> f32 {
        self.end - self.start
    }
}
