//! Vertical-angle to scan-ring classification.

use crate::core::types::Point3D;

/// Maps a continuous vertical beam angle to a discrete physical ring index.
///
/// The mapping is sensor-geometry specific: different sensors lay out their
/// beams differently, so the formula lives behind this trait rather than
/// inline in the registration loop.
pub trait VerticalAngleToRing: Send + Sync {
    /// Ring id for a vertical angle in degrees, or `None` when the angle
    /// falls outside the sensor's field of view.
    fn ring_for_angle(&self, angle_deg: f32) -> Option<u16>;

    /// Number of physical rings on the sensor.
    fn ring_count(&self) -> u16;
}

/// Ring layout for sensors with interleaved beams at whole-degree spacing.
///
/// Covers the Velodyne VLP-16 family: the vertical angle rounds to the
/// nearest degree (ties away from zero) and non-negative angles map directly
/// to low ring indices while negative angles wrap into the upper index
/// range: `id = r > 0 ? r : r + (ring_count - 1)`.
#[derive(Debug, Clone, Copy)]
pub struct InterleavedRingTable {
    ring_count: u16,
}

impl InterleavedRingTable {
    /// Create a table for a sensor with the given beam count.
    pub fn new(ring_count: u16) -> Self {
        Self { ring_count }
    }
}

impl VerticalAngleToRing for InterleavedRingTable {
    fn ring_for_angle(&self, angle_deg: f32) -> Option<u16> {
        // f32::round ties away from zero, matching the sensor layout
        let rounded = angle_deg.round() as i32;
        let id = if rounded > 0 {
            rounded
        } else {
            rounded + i32::from(self.ring_count) - 1
        };

        if id < 0 || id >= i32::from(self.ring_count) {
            return None;
        }
        Some(id as u16)
    }

    fn ring_count(&self) -> u16 {
        self.ring_count
    }
}

/// Vertical beam angle of a remapped point, in degrees.
///
/// With y up, the beam elevation is `atan(y / sqrt(x² + z²))`.
#[inline]
pub fn vertical_angle_deg(p: &Point3D) -> f32 {
    (p.y / (p.x * p.x + p.z * p.z).sqrt()).atan().to_degrees()
}
