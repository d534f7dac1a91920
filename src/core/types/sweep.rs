//! Sweep-level metadata and the ring index table.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Angular and timing metadata for one sweep.
///
/// `start_azimuth` and `end_azimuth` are unwrapped so that
/// `end_azimuth - start_azimuth` lies in (π, 3π] regardless of where the
/// raw first/last azimuths fell relative to the atan2 branch cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepMetadata {
    /// Sweep start azimuth in radians
    pub start_azimuth: f32,
    /// Sweep end azimuth in radians, unwrapped past the start
    pub end_azimuth: f32,
    /// Nominal sweep duration in seconds
    pub period: f32,
    /// Number of physical scan rings on the sensor
    pub ring_count: u16,
}

impl SweepMetadata {
    /// Angular span of the sweep in radians.
    #[inline]
    pub fn angular_span(&self) -> f32 {
        self.end_azimuth - self.start_azimuth
    }
}

/// Per-ring index ranges into the assembled sweep cloud.
///
/// Ring `i` occupies the half-open range `[start, end)` returned by
/// [`Self::range`]. The ranges are contiguous and ascending: they partition
/// `[0, total_points)` exactly, and an empty ring yields an empty range at
/// its insertion point. Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScanIndexTable {
    ranges: Vec<Range<usize>>,
}

impl ScanIndexTable {
    /// Build a table from per-ring point counts, in ascending ring order.
    pub fn from_ring_sizes(sizes: &[usize]) -> Self {
        let mut ranges = Vec::with_capacity(sizes.len());
        let mut offset = 0;
        for &size in sizes {
            ranges.push(offset..offset + size);
            offset += size;
        }
        Self { ranges }
    }

    /// Number of rings in the table.
    #[inline]
    pub fn ring_count(&self) -> usize {
        self.ranges.len()
    }

    /// Index range of a ring's points in the assembled cloud.
    ///
    /// # Panics
    /// Panics if `ring` is out of bounds.
    #[inline]
    pub fn range(&self, ring: usize) -> Range<usize> {
        self.ranges[ring].clone()
    }

    /// Index of the first point of a ring.
    #[inline]
    pub fn start_index(&self, ring: usize) -> usize {
        self.ranges[ring].start
    }

    /// Index of the last point of a ring, or `None` for an empty ring.
    #[inline]
    pub fn end_index(&self, ring: usize) -> Option<usize> {
        let r = &self.ranges[ring];
        if r.is_empty() {
            None
        } else {
            Some(r.end - 1)
        }
    }

    /// Whether a ring received no points.
    #[inline]
    pub fn is_ring_empty(&self, ring: usize) -> bool {
        self.ranges[ring].is_empty()
    }

    /// Total number of points covered by the table.
    #[inline]
    pub fn total_points(&self) -> usize {
        self.ranges.last().map_or(0, |r| r.end)
    }

    /// Iterate over the per-ring ranges in ascending ring order.
    pub fn iter(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.ranges.iter().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_span() {
        let meta = SweepMetadata {
            start_azimuth: 0.5,
            end_azimuth: 0.5 + std::f32::consts::TAU,
            period: 0.1,
            ring_count: 16,
        };
        assert!((meta.angular_span() - std::f32::consts::TAU).abs() < 1e-6);
    }

    #[test]
    fn test_index_table_partition() {
        let table = ScanIndexTable::from_ring_sizes(&[3, 0, 2, 5]);

        assert_eq!(table.ring_count(), 4);
        assert_eq!(table.range(0), 0..3);
        assert_eq!(table.range(1), 3..3);
        assert_eq!(table.range(2), 3..5);
        assert_eq!(table.range(3), 5..10);
        assert_eq!(table.total_points(), 10);

        // Ranges tile [0, total) with no gaps or overlaps
        let mut expected_start = 0;
        for range in table.iter() {
            assert_eq!(range.start, expected_start);
            expected_start = range.end;
        }
        assert_eq!(expected_start, table.total_points());
    }

    #[test]
    fn test_index_table_empty_ring() {
        let table = ScanIndexTable::from_ring_sizes(&[0, 4]);

        assert!(table.is_ring_empty(0));
        assert!(!table.is_ring_empty(1));
        assert_eq!(table.start_index(0), 0);
        assert_eq!(table.end_index(0), None);
        assert_eq!(table.end_index(1), Some(3));
    }

    #[test]
    fn test_index_table_all_empty() {
        let table = ScanIndexTable::from_ring_sizes(&[0; 16]);
        assert_eq!(table.total_points(), 0);
        assert_eq!(table.ring_count(), 16);
    }
}
