//! Ring-ordered sweep cloud assembly.

use crate::core::types::{ScanIndexTable, ScanPoint};

/// Collects per-ring point buffers during a sweep and concatenates them into
/// one ring-ordered cloud with an index table.
///
/// The buffers are sweep-scoped: [`Self::clear`] resets them at sweep start
/// while retaining their allocations across sweeps.
#[derive(Debug, Clone)]
pub struct ScanAssembler {
    rings: Vec<Vec<ScanPoint>>,
}

impl ScanAssembler {
    /// Create an assembler for a sensor with the given ring count.
    pub fn new(ring_count: u16) -> Self {
        Self {
            rings: vec![Vec::new(); ring_count as usize],
        }
    }

    /// Append a point to its ring buffer.
    ///
    /// # Panics
    /// Panics if `ring` is beyond the configured ring count; the classifier
    /// guarantees ids in range.
    #[inline]
    pub fn push(&mut self, ring: u16, point: ScanPoint) {
        self.rings[ring as usize].push(point);
    }

    /// Total points buffered so far.
    pub fn len(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }

    /// Whether no points are buffered.
    pub fn is_empty(&self) -> bool {
        self.rings.iter().all(Vec::is_empty)
    }

    /// Clear all ring buffers, retaining capacity.
    pub fn clear(&mut self) {
        for ring in &mut self.rings {
            ring.clear();
        }
    }

    /// Concatenate the ring buffers in ascending ring order.
    ///
    /// Returns the assembled cloud and the per-ring index table. The
    /// buffers are left empty afterwards.
    pub fn assemble(&mut self) -> (Vec<ScanPoint>, ScanIndexTable) {
        let sizes: Vec<usize> = self.rings.iter().map(Vec::len).collect();
        let table = ScanIndexTable::from_ring_sizes(&sizes);

        let mut cloud = Vec::with_capacity(table.total_points());
        for ring in &mut self.rings {
            cloud.append(ring);
        }

        (cloud, table)
    }
}
