//! Per-sweep registration pipeline.
//!
//! Turns one rotating-LiDAR sweep into a motion-compensated, ring-organized
//! point cloud for downstream feature extraction.
//!
//! # Pipeline
//!
//! ```text
//! raw sweep → axis remap → validity filter → ring classification
//!           → relative timing → IMU interpolation → motion compensation
//!           → ring buffers → assembled cloud + index table
//! ```
//!
//! The azimuth range is estimated once per sweep from the first and last
//! point; every valid point then flows through the per-point stages. The
//! whole pipeline is single-threaded and synchronous per sweep: all
//! sweep-scoped state is reset before the next sweep begins, and the shared
//! IMU history is only read.
//!
//! # Example
//!
//! ```ignore
//! use chakra_registration::registration::{RegistrationConfig, SweepRegistration};
//! use chakra_registration::sensors::imu::ImuHistory;
//!
//! let mut registration = SweepRegistration::new(RegistrationConfig::default());
//! let imu = ImuHistory::default();
//!
//! if let Some(sweep) = registration.process(&points, timestamp_us, &imu)? {
//!     feature_extractor.consume(&sweep.points, &sweep.index);
//! }
//! ```

mod assembler;
mod azimuth;
mod compensate;
mod rings;
mod timing;

pub use assembler::ScanAssembler;
pub use azimuth::AzimuthRange;
pub use compensate::{MotionCompensator, SweepMotion};
pub use rings::{vertical_angle_deg, InterleavedRingTable, VerticalAngleToRing};
pub use timing::SweepTimer;

use crate::core::types::{
    offset_us, ImuState, Point3D, ScanIndexTable, ScanPoint, SweepMetadata,
};
use crate::error::{RegistrationError, Result};
use crate::sensors::imu::{ImuCursor, ImuHistory};

/// Configuration for the sweep registration pipeline.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationConfig {
    /// Nominal sweep duration in seconds.
    /// Default: 0.1 (10 Hz rotation)
    pub sweep_period: f32,

    /// Number of physical scan rings on the sensor.
    /// Default: 16 (VLP-16)
    pub ring_count: u16,

    /// Number of initial sweeps dropped unprocessed so the IMU history can
    /// accumulate enough samples for meaningful interpolation. This is a
    /// correctness requirement, not a warm-up optimization.
    /// Default: 20
    pub startup_sweeps: u32,

    /// Squared-norm threshold below which a return is treated as a
    /// self-reflection or empty return and dropped.
    /// Default: 1e-4 (1 cm)
    pub min_squared_range: f32,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            sweep_period: 0.1,
            ring_count: 16,
            startup_sweeps: 20,
            min_squared_range: 1e-4,
        }
    }
}

/// One fully registered sweep: the motion-compensated, ring-ordered cloud
/// with its index table and motion summary.
#[derive(Debug, Clone)]
pub struct RegisteredSweep {
    /// Sweep start timestamp in microseconds
    pub timestamp_us: u64,
    /// Ring-ordered, motion-compensated points
    pub points: Vec<ScanPoint>,
    /// Per-ring index ranges into `points`
    pub index: ScanIndexTable,
    /// Azimuth range and timing metadata
    pub metadata: SweepMetadata,
    /// Motion summary for the odometry stage; `None` without IMU data
    pub motion: Option<SweepMotion>,
}

/// Sweep registration pipeline.
///
/// Owns the sweep-scoped working state (ring buffers, startup counter) and
/// the ring layout; the IMU history is shared by the caller and passed to
/// [`Self::process`] read-only.
pub struct SweepRegistration {
    config: RegistrationConfig,
    ring_table: Box<dyn VerticalAngleToRing>,
    assembler: ScanAssembler,
    remaining_startup: u32,
}

impl SweepRegistration {
    /// Create a pipeline with the interleaved whole-degree ring layout
    /// (VLP-16 family).
    pub fn new(config: RegistrationConfig) -> Self {
        Self::with_ring_table(config, Box::new(InterleavedRingTable::new(config.ring_count)))
    }

    /// Create a pipeline with a custom ring layout.
    pub fn with_ring_table(
        config: RegistrationConfig,
        ring_table: Box<dyn VerticalAngleToRing>,
    ) -> Self {
        Self {
            config,
            assembler: ScanAssembler::new(ring_table.ring_count()),
            ring_table,
            remaining_startup: config.startup_sweeps,
        }
    }

    /// The pipeline configuration.
    #[inline]
    pub fn config(&self) -> &RegistrationConfig {
        &self.config
    }

    /// Register one sweep.
    ///
    /// `points` is the sweep's point stream in acquisition order, in the
    /// raw sensor frame (x forward, y left, z up); `timestamp_us` is the
    /// sweep's wall-clock start time. The IMU history is read through a
    /// monotonic cursor and never mutated.
    ///
    /// Returns `Ok(None)` while the startup grace period is active, and
    /// [`RegistrationError::TooFewPoints`] for sweeps that cannot span a
    /// revolution. Per-point anomalies (non-finite coordinates, near-zero
    /// returns, out-of-FOV rings) are filtered silently. With an empty IMU
    /// history, points pass through uncompensated.
    pub fn process(
        &mut self,
        points: &[Point3D],
        timestamp_us: u64,
        imu: &ImuHistory,
    ) -> Result<Option<RegisteredSweep>> {
        if self.remaining_startup > 0 {
            self.remaining_startup -= 1;
            log::debug!(
                "startup grace: dropping sweep at {} us ({} remaining)",
                timestamp_us,
                self.remaining_startup
            );
            return Ok(None);
        }

        if points.len() < 2 {
            return Err(RegistrationError::TooFewPoints(points.len()));
        }

        // Sweep-scoped state
        self.assembler.clear();
        let first = remap(&points[0]);
        let last = remap(&points[points.len() - 1]);
        let range = AzimuthRange::from_endpoints(&first, &last);
        let mut timer = SweepTimer::new(range, self.config.sweep_period);
        let mut cursor = ImuCursor::new();

        // Sweep-start reference state; absent history degrades to no
        // compensation rather than failing.
        let compensator = imu.state_at(timestamp_us).map(MotionCompensator::new);
        let mut last_state: Option<ImuState> = None;
        let mut dropped = 0usize;

        for raw in points {
            let mut p = remap(raw);

            if !p.is_finite() || p.squared_norm() < self.config.min_squared_range {
                dropped += 1;
                continue;
            }

            let ring = match self.ring_table.ring_for_angle(vertical_angle_deg(&p)) {
                Some(ring) => ring,
                None => {
                    dropped += 1;
                    continue;
                }
            };

            let rel_time = timer.relative_time(&p);

            if let Some(compensator) = &compensator {
                let target_us = offset_us(timestamp_us, rel_time);
                let current = imu
                    .interpolate_at(&mut cursor, target_us)
                    .unwrap_or(*compensator.start_state());
                p = compensator.to_sweep_start(p, &current, rel_time);
                last_state = Some(current);
            }

            self.assembler.push(ring, ScanPoint::pack(p, ring, rel_time));
        }

        let (cloud, index) = self.assembler.assemble();
        let motion = compensator.map(|c| {
            let end = last_state.unwrap_or(*c.start_state());
            SweepMotion::compute(&c, end, self.config.sweep_period)
        });

        log::debug!(
            "registered sweep at {} us: {} of {} points kept ({} dropped), span {:.3} rad",
            timestamp_us,
            cloud.len(),
            points.len(),
            dropped,
            range.span()
        );

        Ok(Some(RegisteredSweep {
            timestamp_us,
            points: cloud,
            index,
            metadata: SweepMetadata {
                start_azimuth: range.start,
                end_azimuth: range.end,
                period: self.config.sweep_period,
                ring_count: self.ring_table.ring_count(),
            },
            motion,
        }))
    }
}

/// Sensor frame (x forward, y left, z up) to vehicle axes (x left, y up,
/// z forward).
#[inline]
fn remap(raw: &Point3D) -> Point3D {
    Point3D::from_sensor_frame(raw.x, raw.y, raw.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ImuSample, Timestamped};

    /// Sensor-frame point at the given raw azimuth and elevation (degrees),
    /// unit range. Raw azimuth convention matches `-atan2(y, x)`.
    fn sensor_point(azimuth: f32, elevation_deg: f32) -> Point3D {
        let elev = elevation_deg.to_radians();
        Point3D::new(
            elev.cos() * azimuth.cos(),
            -elev.cos() * azimuth.sin(),
            elev.sin(),
        )
    }

    fn no_startup_config() -> RegistrationConfig {
        RegistrationConfig {
            startup_sweeps: 0,
            ..RegistrationConfig::default()
        }
    }

    /// Sweep of `n` points at `elevation_deg`, azimuths covering one turn.
    fn synthetic_sweep(n: usize, elevation_deg: f32) -> Vec<Point3D> {
        (0..n)
            .map(|i| {
                let azimuth = 2.0 * std::f32::consts::PI * i as f32 / n as f32;
                sensor_point(azimuth, elevation_deg)
            })
            .collect()
    }

    #[test]
    fn test_startup_sweeps_are_dropped() {
        let config = RegistrationConfig {
            startup_sweeps: 2,
            ..RegistrationConfig::default()
        };
        let mut registration = SweepRegistration::new(config);
        let imu = ImuHistory::default();
        let sweep = synthetic_sweep(16, -15.0);

        assert!(registration.process(&sweep, 0, &imu).unwrap().is_none());
        assert!(registration.process(&sweep, 100_000, &imu).unwrap().is_none());
        assert!(registration
            .process(&sweep, 200_000, &imu)
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_too_few_points() {
        let mut registration = SweepRegistration::new(no_startup_config());
        let imu = ImuHistory::default();

        let result = registration.process(&[Point3D::new(1.0, 0.0, 0.0)], 0, &imu);
        assert!(matches!(result, Err(RegistrationError::TooFewPoints(1))));
    }

    #[test]
    fn test_no_imu_passthrough_remap() {
        let mut registration = SweepRegistration::new(no_startup_config());
        let imu = ImuHistory::default();

        let sweep = synthetic_sweep(32, -15.0);
        let result = registration.process(&sweep, 0, &imu).unwrap().unwrap();

        assert!(result.motion.is_none());
        // Without IMU data, output coordinates are exactly the remapped input
        let expected = remap(&sweep[0]);
        assert_eq!(result.points.len(), 32);
        let p0 = &result.points[result.index.start_index(0)];
        assert_eq!(p0.position(), expected);
    }

    #[test]
    fn test_invalid_points_filtered() {
        let mut registration = SweepRegistration::new(no_startup_config());
        let imu = ImuHistory::default();

        let mut sweep = synthetic_sweep(16, -15.0);
        sweep.insert(4, Point3D::new(0.0, 0.0, 0.0));
        sweep.insert(8, Point3D::new(f32::NAN, 1.0, 0.0));

        let result = registration.process(&sweep, 0, &imu).unwrap().unwrap();
        assert_eq!(result.points.len(), 16);
    }

    #[test]
    fn test_ring_ids_in_range() {
        let mut registration = SweepRegistration::new(no_startup_config());
        let imu = ImuHistory::default();

        // Mix of elevations, some outside the ±15° FOV
        let mut sweep = Vec::new();
        for (i, &elev) in [-15.0, -7.0, 0.0, 5.0, 15.0, 22.0, -30.0].iter().enumerate() {
            for j in 0..8 {
                let azimuth = 2.0 * std::f32::consts::PI * (i * 8 + j) as f32 / 56.0;
                sweep.push(sensor_point(azimuth, elev));
            }
        }

        let result = registration.process(&sweep, 0, &imu).unwrap().unwrap();
        for point in &result.points {
            assert!(point.ring() < 16);
        }
        // The two out-of-FOV elevations were discarded
        assert_eq!(result.points.len(), 40);
    }

    #[test]
    fn test_idempotent_output() {
        let imu = {
            let mut history = ImuHistory::default();
            for i in 0..30 {
                history.push(Timestamped::new(
                    ImuSample {
                        roll: 0.0,
                        pitch: 0.0,
                        yaw: 0.001 * i as f32,
                        acceleration: Point3D::new(0.0, 9.81, 0.0),
                    },
                    i * 10_000,
                ));
            }
            history
        };
        let sweep = synthetic_sweep(64, -15.0);

        let mut first = SweepRegistration::new(no_startup_config());
        let mut second = SweepRegistration::new(no_startup_config());
        let a = first.process(&sweep, 50_000, &imu).unwrap().unwrap();
        let b = second.process(&sweep, 50_000, &imu).unwrap().unwrap();

        assert_eq!(a.points, b.points);
        assert_eq!(a.index, b.index);
    }
}
