//! Time-ordered IMU state history.
//!
//! Raw inertial samples are integrated into world-frame velocity and
//! position as they arrive, then held in a bounded, time-ordered buffer.
//! The registration loop reads the history through a monotonic cursor, one
//! interpolated state per point.

use crate::core::math::rotate_zxy;
use crate::core::types::{ImuSample, ImuState, Point3D, Timestamped};
use std::collections::VecDeque;

/// Configuration for the IMU history buffer.
#[derive(Debug, Clone, Copy)]
pub struct ImuHistoryConfig {
    /// Maximum number of retained states.
    ///
    /// At a typical 100 Hz IMU rate, 200 states cover two 0.1 s sweeps.
    /// Default: 200
    pub capacity: usize,

    /// Gravitational acceleration in m/s², removed from incoming samples.
    /// Default: 9.81
    pub gravity: f32,
}

impl Default for ImuHistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 200,
            gravity: 9.81,
        }
    }
}

/// Explicit cursor into an [`ImuHistory`].
///
/// The registration loop processes points in non-decreasing relative time,
/// so the cursor only ever advances within one sweep. Create a fresh cursor
/// at sweep start; never reuse one across sweeps.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImuCursor(usize);

impl ImuCursor {
    /// Cursor positioned at the oldest retained state.
    #[inline]
    pub fn new() -> Self {
        Self(0)
    }

    /// Current index into the history.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Bounded, time-ordered buffer of integrated IMU states.
///
/// Owned by the caller and shared read-only with the registration pipeline;
/// the pipeline never mutates it.
#[derive(Debug, Clone, Default)]
pub struct ImuHistory {
    states: VecDeque<Timestamped<ImuState>>,
    config: ImuHistoryConfig,
}

impl ImuHistory {
    /// Create an empty history with the given configuration.
    pub fn new(config: ImuHistoryConfig) -> Self {
        Self {
            states: VecDeque::with_capacity(config.capacity),
            config,
        }
    }

    /// Create an empty history with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(ImuHistoryConfig {
            capacity,
            ..ImuHistoryConfig::default()
        })
    }

    /// Number of retained states.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the history holds no states.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The most recent state, if any.
    #[inline]
    pub fn latest(&self) -> Option<&Timestamped<ImuState>> {
        self.states.back()
    }

    /// Ingest one raw sample: remove gravity, rotate the acceleration into
    /// the world frame, and integrate velocity and position from the
    /// previous state (constant-acceleration step).
    ///
    /// Samples must arrive in increasing timestamp order; out-of-order
    /// samples are dropped with a warning. The oldest state is evicted once
    /// the buffer exceeds its capacity.
    pub fn push(&mut self, sample: Timestamped<ImuSample>) {
        let ImuSample {
            roll,
            pitch,
            yaw,
            acceleration,
        } = sample.data;

        // Remove gravity as seen through the sample's attitude
        let (sin_r, cos_r) = roll.sin_cos();
        let (sin_p, cos_p) = pitch.sin_cos();
        let g = self.config.gravity;
        let body_acc = Point3D::new(
            acceleration.x - sin_r * cos_p * g,
            acceleration.y - cos_r * cos_p * g,
            acceleration.z + sin_p * g,
        );
        let world_acc = rotate_zxy(body_acc, roll, pitch, yaw);

        let mut state = ImuState {
            roll,
            pitch,
            yaw,
            velocity: Point3D::default(),
            position: Point3D::default(),
        };

        if let Some(prev) = self.states.back() {
            if sample.timestamp_us <= prev.timestamp_us {
                log::warn!(
                    "dropping out-of-order IMU sample at {} us (latest {} us)",
                    sample.timestamp_us,
                    prev.timestamp_us
                );
                return;
            }
            let dt = (sample.timestamp_us - prev.timestamp_us) as f32 * 1e-6;
            state.position =
                prev.data.position + prev.data.velocity * dt + world_acc * (0.5 * dt * dt);
            state.velocity = prev.data.velocity + world_acc * dt;
        }

        if self.states.len() == self.config.capacity {
            self.states.pop_front();
        }
        self.states
            .push_back(Timestamped::new(state, sample.timestamp_us));
    }

    /// Interpolate the inertial state at `target_us`, advancing the cursor.
    ///
    /// Returns the nearest retained state when the target lies outside the
    /// history bounds, a linear/angle-aware interpolation between the two
    /// bracketing states otherwise, and `None` when the history is empty.
    ///
    /// The cursor never moves backwards; callers must present targets in
    /// non-decreasing order within one sweep.
    pub fn interpolate_at(&self, cursor: &mut ImuCursor, target_us: u64) -> Option<ImuState> {
        if self.states.is_empty() {
            return None;
        }

        let last = self.states.len() - 1;
        while cursor.0 < last && self.states[cursor.0].timestamp_us < target_us {
            cursor.0 += 1;
        }

        let idx = cursor.0;
        let bracket = &self.states[idx];
        if idx == 0 || bracket.timestamp_us <= target_us {
            // Target outside history bounds: clamp to the nearest state
            return Some(bracket.data);
        }

        let prev = &self.states[idx - 1];
        let span_us = bracket.timestamp_us - prev.timestamp_us;
        if span_us == 0 {
            return Some(prev.data);
        }
        let t = (target_us - prev.timestamp_us) as f32 / span_us as f32;
        Some(ImuState::interpolate(&prev.data, &bracket.data, t))
    }

    /// Interpolate without a persistent cursor (sweep-start reference state).
    pub fn state_at(&self, target_us: u64) -> Option<ImuState> {
        let mut cursor = ImuCursor::new();
        self.interpolate_at(&mut cursor, target_us)
    }
}
