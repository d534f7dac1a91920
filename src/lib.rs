//! ChakraRegistration - Motion-compensated sweep registration for rotating
//! multi-beam LiDAR.
//!
//! A spinning LiDAR samples 360° over roughly 100 ms, so the sensor pose
//! changes while a single sweep is acquired. This crate projects every point
//! of a sweep into one consistent reference frame (the pose at sweep start)
//! using interpolated inertial data, classifies each point into its physical
//! scan ring, derives its time offset within the sweep from its horizontal
//! angle, and assembles the result into a ring-ordered cloud with a per-ring
//! index table for downstream feature extraction.
//!
//! # Architecture
//!
//! The crate is organized into 3 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 registration/                       │  ← Per-sweep pipeline
//! │   (azimuth, rings, timing, compensation, assembly)  │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                   sensors/                          │  ← Sensor processing
//! │          (IMU history, integration, cursor)         │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │                 (types, math)                       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Processing model
//!
//! One sweep is fully ingested, classified, compensated, and assembled
//! before the next is accepted. All sweep-scoped state (ring buffers, index
//! table, azimuth metadata) is exclusively owned by the in-flight sweep and
//! reset before the next begins. The IMU history is shared across sweeps
//! and only ever read here.
//!
//! Per-point anomalies — non-finite coordinates, near-zero returns,
//! out-of-FOV ring ids — are expected sensor noise and filtered silently.
//! An empty IMU history degrades gracefully to no motion compensation.

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;

// ============================================================================
// Layer 2: Sensor processing (depends on core)
// ============================================================================
pub mod sensors;

// ============================================================================
// Layer 3: Registration pipeline (depends on core, sensors)
// ============================================================================
pub mod registration;

pub mod error;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

// Core types
pub use crate::core::math;
pub use crate::core::types::{ImuSample, ImuState, Point3D, ScanPoint, Timestamped};
pub use crate::core::types::{ScanIndexTable, SweepMetadata};

// Sensors - IMU
pub use sensors::imu::{ImuCursor, ImuHistory, ImuHistoryConfig};

// Registration
pub use registration::{
    AzimuthRange, InterleavedRingTable, MotionCompensator, RegisteredSweep, RegistrationConfig,
    ScanAssembler, SweepMotion, SweepRegistration, SweepTimer, VerticalAngleToRing,
};

pub use error::{RegistrationError, Result};
