//! Sensor-state processing layer (depends on core).

pub mod imu;
