//! Core data types for sweep registration.

mod imu;
mod point;
mod sweep;
mod timestamped;

pub use imu::{ImuSample, ImuState};
pub use point::{Point3D, ScanPoint};
pub use sweep::{ScanIndexTable, SweepMetadata};
pub use timestamped::{offset_us, Timestamped};
