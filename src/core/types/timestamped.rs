//! Generic timestamp wrapper.

use serde::{Deserialize, Serialize};

/// Generic timestamp wrapper for any data type.
///
/// Timestamps are in microseconds since epoch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Timestamped<T> {
    /// The wrapped data
    pub data: T,
    /// Timestamp in microseconds since epoch
    pub timestamp_us: u64,
}

impl<T> Timestamped<T> {
    /// Create a new timestamped value.
    #[inline]
    pub fn new(data: T, timestamp_us: u64) -> Self {
        Self { data, timestamp_us }
    }

    /// Map the inner data while preserving timestamp.
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Timestamped<U> {
        Timestamped {
            data: f(self.data),
            timestamp_us: self.timestamp_us,
        }
    }

    /// Signed offset from another timestamp, in seconds.
    #[inline]
    pub fn seconds_since(&self, earlier_us: u64) -> f32 {
        (self.timestamp_us as i64 - earlier_us as i64) as f32 * 1e-6
    }
}

/// Convert a second offset to microseconds (saturating at zero).
#[inline]
pub fn offset_us(base_us: u64, offset_secs: f32) -> u64 {
    let shifted = base_us as i64 + (offset_secs * 1e6) as i64;
    shifted.max(0) as u64
}
