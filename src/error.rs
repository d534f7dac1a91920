//! Error types for sweep registration.

use thiserror::Error;

/// Sweep registration error type.
///
/// Per-point anomalies (non-finite coordinates, near-zero returns,
/// out-of-range ring ids) are expected sensor noise and are filtered
/// silently rather than surfaced here.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// The sweep does not contain enough points to estimate its azimuth
    /// range. A sweep needs at least two points (first and last).
    #[error("sweep has too few points: {0}")]
    TooFewPoints(usize),
}

pub type Result<T> = std::result::Result<T, RegistrationError>;
