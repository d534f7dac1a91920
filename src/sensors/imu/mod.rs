//! Inertial sensor state processing.

mod history;

pub use history::{ImuCursor, ImuHistory, ImuHistoryConfig};
