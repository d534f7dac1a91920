//! Foundation layer: math primitives and core types.

pub mod math;
pub mod types;
