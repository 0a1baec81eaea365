pub mod geo_enums;
pub mod geo_traits;
pub mod overlap;
pub mod primitives;

/// Absolute tolerance used by every geometric predicate in the crate.
pub const TOLERANCE: f64 = 1e-6;

/// Relative threshold (sine of the enclosed angle) below which two vectors are considered parallel.
pub const PARALLEL_EPS: f64 = 1e-9;
