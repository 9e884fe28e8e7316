//! # Capacity Calculations
//!
//! Each calculation follows the pattern:
//!
//! - inputs are plain, JSON-serializable structs
//! - results are JSON-serializable and immutable once built
//! - `compute` / `sweep` are pure functions returning `CalcResult`
//!
//! ## Available Calculations
//!
//! - [`pile_capacity`] - Axial capacity of a single pile configuration
//! - [`sweep`] - Capacity over all widths × bearing depths × load directions

pub mod pile_capacity;
pub mod sweep;

// Re-export commonly used types
pub use pile_capacity::{
    compute, BearingCapacityFactor, BearingMode, EndBearing, PileCapacityResult,
};
pub use sweep::{sweep, SweepResults, SweepSettings};
