//! Benchmark support crate for binseek.
//!
//! Provides seeded synthetic grids and parameter types used by the Criterion
//! benchmarks that compare the closest-index entry points against an
//! exhaustive search.

pub mod error;
pub mod params;
pub mod synthetic;
