//! Benchmark setup error type.
//!
//! Lets setup code propagate failures with `?` and report them once from the
//! Criterion entry point.

use binseek_core::{GridError, SearchError};

use crate::synthetic::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic grid generation failed.
    #[error("synthetic grid generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The generated values were rejected as a sorted grid.
    #[error("grid validation failed: {0}")]
    Grid(#[from] GridError),
    /// The checked search rejected its input.
    #[error("search failed: {0}")]
    Search(#[from] SearchError),
    /// The fast path and the exhaustive search disagreed on a sanity query.
    #[error("scan returned index {scanned} but exhaustive search returned {expected:?}")]
    Disagreement {
        /// Index returned by the early-exit scan.
        scanned: usize,
        /// Index returned by the exhaustive search.
        expected: Option<usize>,
    },
}
