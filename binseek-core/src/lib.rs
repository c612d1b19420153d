//! Binseek core library.
//!
//! Finds the element of a sorted `f64` slice closest to a query value with a
//! single forward scan that stops as soon as the distance starts to grow.
//!
//! # Entry points
//!
//! - [`closest_index_unchecked`]: the fast path. No validation, no
//!   allocation, undefined behaviour on an empty slice.
//! - [`closest_index`]: rejects empty slices, otherwise identical.
//! - [`SortedGrid`]: validates order and finiteness once, then searches
//!   through the fast path.
//!
//! Ties between neighbouring elements resolve to the later index. On input
//! that is not monotonic the free functions return the first local minimum
//! instead of failing.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod calibration;
mod cut;
mod error;
mod grid;
mod search;
#[cfg(test)]
mod test_utils;

pub use crate::{
    calibration::{GridExtent, LinearCalibration},
    cut::{CutPoint, DiagonalCut, Mask},
    error::{
        BinseekError, CalibrationError, CalibrationErrorCode, Coefficient, CutError,
        CutErrorCode, ErrorKind, GridError, GridErrorCode, Result, SearchError, SearchErrorCode,
    },
    grid::{Direction, SortedGrid},
    search::{
        ScanObserver, brute_force_closest_index, closest_index, closest_index_observed,
        closest_index_unchecked,
    },
};
