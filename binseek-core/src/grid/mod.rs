//! Validated monotonic grids.
//!
//! [`SortedGrid`] checks the search precondition once, at construction, and
//! then answers lookups through the unchecked scan. This is the entry point
//! for callers that want non-monotonic input rejected rather than silently
//! resolved to a local minimum.

use core::ops::Deref;
use std::cmp::Ordering;

use tracing::{debug, instrument};

use crate::error::GridError;
use crate::search::closest_index_unchecked;

#[cfg(test)]
mod tests;

/// Order of the values held by a [`SortedGrid`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Values never decrease and at least one pair increases.
    Ascending,
    /// Values never increase and at least one pair decreases.
    Descending,
    /// Every value is equal.
    Constant,
}

/// Borrowed view over a non-empty, finite, monotonic slice.
///
/// # Examples
/// ```
/// use binseek_core::{Direction, SortedGrid};
///
/// let energies = [100.0, 110.0, 120.0, 130.0];
/// let grid = SortedGrid::new(&energies).expect("grid is sorted");
/// assert_eq!(grid.direction(), Direction::Ascending);
/// assert_eq!(grid.closest_index(113.0), 1);
/// assert_eq!(grid.closest_value(126.0), 130.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SortedGrid<'a> {
    values: &'a [f64],
    direction: Direction,
}

impl<'a> SortedGrid<'a> {
    /// Validates `values` and wraps them.
    ///
    /// Plateaus of equal values are allowed in any direction.
    ///
    /// # Errors
    ///
    /// - [`GridError::Empty`] when `values` is empty.
    /// - [`GridError::NonFinite`] when a value is NaN or infinite.
    /// - [`GridError::NotMonotonic`] when the values change direction.
    #[instrument(name = "grid.new", level = "debug", skip(values), fields(len = values.len()))]
    pub fn new(values: &'a [f64]) -> Result<Self, GridError> {
        match validate(values) {
            Ok(direction) => Ok(Self { values, direction }),
            Err(error) => {
                debug!(code = %error.code(), %error, "rejected grid");
                Err(error)
            }
        }
    }

    /// Returns the order of the grid values.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the first grid value.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.values[0]
    }

    /// Returns the last grid value.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Returns the underlying slice.
    #[must_use]
    pub fn as_slice(&self) -> &'a [f64] {
        self.values
    }

    /// Returns the index of the grid value closest to `query`.
    ///
    /// When `query` lies exactly between two neighbouring values the later
    /// index is returned. A NaN query resolves to the last index.
    #[must_use]
    #[inline]
    pub fn closest_index(&self, query: f64) -> usize {
        // SAFETY: construction rejects empty slices.
        unsafe { closest_index_unchecked(self.values, query) }
    }

    /// Returns the grid value closest to `query`.
    #[must_use]
    pub fn closest_value(&self, query: f64) -> f64 {
        self.values[self.closest_index(query)]
    }

    /// Resolves every query to its closest index.
    ///
    /// # Examples
    /// ```
    /// use binseek_core::SortedGrid;
    ///
    /// let values = [3.0, 2.0, 1.0, 0.0];
    /// let grid = SortedGrid::new(&values).expect("grid is sorted");
    /// assert_eq!(grid.closest_indices(&[2.9, 0.1, -4.0]), vec![0, 3, 3]);
    /// ```
    #[must_use]
    pub fn closest_indices(&self, queries: &[f64]) -> Vec<usize> {
        queries
            .iter()
            .map(|&query| self.closest_index(query))
            .collect()
    }
}

impl AsRef<[f64]> for SortedGrid<'_> {
    fn as_ref(&self) -> &[f64] {
        self.values
    }
}

impl Deref for SortedGrid<'_> {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        self.values
    }
}

impl<'a> TryFrom<&'a [f64]> for SortedGrid<'a> {
    type Error = GridError;

    fn try_from(values: &'a [f64]) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

fn validate(values: &[f64]) -> Result<Direction, GridError> {
    let Some(&first) = values.first() else {
        return Err(GridError::Empty);
    };
    ensure_finite(0, first)?;

    let mut direction = Direction::Constant;
    let mut previous = first;
    for (index, &value) in values.iter().enumerate().skip(1) {
        ensure_finite(index, value)?;
        let step = match value.partial_cmp(&previous) {
            Some(Ordering::Greater) => Direction::Ascending,
            Some(Ordering::Less) => Direction::Descending,
            Some(Ordering::Equal) | None => Direction::Constant,
        };
        match (direction, step) {
            (_, Direction::Constant) => {}
            (Direction::Constant, established) => direction = established,
            (established, observed) if established != observed => {
                return Err(GridError::NotMonotonic { index });
            }
            _ => {}
        }
        previous = value;
    }
    Ok(direction)
}

fn ensure_finite(index: usize, value: f64) -> Result<(), GridError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GridError::NonFinite { index, value })
    }
}
