//! Diagonal cuts over two-dimensional histograms.
//!
//! A matrix whose rows follow an excitation-energy grid and whose columns
//! follow a gamma-energy grid usually carries noise above the `Eg = Ex`
//! diagonal. A [`DiagonalCut`] snaps two energy pairs onto the grids with the
//! closest-index search, draws the line through them in index space, and
//! keeps only the cells strictly below that line.

mod mask;

pub use self::mask::Mask;

use tracing::{Span, debug, field, instrument};

use crate::error::CutError;
use crate::grid::SortedGrid;

/// An `(Ex, Eg)` energy pair the cut line passes through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CutPoint {
    /// Excitation energy, resolved against the row grid.
    pub ex: f64,
    /// Gamma energy, resolved against the column grid.
    pub eg: f64,
}

impl CutPoint {
    /// Creates a point from its excitation and gamma energies.
    #[must_use]
    pub const fn new(ex: f64, eg: f64) -> Self {
        Self { ex, eg }
    }
}

/// Line in index space separating kept cells from removed ones.
///
/// # Examples
/// ```
/// use binseek_core::{CutPoint, DiagonalCut, SortedGrid};
///
/// let axis = [0.0, 1.0, 2.0, 3.0];
/// let ex = SortedGrid::new(&axis).expect("sorted");
/// let eg = SortedGrid::new(&axis).expect("sorted");
/// let cut = DiagonalCut::new(&ex, &eg, CutPoint::new(0.0, 0.0), CutPoint::new(3.0, 3.0))
///     .expect("points span distinct columns");
///
/// assert!(cut.keeps(2, 1));
/// assert!(!cut.keeps(1, 1));
/// assert!(!cut.keeps(0, 3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiagonalCut {
    rows: usize,
    columns: usize,
    slope: f64,
    intercept: f64,
}

impl DiagonalCut {
    /// Snaps both points onto the grids and builds the cut line.
    ///
    /// # Errors
    ///
    /// Returns [`CutError::Degenerate`] when both gamma energies resolve to
    /// the same column.
    #[instrument(
        name = "cut.new",
        level = "debug",
        err,
        skip(ex_grid, eg_grid),
        fields(rows = ex_grid.len(), columns = eg_grid.len(), slope = field::Empty),
    )]
    pub fn new(
        ex_grid: &SortedGrid<'_>,
        eg_grid: &SortedGrid<'_>,
        first: CutPoint,
        second: CutPoint,
    ) -> Result<Self, CutError> {
        let x1 = eg_grid.closest_index(first.eg);
        let y1 = ex_grid.closest_index(first.ex);
        let x2 = eg_grid.closest_index(second.eg);
        let y2 = ex_grid.closest_index(second.ex);
        if x1 == x2 {
            return Err(CutError::Degenerate { column: x1 });
        }

        let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);
        let slope = (y2 - y1) / (x2 - x1);
        let intercept = y1 - slope * x1;
        Span::current().record("slope", slope);
        debug!(intercept, "resolved cut line");

        Ok(Self {
            rows: ex_grid.len(),
            columns: eg_grid.len(),
            slope,
            intercept,
        })
    }

    /// Number of rows, one per excitation-energy bin.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, one per gamma-energy bin.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Slope of the cut line in rows per column.
    #[must_use]
    pub const fn slope(&self) -> f64 {
        self.slope
    }

    /// Row coordinate of the cut line at column `0`.
    #[must_use]
    pub const fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Returns whether the cell at (`row`, `column`) lies strictly below the
    /// line and is therefore kept.
    #[must_use]
    pub fn keeps(&self, row: usize, column: usize) -> bool {
        row as f64 > self.slope * column as f64 + self.intercept
    }

    /// Materialises the cut as a row-major [`Mask`].
    #[must_use]
    pub fn mask(&self) -> Mask {
        let cells = (0..self.rows)
            .flat_map(|row| (0..self.columns).map(move |column| (row, column)))
            .map(|(row, column)| self.keeps(row, column))
            .collect();
        Mask::new(self.rows, self.columns, cells)
    }

    /// Zeroes every cell of a row-major matrix that the cut removes.
    ///
    /// # Errors
    ///
    /// Returns [`CutError::ShapeMismatch`] when `values` does not hold
    /// `rows * columns` cells.
    pub fn apply(&self, values: &mut [f64]) -> Result<(), CutError> {
        let expected = self.rows.saturating_mul(self.columns);
        if values.len() != expected {
            return Err(CutError::ShapeMismatch {
                expected,
                actual: values.len(),
            });
        }

        for (row, cells) in values.chunks_exact_mut(self.columns).enumerate() {
            for (column, cell) in cells.iter_mut().enumerate() {
                if !self.keeps(row, column) {
                    *cell = 0.0;
                }
            }
        }
        Ok(())
    }
}
