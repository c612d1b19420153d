//! Row-major boolean mask produced by a diagonal cut.

/// Row-major grid of keep/remove flags.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mask {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl Mask {
    pub(super) fn new(rows: usize, columns: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows * columns);
        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Returns the flag at (`row`, `column`), or `None` outside the mask.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<bool> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column).copied()
    }

    /// Number of kept cells.
    #[must_use]
    pub fn kept(&self) -> usize {
        self.cells.iter().filter(|&&keep| keep).count()
    }

    /// Iterates over the rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.columns)
    }

    /// Returns the flags in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }
}
