//! Benchmark parameter types.

use std::fmt;

/// Where in the grid a benchmark query lands.
///
/// The early-exit scan touches `index + 2` elements, so the position drives
/// its cost while the exhaustive search always touches every element.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryPosition {
    /// Just past the first element.
    Start,
    /// Halfway through the grid.
    Middle,
    /// Beyond the last element.
    End,
}

impl QueryPosition {
    /// Every position, in scan-cost order.
    pub const ALL: [Self; 3] = [Self::Start, Self::Middle, Self::End];

    /// Short label used in benchmark identifiers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

impl fmt::Display for QueryPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters for one closest-index benchmark run.
#[derive(Clone, Debug)]
pub struct LookupBenchParams {
    /// Number of grid values.
    pub len: usize,
    /// Where the query lands.
    pub position: QueryPosition,
}

impl fmt::Display for LookupBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},at={}", self.len, self.position)
    }
}
