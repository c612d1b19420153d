//! Seeded synthetic grids.
//!
//! Values start at zero and grow by random steps drawn from `[0.5, 1.5)`, so
//! the grid is strictly monotonic and unevenly spaced. Descending grids are
//! the same values reversed.

use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::params::QueryPosition;

/// Errors that may occur during synthetic grid generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested length was zero.
    #[error("grid length must be greater than zero")]
    ZeroLength,
}

/// Order of a generated grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GridOrder {
    /// Increasing values.
    Ascending,
    /// Decreasing values.
    Descending,
}

/// Configuration for synthetic grid generation.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of values to generate.
    pub len: usize,
    /// Order of the generated values.
    pub order: GridOrder,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A strictly monotonic grid generated from a seeded RNG.
///
/// # Examples
///
/// ```
/// use binseek_benches::params::QueryPosition;
/// use binseek_benches::synthetic::{GridOrder, SyntheticConfig, SyntheticGrid};
///
/// let config = SyntheticConfig { len: 8, order: GridOrder::Ascending, seed: 42 };
/// let grid = SyntheticGrid::generate(&config).expect("valid config");
/// assert_eq!(grid.values().len(), 8);
/// assert!(grid.values().windows(2).all(|pair| pair[0] < pair[1]));
/// assert!(grid.query(QueryPosition::End) > grid.values()[7]);
/// ```
#[derive(Clone, Debug)]
pub struct SyntheticGrid {
    values: Vec<f64>,
}

impl SyntheticGrid {
    /// Generates values eagerly from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::ZeroLength`] if `config.len` is zero.
    pub fn generate(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        if config.len == 0 {
            return Err(SyntheticError::ZeroLength);
        }

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut current = 0.0_f64;
        let mut values = Vec::with_capacity(config.len);
        values.push(current);
        for _ in 1..config.len {
            current += rng.gen_range(0.5_f64..1.5_f64);
            values.push(current);
        }
        if config.order == GridOrder::Descending {
            values.reverse();
        }
        Ok(Self { values })
    }

    /// Returns the generated values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns a query whose closest element sits at `position`.
    ///
    /// Queries sit 0.1 past the target, well inside the smallest step of 0.5,
    /// so they never tie between neighbours.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        clippy::integer_division,
        reason = "generation rejects empty grids and the midpoint may round down"
    )]
    pub fn query(&self, position: QueryPosition) -> f64 {
        let last = self.values.len() - 1;
        let index = match position {
            QueryPosition::Start => last.min(1),
            QueryPosition::Middle => last / 2,
            QueryPosition::End => last,
        };
        let value = self.values[index];
        match position {
            QueryPosition::End => value + self.direction_sign() * 10.0,
            QueryPosition::Start | QueryPosition::Middle => value + 0.1,
        }
    }

    fn direction_sign(&self) -> f64 {
        match (self.values.first(), self.values.last()) {
            (Some(first), Some(last)) if last < first => -1.0,
            _ => 1.0,
        }
    }
}
