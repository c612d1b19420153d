//! Linear calibration grids.
//!
//! Detector channels are commonly calibrated linearly, `value = offset +
//! slope * bin`, and histograms store the calibrated value at the middle of
//! each bin. [`LinearCalibration`] produces those mid-bin arrays, which are
//! monotonic by construction and therefore ready for [`crate::SortedGrid`].

use std::num::NonZeroUsize;

use tracing::{debug, instrument};

use crate::error::{CalibrationError, Coefficient};

/// Largest step count whose `f64` representation is exact.
const MAX_EXACT_STEPS: f64 = 9_007_199_254_740_992.0;

/// How many bins a calibration grid spans.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use binseek_core::GridExtent;
///
/// let bins = NonZeroUsize::new(16).expect("non-zero");
/// let extent = GridExtent::Bins(bins);
/// assert!(matches!(extent, GridExtent::Bins(n) if n.get() == 16));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridExtent {
    /// An explicit number of bins.
    Bins(NonZeroUsize),
    /// As many bins as needed for the last mid-bin value to be the one
    /// nearest the given maximum, so the last bin covers it.
    Covering(f64),
}

/// Linear calibration `value = offset + slope * bin`.
///
/// # Examples
/// ```
/// use binseek_core::{GridExtent, LinearCalibration, SortedGrid};
///
/// let calibration = LinearCalibration::new(10.0, 20.0).expect("finite, non-zero slope");
/// let values = calibration
///     .grid(GridExtent::Covering(95.0))
///     .expect("maximum lies past the first bin");
/// assert_eq!(values, vec![10.0, 30.0, 50.0, 70.0, 90.0]);
///
/// let grid = SortedGrid::new(&values).expect("calibration grids are sorted");
/// assert_eq!(grid.closest_index(62.0), 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearCalibration {
    offset: f64,
    slope: f64,
}

impl LinearCalibration {
    /// Validates the coefficients.
    ///
    /// A negative slope is allowed and produces a descending grid.
    ///
    /// # Errors
    ///
    /// - [`CalibrationError::NonFiniteCoefficient`] when either coefficient is
    ///   NaN or infinite.
    /// - [`CalibrationError::ZeroSlope`] when `slope` is zero.
    pub fn new(offset: f64, slope: f64) -> Result<Self, CalibrationError> {
        ensure_finite(Coefficient::Offset, offset)?;
        ensure_finite(Coefficient::Slope, slope)?;
        if slope == 0.0 {
            return Err(CalibrationError::ZeroSlope);
        }
        Ok(Self { offset, slope })
    }

    /// Returns the calibrated value of bin `0`.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Returns the distance between neighbouring bins.
    #[must_use]
    pub const fn slope(&self) -> f64 {
        self.slope
    }

    /// Returns the calibrated value of `bin` without building a grid.
    #[must_use]
    pub fn value_at(&self, bin: usize) -> f64 {
        self.offset + self.slope * bin as f64
    }

    /// Resolves `extent` to a bin count.
    ///
    /// For [`GridExtent::Covering`] the count is `round((max - offset) /
    /// slope) + 1`, rounding half to even.
    ///
    /// # Errors
    ///
    /// - [`CalibrationError::NonFiniteCoefficient`] when the maximum is not
    ///   finite.
    /// - [`CalibrationError::EmptyCoverage`] when the maximum lies before the
    ///   first bin.
    /// - [`CalibrationError::TooManyBins`] when the count cannot be addressed.
    pub fn bin_count(&self, extent: GridExtent) -> Result<NonZeroUsize, CalibrationError> {
        let max = match extent {
            GridExtent::Bins(bins) => return Ok(bins),
            GridExtent::Covering(max) => max,
        };
        ensure_finite(Coefficient::Maximum, max)?;

        let steps = ((max - self.offset) / self.slope).round_ties_even();
        if steps < 0.0 {
            return Err(CalibrationError::EmptyCoverage { max });
        }
        if !steps.is_finite() || steps >= MAX_EXACT_STEPS {
            return Err(CalibrationError::TooManyBins);
        }

        usize::try_from(steps as u64)
            .ok()
            .and_then(|steps| steps.checked_add(1))
            .and_then(NonZeroUsize::new)
            .ok_or(CalibrationError::TooManyBins)
    }

    /// Builds the mid-bin values for `extent`.
    ///
    /// # Errors
    ///
    /// Propagates the failures documented on [`Self::bin_count`], and returns
    /// [`CalibrationError::TooManyBins`] when the values cannot be allocated.
    #[instrument(
        name = "calibration.grid",
        level = "debug",
        err,
        skip(self),
        fields(offset = self.offset, slope = self.slope),
    )]
    pub fn grid(&self, extent: GridExtent) -> Result<Vec<f64>, CalibrationError> {
        let bins = self.bin_count(extent)?;
        let mut values = Vec::new();
        values
            .try_reserve_exact(bins.get())
            .map_err(|_| CalibrationError::TooManyBins)?;
        values.extend((0..bins.get()).map(|bin| self.value_at(bin)));
        debug!(bins = bins.get(), "generated calibration grid");
        Ok(values)
    }
}

fn ensure_finite(which: Coefficient, value: f64) -> Result<(), CalibrationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalibrationError::NonFiniteCoefficient { which, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn bins(count: usize) -> GridExtent {
        GridExtent::Bins(NonZeroUsize::new(count).expect("count must be non-zero"))
    }

    #[rstest]
    #[case::single(bins(1), vec![5.0])]
    #[case::several(bins(4), vec![5.0, 7.5, 10.0, 12.5])]
    #[case::covering_exact(GridExtent::Covering(12.5), vec![5.0, 7.5, 10.0, 12.5])]
    #[case::covering_rounds_down(GridExtent::Covering(13.6), vec![5.0, 7.5, 10.0, 12.5])]
    #[case::covering_rounds_up(GridExtent::Covering(13.8), vec![5.0, 7.5, 10.0, 12.5, 15.0])]
    #[case::covering_first_bin(GridExtent::Covering(5.0), vec![5.0])]
    fn grid_produces_mid_bin_values(#[case] extent: GridExtent, #[case] expected: Vec<f64>) {
        let calibration = LinearCalibration::new(5.0, 2.5).expect("valid calibration");
        let values = calibration.grid(extent).expect("grid must build");
        assert_eq!(values, expected);
    }

    #[test]
    fn halfway_steps_round_to_even() {
        let calibration = LinearCalibration::new(0.0, 1.0).expect("valid calibration");
        let three = calibration
            .bin_count(GridExtent::Covering(2.5))
            .expect("count must resolve");
        let five = calibration
            .bin_count(GridExtent::Covering(3.5))
            .expect("count must resolve");
        assert_eq!(three.get(), 3);
        assert_eq!(five.get(), 5);
    }

    #[test]
    fn negative_slope_builds_descending_grid() {
        let calibration = LinearCalibration::new(10.0, -2.0).expect("valid calibration");
        let values = calibration
            .grid(GridExtent::Covering(4.0))
            .expect("grid must build");
        assert_eq!(values, vec![10.0, 8.0, 6.0, 4.0]);
    }

    #[rstest]
    #[case::nan_offset(f64::NAN, 1.0, Coefficient::Offset)]
    #[case::infinite_slope(0.0, f64::INFINITY, Coefficient::Slope)]
    fn new_rejects_non_finite_coefficients(
        #[case] offset: f64,
        #[case] slope: f64,
        #[case] expected: Coefficient,
    ) {
        let error = LinearCalibration::new(offset, slope).expect_err("must reject");
        assert!(matches!(
            error,
            CalibrationError::NonFiniteCoefficient { which, .. } if which == expected
        ));
    }

    #[test]
    fn new_rejects_zero_slope() {
        let error = LinearCalibration::new(1.0, 0.0).expect_err("must reject");
        assert_eq!(error, CalibrationError::ZeroSlope);
    }

    #[rstest]
    #[case::before_first_bin(GridExtent::Covering(3.0), CalibrationError::EmptyCoverage { max: 3.0 })]
    #[case::unbounded(GridExtent::Covering(1.0e300), CalibrationError::TooManyBins)]
    fn bin_count_rejects_unusable_maxima(
        #[case] extent: GridExtent,
        #[case] expected: CalibrationError,
    ) {
        let calibration = LinearCalibration::new(5.0, 2.5).expect("valid calibration");
        assert_eq!(calibration.bin_count(extent), Err(expected));
    }

    #[rstest]
    #[case::unaddressable_bins(bins(usize::MAX))]
    #[case::unallocatable_coverage(GridExtent::Covering(1.0e15))]
    fn grid_reports_oversized_extents(#[case] extent: GridExtent) {
        let calibration = LinearCalibration::new(0.0, 1.0).expect("valid calibration");
        assert_eq!(calibration.grid(extent), Err(CalibrationError::TooManyBins));
    }

    #[test]
    fn bin_count_rejects_non_finite_maximum() {
        let calibration = LinearCalibration::new(5.0, 2.5).expect("valid calibration");
        let error = calibration
            .bin_count(GridExtent::Covering(f64::NEG_INFINITY))
            .expect_err("must reject");
        assert!(matches!(
            error,
            CalibrationError::NonFiniteCoefficient {
                which: Coefficient::Maximum,
                ..
            }
        ));
    }

    #[test]
    fn value_at_matches_grid() {
        let calibration = LinearCalibration::new(-1.0, 0.25).expect("valid calibration");
        let values = calibration.grid(bins(9)).expect("grid must build");
        for (bin, value) in values.iter().enumerate() {
            assert_eq!(calibration.value_at(bin), *value);
        }
    }
}
