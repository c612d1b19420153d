//! Early-exit scan shared by every closest-index entry point.

use crate::error::SearchError;

/// Receives every squared distance evaluated by a scan, in scan order.
///
/// Implementations must be cheap: the observer runs inside the search loop.
/// The fast path uses a zero-sized observer that compiles away entirely.
///
/// # Examples
/// ```
/// use binseek_core::{ScanObserver, closest_index_observed};
///
/// #[derive(Default)]
/// struct Count(usize);
///
/// impl ScanObserver for Count {
///     fn observe(&mut self, _position: usize, _squared_distance: f64) {
///         self.0 += 1;
///     }
/// }
///
/// let grid = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
/// let mut count = Count::default();
/// // SAFETY: `grid` is not empty.
/// let index = unsafe { closest_index_observed(&grid, 1.2, &mut count) };
/// assert_eq!(index, 1);
/// assert_eq!(count.0, 3);
/// ```
pub trait ScanObserver {
    /// Called once per evaluated element with its position and squared
    /// distance to the query.
    fn observe(&mut self, position: usize, squared_distance: f64);
}

/// Observer used by the fast path.
struct Silent;

impl ScanObserver for Silent {
    #[inline(always)]
    fn observe(&mut self, _position: usize, _squared_distance: f64) {}
}

#[inline(always)]
fn squared_distance(value: f64, element: f64) -> f64 {
    let diff = value - element;
    diff * diff
}

/// # Safety
///
/// `sequence` must not be empty.
#[inline(always)]
unsafe fn scan<O>(sequence: &[f64], element: f64, observer: &mut O) -> usize
where
    O: ScanObserver + ?Sized,
{
    // SAFETY: the caller guarantees at least one element.
    let first = unsafe { *sequence.get_unchecked(0) };
    let mut previous = squared_distance(first, element);
    observer.observe(0, previous);

    for (position, &value) in sequence.iter().enumerate().skip(1) {
        let distance = squared_distance(value, element);
        observer.observe(position, distance);
        // Strictly greater: plateaus keep scanning and favour the later index.
        if distance > previous {
            return position - 1;
        }
        previous = distance;
    }

    sequence.len() - 1
}

/// Returns the index of the element closest to `element`, stopping at the
/// first position where the squared distance increases.
///
/// This is the unchecked fast path. It never allocates, never copies the
/// input, and performs no validation. On a monotonic sequence (ascending or
/// descending) the result is the global closest element; when two
/// neighbouring elements are equally close the later one wins. On any other
/// input the result is the first local minimum reached from the left.
///
/// # Safety
///
/// `sequence` must contain at least one element. An empty slice is undefined
/// behaviour. Use [`closest_index`] when that cannot be guaranteed.
///
/// # Examples
/// ```
/// use binseek_core::closest_index_unchecked;
///
/// let grid = [0.0, 1.0, 2.0, 3.0, 4.0];
/// // SAFETY: `grid` is not empty.
/// let index = unsafe { closest_index_unchecked(&grid, 2.1) };
/// assert_eq!(index, 2);
/// ```
#[must_use]
#[inline]
pub unsafe fn closest_index_unchecked(sequence: &[f64], element: f64) -> usize {
    // SAFETY: forwarded from the caller.
    unsafe { scan(sequence, element, &mut Silent) }
}

/// Runs the same scan as [`closest_index_unchecked`], reporting every
/// evaluated distance to `observer`.
///
/// # Safety
///
/// `sequence` must contain at least one element.
#[inline]
pub unsafe fn closest_index_observed<O>(sequence: &[f64], element: f64, observer: &mut O) -> usize
where
    O: ScanObserver + ?Sized,
{
    // SAFETY: forwarded from the caller.
    unsafe { scan(sequence, element, observer) }
}

/// Checked counterpart of [`closest_index_unchecked`].
///
/// Only emptiness is checked; ordering is not. A non-monotonic sequence
/// yields the same first-local-minimum answer as the fast path.
///
/// # Errors
///
/// Returns [`SearchError::EmptySequence`] when `sequence` is empty.
///
/// # Examples
/// ```
/// use binseek_core::{SearchError, closest_index};
///
/// assert_eq!(closest_index(&[0.0, 1.0, 2.0, 3.0], -5.0), Ok(0));
/// assert_eq!(closest_index(&[0.0, 1.0, 2.0, 3.0], 99.0), Ok(3));
/// assert_eq!(closest_index(&[], 1.0), Err(SearchError::EmptySequence));
/// ```
#[inline]
pub fn closest_index(sequence: &[f64], element: f64) -> Result<usize, SearchError> {
    if sequence.is_empty() {
        return Err(SearchError::EmptySequence);
    }
    // SAFETY: emptiness was rejected above.
    Ok(unsafe { closest_index_unchecked(sequence, element) })
}
