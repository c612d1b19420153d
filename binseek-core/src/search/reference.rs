//! Exhaustive arg-min search used as an oracle and benchmark baseline.

/// Evaluates the squared distance to every element and returns the position
/// of the smallest one.
///
/// Unlike the early-exit scan this works on unsorted input, but always
/// touches the whole slice. Ties resolve to the earliest position. Returns
/// `None` for an empty slice.
///
/// NaN distances never displace a comparable one, so a NaN element only
/// wins when every distance is NaN, in which case the first position is
/// returned.
///
/// # Examples
/// ```
/// use binseek_core::brute_force_closest_index;
///
/// assert_eq!(brute_force_closest_index(&[4.0, 0.0, 9.0], 1.0), Some(1));
/// assert_eq!(brute_force_closest_index(&[0.0, 2.0], 1.0), Some(0));
/// assert_eq!(brute_force_closest_index(&[f64::NAN, 5.0, 1.5], 1.0), Some(2));
/// assert_eq!(brute_force_closest_index(&[], 1.0), None);
/// ```
#[must_use]
pub fn brute_force_closest_index(sequence: &[f64], element: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (position, &value) in sequence.iter().enumerate() {
        let diff = value - element;
        let distance = diff * diff;
        let improves = match best {
            None => true,
            Some((_, best_distance)) if best_distance.is_nan() => !distance.is_nan(),
            Some((_, best_distance)) => distance < best_distance,
        };
        if improves {
            best = Some((position, distance));
        }
    }
    best.map(|(position, _)| position)
}

#[cfg(test)]
mod tests {
    use super::brute_force_closest_index;

    use rstest::rstest;

    #[rstest]
    #[case::leading_nan(&[f64::NAN, 0.0, 3.0, 9.0], 2.5, Some(2))]
    #[case::nan_after_minimum(&[0.0, 1.0, f64::NAN, 7.0], 0.9, Some(1))]
    #[case::nan_between(&[4.0, f64::NAN, 1.0, f64::NAN], 0.0, Some(2))]
    #[case::only_nan(&[f64::NAN, f64::NAN], 1.0, Some(0))]
    #[case::nan_query(&[1.0, 2.0], f64::NAN, Some(0))]
    fn nan_distances_never_displace_comparable_ones(
        #[case] sequence: &[f64],
        #[case] element: f64,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(brute_force_closest_index(sequence, element), expected);
    }
}
