//! Closest-index search over monotonic sequences.
//!
//! The primary entry point is [`closest_index_unchecked`], a single forward
//! scan that stops as soon as the squared distance to the query starts to
//! grow. On a sorted sequence that point is the closest element, so the scan
//! touches only the prefix up to the answer instead of the whole slice.
//! [`closest_index`] layers an emptiness check on top, and
//! [`brute_force_closest_index`] keeps the exhaustive search around as a
//! reference.

mod reference;
mod scan;

pub use self::reference::brute_force_closest_index;
pub use self::scan::{ScanObserver, closest_index, closest_index_observed, closest_index_unchecked};

// ============================================================================
// Kani Formal Verification
// ============================================================================

#[cfg(kani)]
mod kani_proofs {
    use super::{brute_force_closest_index, closest_index};

    /// Verifies the scan always returns a position inside the slice.
    #[kani::proof]
    #[kani::unwind(5)]
    fn verify_closest_index_in_bounds_4() {
        let values: [f64; 4] = [kani::any(), kani::any(), kani::any(), kani::any()];
        let query: f64 = kani::any();

        match closest_index(&values, query) {
            Ok(index) => kani::assert(index < values.len(), "index out of bounds"),
            Err(_) => kani::assert(false, "non-empty input must not fail"),
        }
    }

    /// Verifies the scan agrees with the exhaustive search in distance on
    /// strictly ascending finite input.
    #[kani::proof]
    #[kani::unwind(4)]
    fn verify_closest_index_matches_reference_3() {
        let values: [f64; 3] = [kani::any(), kani::any(), kani::any()];
        let query: f64 = kani::any();

        for &v in &values {
            kani::assume(v.is_finite() && v.abs() < 1.0e6);
        }
        kani::assume(query.is_finite() && query.abs() < 1.0e6);
        kani::assume(values[0] < values[1] && values[1] < values[2]);

        let scanned = closest_index(&values, query);
        let reference = brute_force_closest_index(&values, query);
        if let (Ok(scanned), Some(reference)) = (scanned, reference) {
            let scanned_diff = values[scanned] - query;
            let reference_diff = values[reference] - query;
            let scanned_distance = scanned_diff * scanned_diff;
            let reference_distance = reference_diff * reference_diff;
            kani::assert(
                scanned_distance == reference_distance,
                "scan missed the closest element",
            );
            kani::assert(scanned >= reference, "ties must favour the later index");
        }
    }
}
