//! Shared test utilities for `binseek-core`.

use binseek_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use test_strategy::Arbitrary;

use crate::search::ScanObserver;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `BINSEEK_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// [`ScanObserver`] that counts distance evaluations.
#[derive(Debug, Default)]
pub(crate) struct CountingObserver {
    evaluations: usize,
    positions: Vec<usize>,
}

impl CountingObserver {
    /// Number of squared distances the scan evaluated.
    #[must_use]
    pub(crate) fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Positions in the order they were evaluated.
    #[must_use]
    pub(crate) fn positions(&self) -> &[usize] {
        &self.positions
    }
}

impl ScanObserver for CountingObserver {
    fn observe(&mut self, position: usize, _squared_distance: f64) {
        self.evaluations += 1;
        self.positions.push(position);
    }
}

/// Sort order of a generated fixture.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(crate) enum FixtureOrder {
    #[weight(1)]
    Ascending,
    #[weight(1)]
    Descending,
}

/// Strictly monotonic sequence paired with a query value.
#[derive(Clone, Debug)]
pub(crate) struct MonotonicFixture {
    pub(crate) values: Vec<f64>,
    pub(crate) query: f64,
}

/// Generates strictly monotonic sequences in either direction.
///
/// Consecutive values differ by at least `0.5`, so rounding never merges
/// neighbouring elements.
pub(crate) fn monotonic_fixture_strategy() -> impl Strategy<Value = MonotonicFixture> {
    (
        any::<FixtureOrder>(),
        -1_000.0_f64..1_000.0,
        prop::collection::vec(0.5_f64..25.0, 0..96),
        -2_000.0_f64..4_000.0,
    )
        .prop_map(|(order, start, steps, query)| {
            let mut values = Vec::with_capacity(steps.len() + 1);
            let mut current = start;
            values.push(current);
            for step in steps {
                current += step;
                values.push(current);
            }
            if order == FixtureOrder::Descending {
                values.reverse();
            }
            MonotonicFixture { values, query }
        })
}
