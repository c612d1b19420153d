//! Unit tests for grid validation and lookups.

use binseek_test_support::tracing::RecordingLayer;
use rstest::rstest;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use crate::error::{GridError, GridErrorCode};

use super::{Direction, SortedGrid};

#[rstest]
#[case::ascending(&[0.0, 1.0, 2.0], Direction::Ascending)]
#[case::descending(&[2.0, 1.0, 0.0], Direction::Descending)]
#[case::single(&[5.0], Direction::Constant)]
#[case::constant(&[3.0, 3.0, 3.0], Direction::Constant)]
#[case::leading_plateau(&[1.0, 1.0, 0.5, 0.5, -2.0], Direction::Descending)]
#[case::signed_zeroes(&[-0.0, 0.0, 1.0], Direction::Ascending)]
fn accepts_monotonic_values(#[case] values: &[f64], #[case] expected: Direction) {
    let grid = SortedGrid::new(values).expect("values are monotonic");
    assert_eq!(grid.direction(), expected);
    assert_eq!(grid.len(), values.len());
}

#[rstest]
#[case::empty(&[], GridError::Empty)]
#[case::rises_then_falls(&[0.0, 1.0, 0.5], GridError::NotMonotonic { index: 2 })]
#[case::falls_after_plateau(&[2.0, 2.0, 3.0, 3.0, 1.0], GridError::NotMonotonic { index: 4 })]
#[case::infinite(&[0.0, f64::INFINITY], GridError::NonFinite { index: 1, value: f64::INFINITY })]
fn rejects_invalid_values(#[case] values: &[f64], #[case] expected: GridError) {
    let error = SortedGrid::new(values).expect_err("values must be rejected");
    assert_eq!(error, expected);
}

#[test]
fn rejects_nan_with_its_position() {
    let values = [1.0, 2.0, f64::NAN];
    let error = SortedGrid::new(&values).expect_err("NaN must be rejected");
    match error {
        GridError::NonFinite { index: 2, value } => assert!(value.is_nan()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
#[case::below(-3.0, 0)]
#[case::between(1.4, 1)]
#[case::midpoint_prefers_later(1.5, 2)]
#[case::above(40.0, 3)]
fn closest_index_resolves_queries(#[case] query: f64, #[case] expected: usize) {
    let values = [0.0, 1.0, 2.0, 3.0];
    let grid = SortedGrid::new(&values).expect("values are monotonic");
    assert_eq!(grid.closest_index(query), expected);
}

#[test]
fn accessors_report_bounds() {
    let values = [9.0, 6.0, 3.0];
    let grid = SortedGrid::try_from(&values[..]).expect("values are monotonic");
    assert_eq!(grid.start(), 9.0);
    assert_eq!(grid.end(), 3.0);
    assert_eq!(grid.as_slice(), &values);
    assert_eq!(grid.closest_value(4.0), 3.0);
}

#[test]
fn nan_query_resolves_to_last_index() {
    let values = [0.0, 1.0, 2.0];
    let grid = SortedGrid::new(&values).expect("values are monotonic");
    assert_eq!(grid.closest_index(f64::NAN), 2);
}

#[test]
fn construction_is_traced() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let values = [0.0, 2.0, 1.0];

    let result = tracing::subscriber::with_default(subscriber, || SortedGrid::new(&values));
    assert!(result.is_err());

    let spans = layer.spans();
    let span = spans
        .iter()
        .find(|span| span.name == "grid.new")
        .expect("grid.new span must exist");
    assert_eq!(span.fields.get("len"), Some(&"3".to_owned()));

    let events = layer.events();
    let rejection = events
        .iter()
        .find(|event| event.level == Level::DEBUG)
        .expect("rejection event must exist");
    assert_eq!(
        rejection.fields.get("code"),
        Some(&GridErrorCode::NotMonotonic.as_str().to_owned())
    );
}

#[test]
fn grids_are_shareable_across_threads() {
    fn assert_shareable<T: Send + Sync + Copy>() {}
    assert_shareable::<SortedGrid<'static>>();
}
