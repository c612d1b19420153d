//! End-to-end checks chaining calibration, grid lookup and diagonal cuts.

use std::num::NonZeroUsize;

use binseek_core::{
    BinseekError, CutPoint, DiagonalCut, GridExtent, LinearCalibration, Result, SortedGrid,
};
use rstest::{fixture, rstest};

struct Axes {
    ex: Vec<f64>,
    eg: Vec<f64>,
}

#[fixture]
fn axes() -> Axes {
    let ex = LinearCalibration::new(0.0, 200.0)
        .and_then(|calibration| calibration.grid(GridExtent::Covering(1_000.0)))
        .expect("excitation grid must build");
    let bins = NonZeroUsize::new(6).expect("non-zero");
    let eg = LinearCalibration::new(100.0, 200.0)
        .and_then(|calibration| calibration.grid(GridExtent::Bins(bins)))
        .expect("gamma grid must build");
    Axes { ex, eg }
}

fn cut_matrix(axes: &Axes, matrix: &mut [f64]) -> Result<DiagonalCut> {
    let ex = SortedGrid::new(&axes.ex)?;
    let eg = SortedGrid::new(&axes.eg)?;
    let cut = DiagonalCut::new(
        &ex,
        &eg,
        CutPoint::new(0.0, 100.0),
        CutPoint::new(1_000.0, 1_100.0),
    )?;
    cut.apply(matrix)?;
    Ok(cut)
}

#[rstest]
fn calibrated_axes_feed_the_cut(axes: Axes) {
    assert_eq!(axes.ex, vec![0.0, 200.0, 400.0, 600.0, 800.0, 1_000.0]);
    assert_eq!(axes.eg.len(), 6);

    let mut matrix = vec![1.0; 36];
    let cut = cut_matrix(&axes, &mut matrix).expect("cut must apply");

    assert_eq!(cut.slope(), 1.0);
    assert_eq!(cut.intercept(), 0.0);
    let kept = matrix.iter().filter(|&&cell| cell > 0.0).count();
    assert_eq!(kept, cut.mask().kept());
    assert_eq!(kept, 15);
}

#[rstest]
fn shape_errors_surface_through_the_umbrella(axes: Axes) {
    let mut matrix = vec![1.0; 35];
    let error = cut_matrix(&axes, &mut matrix).expect_err("shape must mismatch");
    assert!(matches!(error, BinseekError::Cut(_)));
    assert_eq!(error.code_str(), "CUT_SHAPE_MISMATCH");
}

#[test]
fn unsorted_axis_is_rejected_before_cutting() {
    let axes = Axes {
        ex: vec![0.0, 2.0, 1.0],
        eg: vec![0.0, 1.0, 2.0],
    };
    let mut matrix = vec![0.0; 9];
    let error = cut_matrix(&axes, &mut matrix).expect_err("axis must be rejected");
    assert_eq!(error.code_str(), "GRID_NOT_MONOTONIC");
}
