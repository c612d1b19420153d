//! Error types for the binseek core library.
//!
//! Every checked layer around the search owns an error enum with a stable
//! machine-readable code. The unchecked fast path has no error type at all.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr, $kind:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }

            /// Return the broad [`ErrorKind`] this code belongs to.
            #[must_use]
            pub const fn kind(self) -> ErrorKind {
                match self {
                    $(Self::$CodeVariant => ErrorKind::$kind,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Broad classification shared by every error code.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The caller passed an argument that violates a documented precondition.
    InvalidArgument,
    /// The supplied values are unusable as a search grid.
    InvalidData,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => f.write_str("invalid argument"),
            Self::InvalidData => f.write_str("invalid data"),
        }
    }
}

/// Error returned by the checked closest-index entry point.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SearchError {
    /// The sequence had no elements to choose from.
    #[error("cannot search an empty sequence")]
    EmptySequence,
}

define_error_codes! {
    /// Stable codes describing [`SearchError`] variants.
    enum SearchErrorCode for SearchError {
        /// The sequence had no elements to choose from.
        EmptySequence => EmptySequence => "SEARCH_EMPTY_SEQUENCE", InvalidArgument,
    }
}

/// Error returned when a slice cannot be used as a [`crate::SortedGrid`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum GridError {
    /// The slice contained no values.
    #[error("grid must contain at least one value")]
    Empty,
    /// A value was NaN or infinite.
    #[error("grid value at index {index} is not finite: {value}")]
    NonFinite {
        /// Position of the offending value.
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// The values change direction.
    #[error("grid is not monotonic: value at index {index} reverses the order")]
    NotMonotonic {
        /// First position that breaks the established order.
        index: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GridError`] variants.
    enum GridErrorCode for GridError {
        /// The slice contained no values.
        Empty => Empty => "GRID_EMPTY", InvalidArgument,
        /// A value was NaN or infinite.
        NonFinite => NonFinite { .. } => "GRID_NON_FINITE", InvalidData,
        /// The values change direction.
        NotMonotonic => NotMonotonic { .. } => "GRID_NOT_MONOTONIC", InvalidData,
    }
}

/// Identifies which calibration input was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Coefficient {
    /// The constant term of the calibration.
    Offset,
    /// The per-bin step of the calibration.
    Slope,
    /// The value a covering grid must reach.
    Maximum,
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset => f.write_str("offset"),
            Self::Slope => f.write_str("slope"),
            Self::Maximum => f.write_str("maximum"),
        }
    }
}

/// Error returned while building calibration grids.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum CalibrationError {
    /// A coefficient or target value was NaN or infinite.
    #[error("calibration {which} must be finite (got {value})")]
    NonFiniteCoefficient {
        /// Which input was rejected.
        which: Coefficient,
        /// The rejected value.
        value: f64,
    },
    /// A zero slope would place every bin at the same value.
    #[error("calibration slope must be non-zero")]
    ZeroSlope,
    /// The requested maximum lies before the first bin.
    #[error("no bins are needed to reach {max}")]
    EmptyCoverage {
        /// Maximum requested by the caller.
        max: f64,
    },
    /// The bin count does not fit in memory addressing.
    #[error("calibration would need more bins than can be addressed")]
    TooManyBins,
}

define_error_codes! {
    /// Stable codes describing [`CalibrationError`] variants.
    enum CalibrationErrorCode for CalibrationError {
        /// A coefficient or target value was NaN or infinite.
        NonFiniteCoefficient => NonFiniteCoefficient { .. } => "CALIBRATION_NON_FINITE", InvalidArgument,
        /// A zero slope would place every bin at the same value.
        ZeroSlope => ZeroSlope => "CALIBRATION_ZERO_SLOPE", InvalidArgument,
        /// The requested maximum lies before the first bin.
        EmptyCoverage => EmptyCoverage { .. } => "CALIBRATION_EMPTY_COVERAGE", InvalidArgument,
        /// The bin count does not fit in memory addressing.
        TooManyBins => TooManyBins => "CALIBRATION_TOO_MANY_BINS", InvalidArgument,
    }
}

/// Error returned while building or applying a [`crate::DiagonalCut`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum CutError {
    /// Both cut points snapped to the same column, so the line is vertical.
    #[error("cut points share column {column}; the cut line would be vertical")]
    Degenerate {
        /// Column both points snapped to.
        column: usize,
    },
    /// The matrix does not have `rows * columns` cells.
    #[error("matrix has {actual} cells but the cut expects {expected}")]
    ShapeMismatch {
        /// Cell count implied by the grids.
        expected: usize,
        /// Cell count supplied by the caller.
        actual: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`CutError`] variants.
    enum CutErrorCode for CutError {
        /// Both cut points snapped to the same column.
        Degenerate => Degenerate { .. } => "CUT_DEGENERATE", InvalidArgument,
        /// The matrix does not have `rows * columns` cells.
        ShapeMismatch => ShapeMismatch { .. } => "CUT_SHAPE_MISMATCH", InvalidArgument,
    }
}

/// Umbrella error for callers that combine several binseek layers.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum BinseekError {
    /// Checked search failed.
    #[error(transparent)]
    Search(#[from] SearchError),
    /// Grid validation failed.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// Calibration grid generation failed.
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
    /// Diagonal cut construction or application failed.
    #[error(transparent)]
    Cut(#[from] CutError),
}

impl BinseekError {
    /// Return the stable code of the wrapped error as a string.
    #[must_use]
    pub const fn code_str(&self) -> &'static str {
        match self {
            Self::Search(error) => error.code().as_str(),
            Self::Grid(error) => error.code().as_str(),
            Self::Calibration(error) => error.code().as_str(),
            Self::Cut(error) => error.code().as_str(),
        }
    }

    /// Return the [`ErrorKind`] of the wrapped error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Search(error) => error.code().kind(),
            Self::Grid(error) => error.code().kind(),
            Self::Calibration(error) => error.code().kind(),
            Self::Cut(error) => error.code().kind(),
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, BinseekError>;
