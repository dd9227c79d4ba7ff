//! Error types surfaced by the checked gridding entry points.

use thiserror::Error;

/// Result alias for checked gridding operations.
pub type GriddingResult<T> = Result<T, GriddingError>;

/// Input validation failures detected before the convolution kernel runs.
///
/// The inner kernel itself never fails; every variant here is raised by a
/// validating constructor or by [`crate::engines::gridding::Type2Gridder`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GriddingError {
    /// Scalar parameters outside their admissible domain.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A flat input array does not have the length implied by the parameters.
    #[error("dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A grid was built for other extents than the gridder's parameters.
    #[error("grid extents {actual:?} differ from parameter extents {expected:?}")]
    ExtentMismatch {
        expected: [usize; 3],
        actual: [usize; 3],
    },

    /// A knot coordinate is non-finite or outside `[0, 2π)`.
    #[error("knot {index} has axis-{axis} coordinate {value} outside [0, 2π)")]
    KnotOutOfDomain { index: usize, axis: usize, value: f64 },
}

impl GriddingError {
    #[must_use]
    pub fn invalid_parameters(details: impl Into<String>) -> Self {
        Self::InvalidParameters(details.into())
    }

    #[must_use]
    pub const fn dimension_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            what,
            expected,
            actual,
        }
    }
}
