//! Error types for ribbon mesh generation.

use spline_curves::CurveError;
use thiserror::Error;

/// Result type for ribbon operations.
pub type RibbonResult<T> = Result<T, RibbonError>;

/// Errors that can occur while building a ribbon mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RibbonError {
    /// A resolution parameter is zero.
    #[error("invalid resolution: {name} must be greater than zero, got {value}")]
    InvalidResolution {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// Too few rail rows to form a single quad.
    #[error("ribbon needs at least {min} rail rows, got {actual}")]
    InsufficientSamples {
        /// Minimum required rows.
        min: usize,
        /// Rows supplied.
        actual: usize,
    },

    /// A computed buffer size or index does not fit its backing array.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The computed index or size.
        index: usize,
        /// The bound it was checked against.
        len: usize,
    },

    /// Rail width is zero, negative or not finite.
    #[error("invalid rail width: {0}")]
    InvalidWidth(f64),

    /// An arc-length table does not cover the rows it is sampled for.
    #[error("arc-length table has {actual} entries, expected {expected}")]
    TableMismatch {
        /// Entries required.
        expected: usize,
        /// Entries present.
        actual: usize,
    },

    /// Curve construction, sampling or framing failed.
    #[error("curve error: {0}")]
    Curve(#[from] CurveError),
}

impl RibbonError {
    /// Create an invalid resolution error.
    #[must_use]
    pub const fn invalid_resolution(name: &'static str, value: usize) -> Self {
        Self::InvalidResolution { name, value }
    }

    /// Check if this is an invalid resolution error, including one raised by
    /// the curve layer.
    #[must_use]
    pub fn is_invalid_resolution(&self) -> bool {
        matches!(
            self,
            Self::InvalidResolution { .. } | Self::Curve(CurveError::InvalidResolution { .. })
        )
    }

    /// Check if this is an invalid control point count error.
    #[must_use]
    pub fn is_invalid_count(&self) -> bool {
        matches!(self, Self::Curve(e) if e.is_invalid_count())
    }

    /// Check if this is a degenerate tangent error.
    #[must_use]
    pub fn is_degenerate_tangent(&self) -> bool {
        matches!(self, Self::Curve(e) if e.is_degenerate_tangent())
    }

    /// Check if this is an insufficient samples error.
    #[must_use]
    pub fn is_insufficient_samples(&self) -> bool {
        matches!(self, Self::InsufficientSamples { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spline_curves::CurveKind;

    #[test]
    fn test_curve_error_converts() {
        let err: RibbonError =
            CurveError::invalid_count(CurveKind::CubicBezier, 5, "expected 3n+1 points").into();
        assert!(err.is_invalid_count());
        assert!(err.to_string().starts_with("curve error"));
    }

    #[test]
    fn test_resolution_predicate() {
        assert!(RibbonError::invalid_resolution("rail_resolution", 0).is_invalid_resolution());
        let nested: RibbonError = CurveError::invalid_resolution("segments_per_span", 0).into();
        assert!(nested.is_invalid_resolution());
        assert!(!RibbonError::InvalidWidth(0.0).is_invalid_resolution());
    }

    #[test]
    fn test_display() {
        let err = RibbonError::InsufficientSamples { min: 2, actual: 1 };
        assert_eq!(err.to_string(), "ribbon needs at least 2 rail rows, got 1");
        assert!(err.is_insufficient_samples());

        let err = RibbonError::TableMismatch {
            expected: 11,
            actual: 10,
        };
        assert!(err.to_string().contains("expected 11"));
    }
}
