//! Error types for curve evaluation.

use thiserror::Error;

use crate::CurveKind;

/// Errors that can occur while building or sampling a curve.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    /// The control point count does not fit the curve family.
    #[error("invalid control point count for {kind:?}: got {actual}, {reason}")]
    InvalidControlPointCount {
        /// Curve family that rejected the points.
        kind: CurveKind,
        /// Number of points supplied.
        actual: usize,
        /// Which shape rule was violated.
        reason: String,
    },

    /// A segment count or resolution is zero.
    #[error("invalid resolution: {name} must be greater than zero, got {value}")]
    InvalidResolution {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// The curve derivative vanishes at a single evaluated point.
    #[error("vanishing derivative: magnitude {magnitude:e}")]
    VanishingDerivative {
        /// Magnitude of the derivative that was rejected.
        magnitude: f64,
    },

    /// The curve derivative vanishes at a sample row.
    #[error("degenerate tangent at sample {index}: derivative magnitude {magnitude:e}")]
    DegenerateTangent {
        /// Sample row index.
        index: usize,
        /// Magnitude of the derivative that was rejected.
        magnitude: f64,
    },

    /// A computed buffer index exceeds its backing array.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The computed index.
        index: usize,
        /// Length of the backing array.
        len: usize,
    },
}

impl CurveError {
    /// Create an invalid control point count error.
    #[must_use]
    pub fn invalid_count(kind: CurveKind, actual: usize, reason: impl Into<String>) -> Self {
        Self::InvalidControlPointCount {
            kind,
            actual,
            reason: reason.into(),
        }
    }

    /// Create an invalid resolution error.
    #[must_use]
    pub const fn invalid_resolution(name: &'static str, value: usize) -> Self {
        Self::InvalidResolution { name, value }
    }

    /// Create a degenerate tangent error.
    #[must_use]
    pub const fn degenerate_tangent(index: usize, magnitude: f64) -> Self {
        Self::DegenerateTangent { index, magnitude }
    }

    /// Create a vanishing derivative error for a single evaluated point.
    #[must_use]
    pub const fn vanishing_derivative(magnitude: f64) -> Self {
        Self::VanishingDerivative { magnitude }
    }

    /// Attach a sample row to a vanishing derivative error.
    ///
    /// Other errors are returned unchanged.
    #[must_use]
    pub fn at_sample(self, index: usize) -> Self {
        match self {
            Self::VanishingDerivative { magnitude } => Self::DegenerateTangent { index, magnitude },
            other => other,
        }
    }

    /// Check if this is an invalid control point count error.
    #[must_use]
    pub fn is_invalid_count(&self) -> bool {
        matches!(self, Self::InvalidControlPointCount { .. })
    }

    /// Check if this is an invalid resolution error.
    #[must_use]
    pub fn is_invalid_resolution(&self) -> bool {
        matches!(self, Self::InvalidResolution { .. })
    }

    /// Check if this is a degenerate tangent error, with or without a row.
    #[must_use]
    pub fn is_degenerate_tangent(&self) -> bool {
        matches!(
            self,
            Self::DegenerateTangent { .. } | Self::VanishingDerivative { .. }
        )
    }

    /// Check if this is an index out of range error.
    #[must_use]
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }
}
