//! Bézier curve types.
//!
//! This module provides quadratic and cubic Bézier segments, and the
//! composite chains built from a flat control point array in which
//! consecutive segments share their anchors.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Curve, CurveError, CurveKind, Result};

/// A quadratic Bézier curve defined by 3 control points.
///
/// # Equation
///
/// ```text
/// B(t) = (1-t)²P₀ + 2(1-t)tP₁ + t²P₂
/// ```
///
/// # Example
///
/// ```
/// use spline_curves::{QuadraticBezier, Curve};
/// use nalgebra::Point3;
///
/// let curve = QuadraticBezier::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 2.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
/// );
///
/// let mid = curve.point_at(0.5);
/// // Midpoint is pulled toward control point
/// assert!(mid.y > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuadraticBezier {
    /// Start point.
    pub p0: Point3<f64>,
    /// Control point.
    pub p1: Point3<f64>,
    /// End point.
    pub p2: Point3<f64>,
}

impl QuadraticBezier {
    /// Create a new quadratic Bézier curve.
    #[must_use]
    pub const fn new(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>) -> Self {
        Self { p0, p1, p2 }
    }

    /// Get the control points as an array.
    #[must_use]
    pub fn control_points(&self) -> [Point3<f64>; 3] {
        [self.p0, self.p1, self.p2]
    }
}

impl Curve for QuadraticBezier {
    fn point_at(&self, t: f64) -> Point3<f64> {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;

        Point3::from(
            self.p0.coords * (s * s) + self.p1.coords * (2.0 * s * t) + self.p2.coords * (t * t),
        )
    }

    fn derivative_at(&self, t: f64) -> Vector3<f64> {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;

        // B'(t) = 2(1-t)(P₁-P₀) + 2t(P₂-P₁)
        (self.p1 - self.p0) * (2.0 * s) + (self.p2 - self.p1) * (2.0 * t)
    }
}

/// A cubic Bézier curve defined by 4 control points.
///
/// The curve passes through P₀ and P₃, and is tangent to P₀P₁ at the
/// start and P₂P₃ at the end.
///
/// # Equation
///
/// ```text
/// B(t) = (1-t)³P₀ + 3(1-t)²tP₁ + 3(1-t)t²P₂ + t³P₃
/// ```
///
/// # Example
///
/// ```
/// use spline_curves::{CubicBezier, Curve};
/// use nalgebra::Point3;
///
/// let curve = CubicBezier::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(-2.5, 0.0, 2.5),
///     Point3::new(2.5, 0.0, 7.5),
///     Point3::new(0.0, 0.0, 10.0),
/// );
///
/// let mid = curve.point_at(0.5);
/// assert!(mid.x.abs() < 1e-12);
/// assert!((mid.z - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CubicBezier {
    /// Start point.
    pub p0: Point3<f64>,
    /// First control point (affects start tangent).
    pub p1: Point3<f64>,
    /// Second control point (affects end tangent).
    pub p2: Point3<f64>,
    /// End point.
    pub p3: Point3<f64>,
}

impl CubicBezier {
    /// Create a new cubic Bézier curve.
    #[must_use]
    pub const fn new(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>, p3: Point3<f64>) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Get the control points as an array.
    #[must_use]
    pub fn control_points(&self) -> [Point3<f64>; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }
}

impl Curve for CubicBezier {
    fn point_at(&self, t: f64) -> Point3<f64> {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;
        let s2 = s * s;
        let t2 = t * t;

        Point3::from(
            self.p0.coords * (s2 * s)
                + self.p1.coords * (3.0 * s2 * t)
                + self.p2.coords * (3.0 * s * t2)
                + self.p3.coords * (t2 * t),
        )
    }

    fn derivative_at(&self, t: f64) -> Vector3<f64> {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;

        // B'(t) = 3(1-t)²(P₁-P₀) + 6(1-t)t(P₂-P₁) + 3t²(P₃-P₂)
        (self.p1 - self.p0) * (3.0 * s * s)
            + (self.p2 - self.p1) * (6.0 * s * t)
            + (self.p3 - self.p2) * (3.0 * t * t)
    }
}

/// A chain of cubic Bézier segments stored as one flat point array.
///
/// Points alternate anchor, handle, handle, anchor; the end anchor of one
/// segment is the start anchor of the next, so `n` segments use `3n + 1`
/// points.
///
/// # Example
///
/// ```
/// use spline_curves::{BezierChain, Curve};
/// use nalgebra::Point3;
///
/// let chain = BezierChain::new(&[
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(-2.5, 0.0, 2.5),
///     Point3::new(2.5, 0.0, 7.5),
///     Point3::new(0.0, 0.0, 10.0),
///     Point3::new(-2.5, 0.0, 12.5),
///     Point3::new(2.5, 0.0, 17.5),
///     Point3::new(0.0, 0.0, 20.0),
/// ])?;
///
/// assert_eq!(chain.segment_count(), 2);
/// # Ok::<(), spline_curves::CurveError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BezierChain {
    points: Vec<Point3<f64>>,
}

impl BezierChain {
    /// Build a chain from a snapshot of the control points.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidControlPointCount`] unless the slice holds
    /// `3n + 1` points with `n >= 1`.
    pub fn new(points: &[Point3<f64>]) -> Result<Self> {
        let len = points.len();
        if len < 4 {
            return Err(CurveError::invalid_count(
                CurveKind::CubicBezier,
                len,
                "need at least 4 points",
            ));
        }
        if (len - 1) % 3 != 0 {
            return Err(CurveError::invalid_count(
                CurveKind::CubicBezier,
                len,
                "expected 3n+1 points",
            ));
        }

        Ok(Self {
            points: points.to_vec(),
        })
    }

    /// Number of cubic segments in the chain.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        (self.points.len() - 1) / 3
    }

    /// Get segment `index`, if it exists.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<CubicBezier> {
        let i = index.checked_mul(3)?;
        let p = self.points.get(i..i + 4)?;
        Some(CubicBezier::new(p[0], p[1], p[2], p[3]))
    }

    /// Iterate over all segments in order.
    pub fn segments(&self) -> impl Iterator<Item = CubicBezier> + '_ {
        self.points
            .windows(4)
            .step_by(3)
            .map(|p| CubicBezier::new(p[0], p[1], p[2], p[3]))
    }

    /// The anchor points (every third point).
    #[must_use]
    pub fn anchors(&self) -> Vec<Point3<f64>> {
        self.points.iter().step_by(3).copied().collect()
    }

    /// The control points the chain was built from.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }
}

/// A chain of quadratic Bézier segments sharing anchors.
///
/// Points alternate anchor, handle, anchor; `n` segments use `2n + 1`
/// points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuadraticChain {
    points: Vec<Point3<f64>>,
}

impl QuadraticChain {
    /// Build a chain from a snapshot of the control points.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidControlPointCount`] unless the slice holds
    /// `2n + 1` points with `n >= 1`.
    pub fn new(points: &[Point3<f64>]) -> Result<Self> {
        let len = points.len();
        if len < 3 {
            return Err(CurveError::invalid_count(
                CurveKind::Quadratic,
                len,
                "need at least 3 points",
            ));
        }
        if (len - 1) % 2 != 0 {
            return Err(CurveError::invalid_count(
                CurveKind::Quadratic,
                len,
                "expected 2n+1 points",
            ));
        }

        Ok(Self {
            points: points.to_vec(),
        })
    }

    /// Number of quadratic segments in the chain.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        (self.points.len() - 1) / 2
    }

    /// Get segment `index`, if it exists.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<QuadraticBezier> {
        let i = index.checked_mul(2)?;
        let p = self.points.get(i..i + 3)?;
        Some(QuadraticBezier::new(p[0], p[1], p[2]))
    }

    /// Iterate over all segments in order.
    pub fn segments(&self) -> impl Iterator<Item = QuadraticBezier> + '_ {
        self.points
            .windows(3)
            .step_by(2)
            .map(|p| QuadraticBezier::new(p[0], p[1], p[2]))
    }

    /// The control points the chain was built from.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }
}
