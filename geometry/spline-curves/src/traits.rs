//! Core curve trait.
//!
//! Every span type (quadratic and cubic Bézier segments, Catmull-Rom spans)
//! implements [`Curve`], which is the seam the sampler and the frame
//! computation are written against.

use nalgebra::{Point3, Vector3};

use crate::Result;
use crate::frame::unit_tangent;

/// A single parametric span in 3D space.
///
/// Spans are parameterized over `t ∈ [0, 1]`. Implementations clamp `t`
/// where the underlying formula is only meaningful inside that range.
///
/// # Implementors
///
/// - [`QuadraticBezier`](crate::QuadraticBezier)
/// - [`CubicBezier`](crate::CubicBezier)
/// - [`CatmullRomSpan`](crate::CatmullRomSpan)
/// - [`Span`](crate::Span) - dispatches to one of the above
pub trait Curve {
    /// Evaluate the position at parameter `t`.
    fn point_at(&self, t: f64) -> Point3<f64>;

    /// Compute the first derivative (velocity) at parameter `t`.
    ///
    /// The result is not normalized; its magnitude is the parametric speed.
    fn derivative_at(&self, t: f64) -> Vector3<f64>;

    /// Compute the unit tangent at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::VanishingDerivative`](crate::CurveError::VanishingDerivative)
    /// when the derivative vanishes, e.g. where control points coincide.
    fn tangent_at(&self, t: f64) -> Result<Vector3<f64>> {
        unit_tangent(self.derivative_at(t))
    }

    /// Sample `n` points at uniform parameter intervals (at least 2).
    fn sample_uniform(&self, n: usize) -> Vec<Point3<f64>> {
        let n = n.max(2);
        (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                self.point_at(t)
            })
            .collect()
    }

    /// Get the start point (`t=0`).
    fn start(&self) -> Point3<f64> {
        self.point_at(0.0)
    }

    /// Get the end point (`t=1`).
    fn end(&self) -> Point3<f64> {
        self.point_at(1.0)
    }
}
