//! Catmull-Rom splines.
//!
//! A uniform Catmull-Rom span interpolates between its two middle control
//! points, using the outer two to shape the tangents. A spline over `N`
//! points has `N - 3` spans when open and `N` spans when looping; in the
//! looping case the four control indices of each span are passed through a
//! [`WrapPolicy`].

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Curve, CurveError, CurveKind, Result};

/// Index wrap applied to the control indices of a looping spline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WrapPolicy {
    /// `idx < 0 → N-1`, `idx == N → 1`, `idx > N → 0`.
    ///
    /// The closing span therefore runs from the last point to point 1.
    #[default]
    Asymmetric,
    /// Ordinary modular wrap, `idx mod N`.
    Modular,
}

/// Map a possibly out-of-range control index into `0..n`.
///
/// Returns 0 when `n == 0`.
///
/// # Example
///
/// ```
/// use spline_curves::{wrap_index, WrapPolicy};
///
/// assert_eq!(wrap_index(-1, 6, WrapPolicy::Asymmetric), 5);
/// assert_eq!(wrap_index(6, 6, WrapPolicy::Asymmetric), 1);
/// assert_eq!(wrap_index(7, 6, WrapPolicy::Asymmetric), 0);
///
/// assert_eq!(wrap_index(6, 6, WrapPolicy::Modular), 0);
/// assert_eq!(wrap_index(7, 6, WrapPolicy::Modular), 1);
/// ```
#[must_use]
pub fn wrap_index(idx: isize, n: usize, policy: WrapPolicy) -> usize {
    if n == 0 {
        return 0;
    }
    let len = n as isize;

    match policy {
        WrapPolicy::Asymmetric => {
            if idx < 0 {
                n - 1
            } else if idx == len {
                1 % n
            } else if idx > len {
                0
            } else {
                idx as usize
            }
        }
        WrapPolicy::Modular => idx.rem_euclid(len) as usize,
    }
}

/// One uniform Catmull-Rom span between `p1` and `p2`.
///
/// # Equation
///
/// ```text
/// a = 2P₁
/// b = P₂ - P₀
/// c = 2P₀ - 5P₁ + 4P₂ - P₃
/// d = -P₀ + 3P₁ - 3P₂ + P₃
///
/// C(t)  = ½(a + bt + ct² + dt³)
/// C'(t) = ½(b + 2ct + 3dt²)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CatmullRomSpan {
    /// Leading neighbor.
    pub p0: Point3<f64>,
    /// Span start.
    pub p1: Point3<f64>,
    /// Span end.
    pub p2: Point3<f64>,
    /// Trailing neighbor.
    pub p3: Point3<f64>,
}

impl CatmullRomSpan {
    /// Create a span from four control points.
    #[must_use]
    pub const fn new(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>, p3: Point3<f64>) -> Self {
        Self { p0, p1, p2, p3 }
    }

    fn c(&self) -> Vector3<f64> {
        self.p0.coords * 2.0 - self.p1.coords * 5.0 + self.p2.coords * 4.0 - self.p3.coords
    }

    fn d(&self) -> Vector3<f64> {
        -self.p0.coords + self.p1.coords * 3.0 - self.p2.coords * 3.0 + self.p3.coords
    }
}

impl Curve for CatmullRomSpan {
    fn point_at(&self, t: f64) -> Point3<f64> {
        let t = t.clamp(0.0, 1.0);
        let a = self.p1.coords * 2.0;
        let b = self.p2 - self.p0;

        Point3::from((a + b * t + self.c() * (t * t) + self.d() * (t * t * t)) * 0.5)
    }

    fn derivative_at(&self, t: f64) -> Vector3<f64> {
        let t = t.clamp(0.0, 1.0);
        let b = self.p2 - self.p0;

        (b + self.c() * (2.0 * t) + self.d() * (3.0 * t * t)) * 0.5
    }
}

/// A Catmull-Rom spline over a snapshot of control points.
///
/// # Example
///
/// ```
/// use spline_curves::{CatmullRomSpline, Curve};
/// use nalgebra::Point3;
///
/// let points: Vec<_> = (0..6).map(|i| Point3::new(f64::from(i), 0.0, 0.0)).collect();
///
/// let open = CatmullRomSpline::new(&points, false)?;
/// assert_eq!(open.span_count(), 3);
///
/// let closed = CatmullRomSpline::new(&points, true)?;
/// assert_eq!(closed.span_count(), 6);
/// # Ok::<(), spline_curves::CurveError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CatmullRomSpline {
    points: Vec<Point3<f64>>,
    looping: bool,
    wrap: WrapPolicy,
}

impl CatmullRomSpline {
    /// Minimum number of control points.
    pub const MIN_POINTS: usize = 4;

    /// Build a spline using the default wrap policy.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidControlPointCount`] with fewer than 4 points.
    pub fn new(points: &[Point3<f64>], looping: bool) -> Result<Self> {
        if points.len() < Self::MIN_POINTS {
            return Err(CurveError::invalid_count(
                CurveKind::CatmullRom,
                points.len(),
                "need at least 4 points",
            ));
        }

        Ok(Self {
            points: points.to_vec(),
            looping,
            wrap: WrapPolicy::default(),
        })
    }

    /// Set the wrap policy used when looping.
    #[must_use]
    pub const fn with_wrap_policy(mut self, wrap: WrapPolicy) -> Self {
        self.wrap = wrap;
        self
    }

    /// Number of spans: `N` when looping, `N - 3` otherwise.
    #[must_use]
    pub fn span_count(&self) -> usize {
        if self.looping {
            self.points.len()
        } else {
            self.points.len() - 3
        }
    }

    /// Control indices `[i-1, i, i+1, i+2]` of span `span`.
    ///
    /// Open splines anchor span `k` on point `k + 1`; looping splines anchor
    /// span `k` on point `k` and wrap the neighbors.
    #[must_use]
    pub fn anchor_indices(&self, span: usize) -> Option<[usize; 4]> {
        if span >= self.span_count() {
            return None;
        }
        if !self.looping {
            return Some([span, span + 1, span + 2, span + 3]);
        }

        let n = self.points.len();
        let i = span as isize;
        Some([
            wrap_index(i - 1, n, self.wrap),
            wrap_index(i, n, self.wrap),
            wrap_index(i + 1, n, self.wrap),
            wrap_index(i + 2, n, self.wrap),
        ])
    }

    /// Get span `index`, if it exists.
    #[must_use]
    pub fn span(&self, index: usize) -> Option<CatmullRomSpan> {
        let [a, b, c, d] = self.anchor_indices(index)?;
        Some(CatmullRomSpan::new(
            self.points[a],
            self.points[b],
            self.points[c],
            self.points[d],
        ))
    }

    /// Iterate over all spans in order.
    pub fn spans(&self) -> impl Iterator<Item = CatmullRomSpan> + '_ {
        (0..self.span_count()).filter_map(|i| self.span(i))
    }

    /// The control points the spline was built from.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Whether the spline closes on itself.
    #[must_use]
    pub const fn is_looping(&self) -> bool {
        self.looping
    }

    /// The wrap policy applied when looping.
    #[must_use]
    pub const fn wrap_policy(&self) -> WrapPolicy {
        self.wrap
    }
}
