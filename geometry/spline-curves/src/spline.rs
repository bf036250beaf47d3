//! Curve family dispatch and uniform sampling.
//!
//! [`Spline`] wraps one of the three chain types behind a single
//! [`CurveKind`]-selected constructor, and [`Spline::sample`] turns it into
//! the row sequence every downstream stage works from.

use nalgebra::{Point3, Vector3};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    ArcLengthTable, BezierChain, CatmullRomSpan, CatmullRomSpline, CubicBezier, Curve,
    CurveError, QuadraticBezier, QuadraticChain, Result, SpanArcLengthTable, SpanProgress,
    WrapPolicy, unit_tangent,
};

/// The curve family a control point set is interpreted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CurveKind {
    /// Quadratic Bézier chain, `2n + 1` points.
    Quadratic,
    /// Cubic Bézier chain, `3n + 1` points.
    CubicBezier,
    /// Uniform Catmull-Rom spline, at least 4 points.
    CatmullRom,
}

/// A single span of any family.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Span {
    /// Quadratic Bézier segment.
    Quadratic(QuadraticBezier),
    /// Cubic Bézier segment.
    Cubic(CubicBezier),
    /// Catmull-Rom span.
    CatmullRom(CatmullRomSpan),
}

impl Curve for Span {
    fn point_at(&self, t: f64) -> Point3<f64> {
        match self {
            Self::Quadratic(c) => c.point_at(t),
            Self::Cubic(c) => c.point_at(t),
            Self::CatmullRom(c) => c.point_at(t),
        }
    }

    fn derivative_at(&self, t: f64) -> Vector3<f64> {
        match self {
            Self::Quadratic(c) => c.derivative_at(t),
            Self::Cubic(c) => c.derivative_at(t),
            Self::CatmullRom(c) => c.derivative_at(t),
        }
    }
}

/// A spline of any supported family.
///
/// # Example
///
/// ```
/// use spline_curves::{CurveKind, Spline, WrapPolicy};
/// use nalgebra::Point3;
///
/// let points: Vec<_> = (0..5).map(|i| Point3::new(f64::from(i), 0.0, 0.0)).collect();
/// let spline = Spline::new(CurveKind::CatmullRom, &points, true, WrapPolicy::Asymmetric)?;
///
/// assert_eq!(spline.span_count(), 5);
/// assert_eq!(spline.sample(4)?.len(), 21);
/// # Ok::<(), spline_curves::CurveError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Spline {
    /// Quadratic Bézier chain.
    Quadratic(QuadraticChain),
    /// Cubic Bézier chain.
    CubicBezier(BezierChain),
    /// Catmull-Rom spline.
    CatmullRom(CatmullRomSpline),
}

impl Spline {
    /// Interpret `points` as a spline of family `kind`.
    ///
    /// `looping` and `wrap` only affect Catmull-Rom splines. Bézier chains
    /// have no seam wrap; close them by repeating the first anchor.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidControlPointCount`] if the point count does
    /// not fit the family.
    pub fn new(
        kind: CurveKind,
        points: &[Point3<f64>],
        looping: bool,
        wrap: WrapPolicy,
    ) -> Result<Self> {
        if looping && kind != CurveKind::CatmullRom {
            debug!(?kind, "looping has no effect on Bézier chains");
        }

        match kind {
            CurveKind::Quadratic => QuadraticChain::new(points).map(Self::Quadratic),
            CurveKind::CubicBezier => BezierChain::new(points).map(Self::CubicBezier),
            CurveKind::CatmullRom => CatmullRomSpline::new(points, looping)
                .map(|s| Self::CatmullRom(s.with_wrap_policy(wrap))),
        }
    }

    /// The curve family.
    #[must_use]
    pub fn kind(&self) -> CurveKind {
        match self {
            Self::Quadratic(_) => CurveKind::Quadratic,
            Self::CubicBezier(_) => CurveKind::CubicBezier,
            Self::CatmullRom(_) => CurveKind::CatmullRom,
        }
    }

    /// Number of spans.
    #[must_use]
    pub fn span_count(&self) -> usize {
        match self {
            Self::Quadratic(c) => c.segment_count(),
            Self::CubicBezier(c) => c.segment_count(),
            Self::CatmullRom(s) => s.span_count(),
        }
    }

    /// Get span `index`, if it exists.
    #[must_use]
    pub fn span(&self, index: usize) -> Option<Span> {
        match self {
            Self::Quadratic(c) => c.segment(index).map(Span::Quadratic),
            Self::CubicBezier(c) => c.segment(index).map(Span::Cubic),
            Self::CatmullRom(s) => s.span(index).map(Span::CatmullRom),
        }
    }

    /// All spans in order.
    #[must_use]
    pub fn spans(&self) -> Vec<Span> {
        (0..self.span_count()).filter_map(|i| self.span(i)).collect()
    }

    /// Whether the spline wraps around its seam.
    #[must_use]
    pub fn is_looping(&self) -> bool {
        matches!(self, Self::CatmullRom(s) if s.is_looping())
    }

    /// The control points the spline was built from.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        match self {
            Self::Quadratic(c) => c.points(),
            Self::CubicBezier(c) => c.points(),
            Self::CatmullRom(s) => s.points(),
        }
    }

    /// Sample every span at `k / segments_per_span` for `k = 0..=segments_per_span`.
    ///
    /// Joints shared by adjacent spans are emitted once, giving
    /// `span_count · segments_per_span + 1` samples. A joint's tangent is the
    /// normalized average of the unit tangents of the two spans meeting there.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidResolution`] if `segments_per_span == 0`.
    pub fn sample(&self, segments_per_span: usize) -> Result<SampledCurve> {
        if segments_per_span == 0 {
            return Err(CurveError::invalid_resolution("segments_per_span", 0));
        }

        let spans = self.spans();
        let span_count = spans.len();
        let rows = span_count * segments_per_span + 1;

        let mut samples = Vec::with_capacity(rows);
        let mut arc_length = 0.0;
        let mut previous: Option<Point3<f64>> = None;

        for y in 0..rows {
            let SpanProgress { span, progress } =
                SpanProgress::from_row(y, segments_per_span, span_count);
            let curve = &spans[span];

            let position = curve.point_at(progress);
            let own = curve.tangent_at(progress).ok();
            // Only a span's first row is shared with the previous span; the
            // final row belongs to the last span alone
            let tangent = if span > 0 && y == span * segments_per_span {
                joint_tangent(spans[span - 1].tangent_at(1.0).ok(), own)
            } else {
                own
            };

            if let Some(p) = previous {
                arc_length += (position - p).norm();
            }
            previous = Some(position);

            samples.push(CurveSample {
                position,
                tangent,
                arc_length,
                span,
            });
        }

        debug!(
            kind = ?self.kind(),
            spans = span_count,
            samples = samples.len(),
            length = arc_length,
            "sampled spline"
        );

        Ok(SampledCurve {
            samples,
            segments_per_span,
            span_count,
        })
    }
}

fn joint_tangent(before: Option<Vector3<f64>>, after: Option<Vector3<f64>>) -> Option<Vector3<f64>> {
    match (before, after) {
        // Opposed tangents (a cusp) average to zero; keep the later span's
        (Some(a), Some(b)) => unit_tangent(a + b).ok().or(Some(b)),
        (a, b) => b.or(a),
    }
}

/// One evaluated row of a sampled spline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurveSample {
    /// Position on the curve.
    pub position: Point3<f64>,
    /// Unit tangent, `None` where the derivative vanishes.
    pub tangent: Option<Vector3<f64>>,
    /// Polyline distance from the first sample.
    pub arc_length: f64,
    /// Span that produced the sample; joints belong to the later span.
    pub span: usize,
}

/// The sample rows of a spline together with their span layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampledCurve {
    samples: Vec<CurveSample>,
    segments_per_span: usize,
    span_count: usize,
}

impl SampledCurve {
    /// The sample rows.
    #[must_use]
    pub fn samples(&self) -> &[CurveSample] {
        &self.samples
    }

    /// Consume into the sample rows.
    #[must_use]
    pub fn into_samples(self) -> Vec<CurveSample> {
        self.samples
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Segments per span used while sampling.
    #[must_use]
    pub const fn segments_per_span(&self) -> usize {
        self.segments_per_span
    }

    /// Number of spans sampled.
    #[must_use]
    pub const fn span_count(&self) -> usize {
        self.span_count
    }

    /// Sample positions.
    #[must_use]
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.samples.iter().map(|s| s.position).collect()
    }

    /// Sample tangents.
    #[must_use]
    pub fn tangents(&self) -> Vec<Option<Vector3<f64>>> {
        self.samples.iter().map(|s| s.tangent).collect()
    }

    /// Arc-length table over all rows.
    #[must_use]
    pub fn arc_length_table(&self) -> ArcLengthTable {
        ArcLengthTable::build(&self.positions())
    }

    /// One arc-length table per span.
    #[must_use]
    pub fn span_tables(&self) -> SpanArcLengthTable {
        SpanArcLengthTable::from_spans(&self.positions(), self.segments_per_span)
    }

    /// Distance from the first to the last sample along the polyline.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.arc_length)
    }
}
