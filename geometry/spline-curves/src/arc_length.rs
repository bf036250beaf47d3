//! Cumulative arc-length tables.
//!
//! A table stores the running polyline length through a sample sequence
//! and maps a normalized parameter `t ∈ [0, 1]` to a distance by linear
//! interpolation between neighboring entries. Ribbon UVs read their `v`
//! coordinate from these tables so texture density follows distance rather
//! than curve parameter.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Placement;

/// Monotone cumulative distances through an ordered point sequence.
///
/// # Example
///
/// ```
/// use spline_curves::ArcLengthTable;
/// use nalgebra::Point3;
///
/// let table = ArcLengthTable::build(&[
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(3.0, 4.0, 0.0),
///     Point3::new(3.0, 4.0, 5.0),
/// ]);
///
/// assert_eq!(table.entries(), &[0.0, 5.0, 10.0]);
/// assert_eq!(table.sample(0.25), 2.5);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArcLengthTable {
    entries: Vec<f64>,
}

impl ArcLengthTable {
    /// Tabulate `table[0] = 0`, `table[i] = table[i-1] + |p_i - p_{i-1}|`.
    #[must_use]
    pub fn build(points: &[Point3<f64>]) -> Self {
        let mut entries = Vec::with_capacity(points.len());
        let mut total = 0.0;

        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                total += (p - points[i - 1]).norm();
            }
            entries.push(total);
        }

        Self { entries }
    }

    /// Tabulate the points after applying `placement`.
    ///
    /// The input is not modified.
    #[must_use]
    pub fn build_transformed(points: &[Point3<f64>], placement: &Placement) -> Self {
        Self::build(&placement.apply(points))
    }

    /// The cumulative distances.
    #[must_use]
    pub fn entries(&self) -> &[f64] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The last entry, or 0 for an empty table.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.entries.last().copied().unwrap_or(0.0)
    }

    /// Distance at normalized position `t`.
    ///
    /// `t` is clamped to `[0, 1]` (NaN reads as 0) and mapped onto the entry
    /// range; the result is interpolated between the two nearest entries.
    #[must_use]
    pub fn sample(&self, t: f64) -> f64 {
        match self.entries.as_slice() {
            [] => 0.0,
            [only] => *only,
            entries => {
                let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
                let last = entries.len() - 1;
                let f = t * last as f64;

                let lo = (f.floor() as usize).min(last);
                let hi = (f.ceil() as usize).min(last);
                let frac = f - lo as f64;

                entries[lo] + (entries[hi] - entries[lo]) * frac
            }
        }
    }
}

/// One arc-length table per span of a sampled spline.
///
/// Rows are built from the shared sample sequence: span `k` covers samples
/// `k·s ..= (k+1)·s`, so adjacent rows share their joint sample.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpanArcLengthTable {
    rows: Vec<ArcLengthTable>,
}

impl SpanArcLengthTable {
    /// Split `points` into spans of `segments_per_span` segments.
    ///
    /// A trailing partial span gets its own row. Returns an empty table if
    /// `points` is empty or `segments_per_span == 0`.
    #[must_use]
    pub fn from_spans(points: &[Point3<f64>], segments_per_span: usize) -> Self {
        if points.is_empty() || segments_per_span == 0 {
            return Self::default();
        }
        if points.len() == 1 {
            return Self::from_tables(vec![ArcLengthTable::build(points)]);
        }

        let last = points.len() - 1;
        let rows = (0..last)
            .step_by(segments_per_span)
            .map(|start| {
                let end = (start + segments_per_span).min(last);
                ArcLengthTable::build(&points[start..=end])
            })
            .collect();

        Self { rows }
    }

    /// Wrap tables that were built separately.
    #[must_use]
    pub fn from_tables(rows: Vec<ArcLengthTable>) -> Self {
        Self { rows }
    }

    /// Number of span rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Table for one span.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&ArcLengthTable> {
        self.rows.get(index)
    }

    /// All span tables.
    #[must_use]
    pub fn rows(&self) -> &[ArcLengthTable] {
        &self.rows
    }

    /// Sample span `row` at `t`; `row` is clamped into range.
    #[must_use]
    pub fn sample(&self, row: usize, t: f64) -> f64 {
        match self.rows.len() {
            0 => 0.0,
            n => self.rows[row.min(n - 1)].sample(t),
        }
    }

    /// Length accumulated before each span.
    #[must_use]
    pub fn span_offsets(&self) -> Vec<f64> {
        let mut offsets = Vec::with_capacity(self.rows.len());
        let mut total = 0.0;
        for row in &self.rows {
            offsets.push(total);
            total += row.total_length();
        }
        offsets
    }

    /// Sum of all span lengths.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.rows.iter().map(ArcLengthTable::total_length).sum()
    }
}

/// Position of a sample row within its span.
///
/// Rows are numbered across the whole spline. Row `k·s` starts span `k` with
/// progress 0; the final row `n·s` closes the last span with progress 1.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpanProgress {
    /// Span index.
    pub span: usize,
    /// Local parameter within the span.
    pub progress: f64,
}

impl SpanProgress {
    /// Locate row `y` for `segments_per_span` segments and `span_count` spans.
    ///
    /// Zero counts are treated as one.
    #[must_use]
    pub fn from_row(y: usize, segments_per_span: usize, span_count: usize) -> Self {
        let s = segments_per_span.max(1);
        let span = (y / s).min(span_count.max(1) - 1);
        let progress = (y - span * s) as f64 / s as f64;
        Self { span, progress }
    }

    /// True when the row sits on the first sample of its span.
    #[must_use]
    pub fn is_span_start(&self) -> bool {
        self.progress == 0.0
    }
}
