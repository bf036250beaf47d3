//! Texture coordinates for ribbon vertices.
//!
//! `u` runs across the ribbon from the left rail (`0`) to the right rail
//! (`1`). `v` advances along it and is computed once per row, then shared by
//! every vertex in the row.

use nalgebra::Point2;
use spline_curves::{ArcLengthTable, SpanArcLengthTable, SpanProgress};

use crate::config::{SpanContinuity, UvMode};
use crate::error::{RibbonError, RibbonResult};

/// Grid shape the UVs are generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UvLayout {
    /// Number of rail rows.
    pub rows: usize,
    /// Quads across the ribbon.
    pub rail_resolution: usize,
    /// Rows per span, used by [`UvMode::PerSpan`].
    pub segments_per_span: usize,
}

impl UvLayout {
    /// Number of spans implied by the row count.
    #[must_use]
    pub fn span_count(&self) -> usize {
        if self.segments_per_span == 0 {
            return 0;
        }
        self.rows.saturating_sub(1).div_ceil(self.segments_per_span)
    }
}

/// Compute one UV per vertex for `mode`, or `None` for [`UvMode::None`].
///
/// `table` must hold one entry per row. `spans` is only read for
/// [`UvMode::PerSpan`] and must hold one row per span.
///
/// # Errors
///
/// - [`RibbonError::InsufficientSamples`] if `layout.rows < 2`
/// - [`RibbonError::InvalidResolution`] if `rail_resolution` is zero, or
///   `segments_per_span` is zero in per-span mode
/// - [`RibbonError::TableMismatch`] if a table does not match the layout
///
/// # Example
///
/// ```
/// use mesh_ribbon::{UvLayout, UvMode, generate_uvs};
/// use spline_curves::{ArcLengthTable, SpanArcLengthTable};
/// use nalgebra::Point3;
///
/// let centre: Vec<_> = (0..5).map(|i| Point3::new(0.0, 0.0, f64::from(i * i))).collect();
/// let table = ArcLengthTable::build(&centre);
/// let layout = UvLayout { rows: 5, rail_resolution: 1, segments_per_span: 4 };
///
/// let uvs = generate_uvs(&UvMode::ArcLength, &layout, &table, &SpanArcLengthTable::default())?
///     .unwrap_or_default();
/// assert_eq!(uvs.len(), 10);
/// assert_eq!(uvs[0].y, 0.0);
/// assert_eq!(uvs[9].y, 1.0);
/// // Uneven spacing shows up in v
/// assert_eq!(uvs[2].y, 1.0 / 16.0);
/// # Ok::<(), mesh_ribbon::RibbonError>(())
/// ```
pub fn generate_uvs(
    mode: &UvMode,
    layout: &UvLayout,
    table: &ArcLengthTable,
    spans: &SpanArcLengthTable,
) -> RibbonResult<Option<Vec<Point2<f64>>>> {
    let UvLayout {
        rows,
        rail_resolution: res,
        segments_per_span,
    } = *layout;

    if rows < 2 {
        return Err(RibbonError::InsufficientSamples {
            min: 2,
            actual: rows,
        });
    }
    if res == 0 {
        return Err(RibbonError::invalid_resolution("rail_resolution", 0));
    }
    if matches!(mode, UvMode::None) {
        return Ok(None);
    }
    if table.len() != rows && !matches!(mode, UvMode::Stretched) {
        return Err(RibbonError::TableMismatch {
            expected: rows,
            actual: table.len(),
        });
    }
    if let UvMode::PerSpan { .. } = mode {
        if segments_per_span == 0 {
            return Err(RibbonError::invalid_resolution("segments_per_span", 0));
        }
        if spans.row_count() != layout.span_count() {
            return Err(RibbonError::TableMismatch {
                expected: layout.span_count(),
                actual: spans.row_count(),
            });
        }
    }

    let last = (rows - 1) as f64;
    let total = table.total_length();
    let offsets = spans.span_offsets();
    let span_total = spans.total_length();

    let mut uvs = Vec::with_capacity(rows * (res + 1));
    for y in 0..rows {
        let t = y as f64 / last;
        let v = match *mode {
            UvMode::None | UvMode::Stretched => t,
            UvMode::ArcLength => normalized(table.sample(t), total, t),
            UvMode::Distance { scale } => table.sample(t) * scale,
            UvMode::PerSpan { continuity } => {
                let SpanProgress { span, progress } =
                    SpanProgress::from_row(y, segments_per_span, layout.span_count());
                let row = spans.row(span);

                // A trailing partial span has fewer than segments_per_span segments
                let row_segments = row.map_or(0, |r| r.len().saturating_sub(1));
                let local_t = if row_segments > 0 {
                    (y - span * segments_per_span) as f64 / row_segments as f64
                } else {
                    progress
                };
                let local = spans.sample(span, local_t);

                match continuity {
                    SpanContinuity::Restart => {
                        let row_total = row.map_or(0.0, ArcLengthTable::total_length);
                        normalized(local, row_total, local_t)
                    }
                    SpanContinuity::Continue => {
                        let before = offsets.get(span).copied().unwrap_or(0.0);
                        normalized(before + local, span_total, t)
                    }
                }
            }
        };

        for x in 0..=res {
            uvs.push(Point2::new(x as f64 / res as f64, v));
        }
    }

    Ok(Some(uvs))
}

/// `value / total`, or `fallback` when there is no length to normalize by.
fn normalized(value: f64, total: f64, fallback: f64) -> f64 {
    if total > 0.0 { value / total } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    /// Rows along +z with spacing that doubles every span.
    fn centreline(spans: usize, segs: usize) -> Vec<Point3<f64>> {
        let mut z = 0.0;
        let mut points = vec![Point3::new(0.0, 0.0, z)];
        for k in 0..spans {
            for _ in 0..segs {
                z += f64::from(1u32 << k);
                points.push(Point3::new(0.0, 0.0, z));
            }
        }
        points
    }

    fn layout(rows: usize, res: usize, segs: usize) -> UvLayout {
        UvLayout {
            rows,
            rail_resolution: res,
            segments_per_span: segs,
        }
    }

    #[allow(clippy::unwrap_used)]
    fn uvs_for(mode: UvMode, spans: usize, segs: usize, res: usize) -> Vec<Point2<f64>> {
        let points = centreline(spans, segs);
        let table = ArcLengthTable::build(&points);
        let span_tables = SpanArcLengthTable::from_spans(&points, segs);
        generate_uvs(
            &mode,
            &layout(points.len(), res, segs),
            &table,
            &span_tables,
        )
        .unwrap()
        .unwrap()
    }

    /// v of row `y` for a single-column ribbon.
    fn v(uvs: &[Point2<f64>], y: usize) -> f64 {
        uvs[y * 2].y
    }

    #[test]
    fn test_u_spans_the_width() {
        let uvs = uvs_for(UvMode::Stretched, 1, 4, 4);
        assert_eq!(uvs.len(), 5 * 5);
        let row: Vec<f64> = uvs[5..10].iter().map(|p| p.x).collect();
        assert_eq!(row, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(uvs[5..10].iter().all(|p| p.y == 0.25));
    }

    #[test]
    fn test_stretched_ignores_spacing() {
        let uvs = uvs_for(UvMode::Stretched, 2, 2, 1);
        assert_relative_eq!(v(&uvs, 0), 0.0);
        assert_relative_eq!(v(&uvs, 1), 0.25);
        assert_relative_eq!(v(&uvs, 4), 1.0);
    }

    #[test]
    fn test_arc_length_endpoints() {
        let uvs = uvs_for(UvMode::ArcLength, 3, 4, 1);
        let rows = 13;
        assert_relative_eq!(v(&uvs, 0), 0.0);
        assert_relative_eq!(v(&uvs, rows - 1), 1.0, epsilon = 1e-12);
        for y in 1..rows {
            assert!(v(&uvs, y) >= v(&uvs, y - 1));
        }
        // Span lengths 4, 8, 16: the first joint sits at 4/28
        assert_relative_eq!(v(&uvs, 4), 4.0 / 28.0, epsilon = 1e-12);
    }

    #[test]
    fn test_distance_mode() {
        let uvs = uvs_for(UvMode::Distance { scale: 0.5 }, 2, 2, 1);
        // Distances 0, 1, 2, 4, 6
        assert_relative_eq!(v(&uvs, 3), 2.0, epsilon = 1e-12);
        assert_relative_eq!(v(&uvs, 4), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_per_span_restart_boundaries() {
        let mode = UvMode::PerSpan {
            continuity: SpanContinuity::Restart,
        };
        let (spans, s) = (3, 4);
        let uvs = uvs_for(mode, spans, s, 1);

        assert_relative_eq!(v(&uvs, 0), 0.0);
        assert_relative_eq!(v(&uvs, s - 1), 0.75, epsilon = 1e-12);
        // Row k·s starts span k again
        assert_relative_eq!(v(&uvs, s), 0.0);
        assert_relative_eq!(v(&uvs, s + 1), 0.25, epsilon = 1e-12);
        assert_relative_eq!(v(&uvs, 2 * s), 0.0);
        // Final row closes the last span
        assert_relative_eq!(v(&uvs, spans * s), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_per_span_continue_boundaries() {
        let mode = UvMode::PerSpan {
            continuity: SpanContinuity::Continue,
        };
        let (spans, s) = (3, 4);
        let uvs = uvs_for(mode, spans, s, 1);

        assert_relative_eq!(v(&uvs, 0), 0.0);
        assert_relative_eq!(v(&uvs, s - 1), 3.0 / 28.0, epsilon = 1e-12);
        assert_relative_eq!(v(&uvs, s), 4.0 / 28.0, epsilon = 1e-12);
        assert_relative_eq!(v(&uvs, s + 1), 6.0 / 28.0, epsilon = 1e-12);
        assert_relative_eq!(v(&uvs, spans * s), 1.0, epsilon = 1e-12);

        // Agrees with whole-ribbon arc length when spans share the polyline
        let whole = uvs_for(UvMode::ArcLength, spans, s, 1);
        for y in 0..=spans * s {
            assert_relative_eq!(v(&uvs, y), v(&whole, y), epsilon = 1e-12);
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_per_span_partial_tail() {
        // 5 unit segments in spans of 2: the last span has one segment
        let points: Vec<_> = (0..6).map(|i| Point3::new(0.0, 0.0, f64::from(i))).collect();
        let uvs = generate_uvs(
            &UvMode::PerSpan {
                continuity: SpanContinuity::Restart,
            },
            &layout(6, 1, 2),
            &ArcLengthTable::build(&points),
            &SpanArcLengthTable::from_spans(&points, 2),
        )
        .unwrap()
        .unwrap();

        assert_relative_eq!(v(&uvs, 3), 0.5);
        assert_relative_eq!(v(&uvs, 4), 0.0);
        assert_relative_eq!(v(&uvs, 5), 1.0);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_zero_length_falls_back_to_stretched() {
        let points = vec![Point3::new(1.0, 1.0, 1.0); 5];
        let table = ArcLengthTable::build(&points);
        let uvs = generate_uvs(
            &UvMode::ArcLength,
            &layout(5, 1, 4),
            &table,
            &SpanArcLengthTable::default(),
        )
        .unwrap()
        .unwrap();
        assert_relative_eq!(v(&uvs, 2), 0.5);
        assert_relative_eq!(v(&uvs, 4), 1.0);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_none_mode() {
        let table = ArcLengthTable::build(&centreline(1, 3));
        let uvs = generate_uvs(
            &UvMode::None,
            &layout(4, 1, 3),
            &table,
            &SpanArcLengthTable::default(),
        )
        .unwrap();
        assert!(uvs.is_none());
    }

    #[test]
    fn test_table_mismatch() {
        let table = ArcLengthTable::build(&centreline(1, 3));
        let err = generate_uvs(
            &UvMode::ArcLength,
            &layout(5, 1, 4),
            &table,
            &SpanArcLengthTable::default(),
        );
        assert_eq!(
            err,
            Err(RibbonError::TableMismatch {
                expected: 5,
                actual: 4
            })
        );

        let points = centreline(2, 2);
        let err = generate_uvs(
            &UvMode::PerSpan {
                continuity: SpanContinuity::Restart,
            },
            &layout(5, 1, 2),
            &ArcLengthTable::build(&points),
            &SpanArcLengthTable::from_spans(&points, 4),
        );
        assert!(matches!(err, Err(RibbonError::TableMismatch { expected: 2, actual: 1 })));
    }

    #[test]
    fn test_layout_errors() {
        let table = ArcLengthTable::default();
        let spans = SpanArcLengthTable::default();
        assert!(
            generate_uvs(&UvMode::Stretched, &layout(1, 1, 1), &table, &spans)
                .is_err_and(|e| e.is_insufficient_samples())
        );
        assert!(
            generate_uvs(&UvMode::Stretched, &layout(3, 0, 1), &table, &spans)
                .is_err_and(|e| e.is_invalid_resolution())
        );
    }
}
