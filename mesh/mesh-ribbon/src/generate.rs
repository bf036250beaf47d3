//! End-to-end ribbon generation.

use std::borrow::Cow;

use nalgebra::Point3;
use spline_curves::{ArcLengthTable, CurveKind, CurveSample, SpanArcLengthTable, Spline};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{RibbonConfig, SplineDescriptor};
use crate::error::{RibbonError, RibbonResult};
use crate::rails::{RailPair, build_rails};
use crate::ribbon::{MeshBuffers, ribbon_triangles, ribbon_vertices};
use crate::uv::{UvLayout, generate_uvs};

/// Result of [`generate_ribbon`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RibbonOutput {
    /// The mesh buffers.
    pub mesh: MeshBuffers,
    /// The curve samples the rows were built from.
    pub samples: Vec<CurveSample>,
    /// Rows whose frame was substituted under the degenerate policy.
    pub substituted_rows: Vec<usize>,
}

/// Generate a ribbon mesh along a spline.
///
/// The control points are copied (and placed, if the descriptor carries a
/// placement) before anything is evaluated. All parameters are checked
/// before any output buffer is allocated, so an error never leaves partial
/// buffers behind.
///
/// # Errors
///
/// - [`RibbonError::InvalidResolution`] / [`RibbonError::InvalidWidth`] from
///   [`SplineDescriptor::validate`]
/// - [`RibbonError::Curve`] if the point count does not fit `kind`, or no
///   frame can be derived under the degenerate policy
///
/// # Example
///
/// ```
/// use mesh_ribbon::{SplineDescriptor, generate_ribbon};
/// use spline_curves::CurveKind;
/// use nalgebra::Point3;
///
/// let points = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(-2.5, 0.0, 2.5),
///     Point3::new(2.5, 0.0, 7.5),
///     Point3::new(0.0, 0.0, 10.0),
/// ];
///
/// let desc = SplineDescriptor::new().with_segments_per_span(16).with_rail_width(2.0);
/// let output = generate_ribbon(&points, CurveKind::CubicBezier, &desc)?;
///
/// assert_eq!(output.mesh.vertex_count(), 17 * 2);
/// assert_eq!(output.mesh.index_count(), 16 * 6);
/// # Ok::<(), mesh_ribbon::RibbonError>(())
/// ```
pub fn generate_ribbon(
    points: &[Point3<f64>],
    kind: CurveKind,
    desc: &SplineDescriptor,
) -> RibbonResult<RibbonOutput> {
    desc.validate()?;

    let points: Cow<'_, [Point3<f64>]> = match &desc.placement {
        Some(placement) if !placement.is_identity() => Cow::Owned(placement.apply(points)),
        _ => Cow::Borrowed(points),
    };

    let spline = Spline::new(kind, &points, desc.looping, desc.wrap_policy)?;
    let sampled = spline.sample(desc.segments_per_span)?;
    let frames = desc.frame_sampler().frames(sampled.samples())?;

    let rails = build_rails(&frames.frames, desc.rail_width, desc.width_mode);
    let table = sampled.arc_length_table();
    let spans = sampled.span_tables();

    let mut mesh = assemble(
        &rails,
        &RibbonConfig::from(desc),
        desc.segments_per_span,
        &table,
        &spans,
    )?;

    if desc.emit_frames {
        mesh.tangents = Some(frames.tangents());
        mesh.binormals = Some(frames.binormals());
    }

    debug!(
        ?kind,
        spans = sampled.span_count(),
        rows = rails.len(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        substituted = frames.substituted.len(),
        "generated ribbon"
    );

    Ok(RibbonOutput {
        mesh,
        samples: sampled.into_samples(),
        substituted_rows: frames.substituted,
    })
}

/// Mesh rail pairs built by the caller.
///
/// Arc-length UVs are measured along the midpoints between the rails.
///
/// # Errors
///
/// - [`RibbonError::InvalidResolution`] if the config has a zero resolution
/// - [`RibbonError::InsufficientSamples`] with fewer than 2 rail pairs
///
/// # Example
///
/// ```
/// use mesh_ribbon::{RailPair, RibbonConfig, generate_ribbon_from_rails};
/// use nalgebra::Point3;
///
/// let pairs: Vec<_> = (0..4)
///     .map(|i| {
///         let z = f64::from(i);
///         RailPair::new(Point3::new(-1.0, 0.0, z), Point3::new(1.0, 0.0, z))
///     })
///     .collect();
///
/// let mesh = generate_ribbon_from_rails(&pairs, &RibbonConfig::new().with_rail_resolution(2))?;
/// assert_eq!(mesh.vertex_count(), 12);
/// assert_eq!(mesh.triangle_count(), 12);
/// # Ok::<(), mesh_ribbon::RibbonError>(())
/// ```
pub fn generate_ribbon_from_rails(
    pairs: &[RailPair],
    config: &RibbonConfig,
) -> RibbonResult<MeshBuffers> {
    config.validate()?;
    check_rows(pairs.len())?;

    let midpoints: Vec<Point3<f64>> = pairs.iter().map(RailPair::midpoint).collect();
    let segments_per_span = config.segments_per_span.unwrap_or(pairs.len() - 1);
    let table = ArcLengthTable::build(&midpoints);
    let spans = SpanArcLengthTable::from_spans(&midpoints, segments_per_span);

    assemble(pairs, config, segments_per_span, &table, &spans)
}

fn check_rows(rows: usize) -> RibbonResult<()> {
    if rows < 2 {
        return Err(RibbonError::InsufficientSamples {
            min: 2,
            actual: rows,
        });
    }
    Ok(())
}

fn assemble(
    pairs: &[RailPair],
    config: &RibbonConfig,
    segments_per_span: usize,
    table: &ArcLengthTable,
    spans: &SpanArcLengthTable,
) -> RibbonResult<MeshBuffers> {
    let layout = UvLayout {
        rows: pairs.len(),
        rail_resolution: config.rail_resolution,
        segments_per_span,
    };

    // Triangles and UVs validate the layout; vertices come last
    let triangles = ribbon_triangles(layout.rows, layout.rail_resolution, config.winding)?;
    let uvs = generate_uvs(&config.uv_mode, &layout, table, spans)?;
    let vertices = ribbon_vertices(pairs, layout.rail_resolution);

    let mesh = MeshBuffers {
        vertices,
        triangles,
        uvs,
        tangents: None,
        binormals: None,
    };
    mesh.validate()?;

    debug!(
        rows = layout.rows,
        rail_resolution = layout.rail_resolution,
        uv_mode = ?config.uv_mode,
        "assembled ribbon buffers"
    );

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{UvMode, Winding};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use spline_curves::{DegeneratePolicy, Placement, WrapPolicy};

    fn track() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(-2.5, 0.0, 2.5),
            Point3::new(2.5, 0.0, 7.5),
            Point3::new(0.0, 0.0, 10.0),
        ]
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_bezier_ribbon_sizes() {
        let desc = SplineDescriptor::new()
            .with_segments_per_span(8)
            .with_rail_resolution(3);
        let out = generate_ribbon(&track(), CurveKind::CubicBezier, &desc).unwrap();

        let rows = 9;
        assert_eq!(out.samples.len(), rows);
        assert_eq!(out.mesh.vertex_count(), rows * 4);
        assert_eq!(out.mesh.index_count(), (rows - 1) * 3 * 6);
        assert_eq!(out.mesh.uvs.as_ref().map(Vec::len), Some(rows * 4));
        assert!(out.mesh.tangents.is_none());
        assert!(out.substituted_rows.is_empty());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_rails_are_width_apart() {
        let desc = SplineDescriptor::new().with_rail_width(3.0);
        let out = generate_ribbon(&track(), CurveKind::CubicBezier, &desc).unwrap();
        for row in out.mesh.vertices.chunks(2) {
            assert_relative_eq!((row[1] - row[0]).norm(), 3.0, epsilon = 1e-9);
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_emit_frames() {
        let desc = SplineDescriptor::new().with_emit_frames(true);
        let out = generate_ribbon(&track(), CurveKind::CubicBezier, &desc).unwrap();

        let tangents = out.mesh.tangents.unwrap();
        let binormals = out.mesh.binormals.unwrap();
        assert_eq!(tangents.len(), out.samples.len());
        for (t, b) in tangents.iter().zip(&binormals) {
            assert_relative_eq!(t.dot(b), 0.0, epsilon = 1e-12);
            assert_relative_eq!(b.dot(&Vector3::y()), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_failures_produce_no_buffers() {
        let desc = SplineDescriptor::new().with_rail_resolution(0);
        let err = generate_ribbon(&track(), CurveKind::CubicBezier, &desc);
        assert!(err.is_err_and(|e| e.is_invalid_resolution()));

        let err = generate_ribbon(&track()[..3], CurveKind::CubicBezier, &SplineDescriptor::new());
        assert!(err.is_err_and(|e| e.is_invalid_count()));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_placement_moves_geometry() {
        let placement = Placement::identity()
            .with_translation(Vector3::new(100.0, 0.0, 0.0))
            .with_uniform_scale(2.0);
        let plain = generate_ribbon(&track(), CurveKind::CubicBezier, &SplineDescriptor::new())
            .unwrap();
        let placed = generate_ribbon(
            &track(),
            CurveKind::CubicBezier,
            &SplineDescriptor::new().with_placement(placement),
        )
        .unwrap();

        let first = placed.samples[0].position;
        assert_relative_eq!(first.coords, Vector3::new(100.0, 0.0, 0.0), epsilon = 1e-12);

        let plain_len = plain.samples.last().unwrap().arc_length;
        let placed_len = placed.samples.last().unwrap().arc_length;
        assert_relative_eq!(placed_len, 2.0 * plain_len, epsilon = 1e-9);

        // Normalized UVs do not depend on scale
        let (plain_uvs, placed_uvs) = (plain.mesh.uvs.unwrap(), placed.mesh.uvs.unwrap());
        assert_eq!(plain_uvs.len(), placed_uvs.len());
        for (a, b) in plain_uvs.iter().zip(&placed_uvs) {
            assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_vertical_run_holds_frames() {
        // Straight up the y axis: no binormal anywhere except the bend
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
            Point3::new(0.0, 3.0, 1.0),
            Point3::new(0.0, 3.0, 2.0),
            Point3::new(0.0, 3.0, 3.0),
        ];
        let desc = SplineDescriptor::new().with_segments_per_span(4);
        let out = generate_ribbon(&points, CurveKind::CubicBezier, &desc).unwrap();

        // Rows 0..=3 run straight up; the joint and the second span are regular
        assert_eq!(out.substituted_rows, vec![0, 1, 2, 3]);

        let strict = desc.with_degenerate_policy(DegeneratePolicy::Fail);
        let err = generate_ribbon(&points, CurveKind::CubicBezier, &strict);
        assert!(err.is_err_and(|e| e.is_degenerate_tangent()));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_looping_catmull_rom() {
        let points: Vec<_> = (0..6)
            .map(|i| {
                let a = std::f64::consts::TAU * f64::from(i) / 6.0;
                Point3::new(5.0 * a.cos(), 0.0, 5.0 * a.sin())
            })
            .collect();
        let desc = SplineDescriptor::closed_loop()
            .with_segments_per_span(5)
            .with_wrap_policy(WrapPolicy::Modular);
        let out = generate_ribbon(&points, CurveKind::CatmullRom, &desc).unwrap();

        assert_eq!(out.samples.len(), 6 * 5 + 1);
        assert_eq!(out.mesh.index_count(), 6 * 5 * 6);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_reversed_winding() {
        let standard = generate_ribbon(&track(), CurveKind::CubicBezier, &SplineDescriptor::new())
            .unwrap();
        let reversed = generate_ribbon(
            &track(),
            CurveKind::CubicBezier,
            &SplineDescriptor::new().with_winding(Winding::Reversed),
        )
        .unwrap();

        for (a, b) in standard.mesh.triangles.iter().zip(&reversed.mesh.triangles) {
            assert_eq!([a[2], a[1], a[0]], *b);
        }
        assert_eq!(standard.mesh.vertices, reversed.mesh.vertices);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_from_rails() {
        let pairs: Vec<_> = [0.0, 1.0, 3.0]
            .iter()
            .map(|&z| RailPair::new(Point3::new(-1.0, 0.0, z), Point3::new(1.0, 0.0, z)))
            .collect();

        let mesh = generate_ribbon_from_rails(&pairs, &RibbonConfig::new()).unwrap();
        let uvs = mesh.uvs.unwrap();
        assert_relative_eq!(uvs[2].y, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(uvs[5].y, 1.0, epsilon = 1e-12);

        let err = generate_ribbon_from_rails(&pairs[..1], &RibbonConfig::new());
        assert_eq!(
            err,
            Err(RibbonError::InsufficientSamples { min: 2, actual: 1 })
        );

        let mesh = generate_ribbon_from_rails(
            &pairs,
            &RibbonConfig::new().with_uv_mode(UvMode::None),
        )
        .unwrap();
        assert!(mesh.uvs.is_none());
    }
}
