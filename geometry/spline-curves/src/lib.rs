//! Spline evaluation for ribbon meshing.
//!
//! This crate evaluates the curve families used to lay out ribbon strips
//! (roads, rails, tracks, cables) and prepares everything a mesher needs
//! from them:
//!
//! - [`QuadraticChain`] / [`QuadraticBezier`] - quadratic Bézier chains (`2n+1` points)
//! - [`BezierChain`] / [`CubicBezier`] - cubic Bézier chains (`3n+1` points)
//! - [`CatmullRomSpline`] / [`CatmullRomSpan`] - uniform Catmull-Rom splines, open or looping
//! - [`Spline`] - one constructor for all three, selected by [`CurveKind`]
//!
//! # Pipeline
//!
//! 1. [`Spline::new`] snapshots the control points and checks their shape.
//! 2. [`Spline::sample`] evaluates every span at a fixed resolution, giving
//!    [`CurveSample`] rows with positions, unit tangents and cumulative
//!    arc length.
//! 3. [`FrameSampler`] derives a binormal per row against a fixed up vector.
//! 4. [`ArcLengthTable`] and [`SpanArcLengthTable`] map normalized positions
//!    to distances for texture coordinates.
//!
//! # Example
//!
//! ```
//! use spline_curves::{CurveKind, FrameSampler, Spline, WrapPolicy};
//! use nalgebra::Point3;
//!
//! let points = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(-2.5, 0.0, 2.5),
//!     Point3::new(2.5, 0.0, 7.5),
//!     Point3::new(0.0, 0.0, 10.0),
//! ];
//!
//! let spline = Spline::new(CurveKind::CubicBezier, &points, false, WrapPolicy::default())?;
//! let sampled = spline.sample(10)?;
//! assert_eq!(sampled.len(), 11);
//!
//! let frames = FrameSampler::default().frames(sampled.samples())?;
//! for frame in &frames.frames {
//!     // Binormals stay horizontal for a horizontal curve
//!     assert!(frame.binormal.y.abs() < 1e-12);
//! }
//!
//! let table = sampled.arc_length_table();
//! assert!(table.total_length() > 10.0);
//! # Ok::<(), spline_curves::CurveError>(())
//! ```
//!
//! # Looping
//!
//! Only Catmull-Rom splines wrap around a seam. How out-of-range control
//! indices are folded back is selected with [`WrapPolicy`]; see
//! [`wrap_index`].
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. All geometry is
//! `f64` and every call is a pure function of its inputs.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for all types

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::too_many_lines,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::suboptimal_flops,
    clippy::missing_const_for_fn,
    clippy::cast_lossless,
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    clippy::module_name_repetitions,
    clippy::option_if_let_else,
    clippy::uninlined_format_args,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::float_cmp,
    clippy::return_self_not_must_use
)]

mod arc_length;
mod bezier;
mod catmull_rom;
mod error;
mod frame;
mod placement;
mod spline;
mod traits;

pub use arc_length::{ArcLengthTable, SpanArcLengthTable, SpanProgress};
pub use bezier::{BezierChain, CubicBezier, QuadraticBezier, QuadraticChain};
pub use catmull_rom::{CatmullRomSpan, CatmullRomSpline, WrapPolicy, wrap_index};
pub use error::CurveError;
pub use frame::{
    DegeneratePolicy, FrameSampler, FrameSet, SampleFrame, TANGENT_EPSILON, binormal,
    unit_tangent,
};
pub use placement::Placement;
pub use spline::{CurveKind, CurveSample, SampledCurve, Span, Spline};
pub use traits::Curve;

/// Result type for curve operations.
pub type Result<T> = std::result::Result<T, CurveError>;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn test_public_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Spline>();
        assert_send_sync::<SampledCurve>();
        assert_send_sync::<CurveSample>();
        assert_send_sync::<FrameSampler>();
        assert_send_sync::<FrameSet>();
        assert_send_sync::<ArcLengthTable>();
        assert_send_sync::<SpanArcLengthTable>();
        assert_send_sync::<Placement>();
        assert_send_sync::<CurveError>();
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_straight_chain_end_to_end() {
        let points: Vec<_> = (0..4).map(|i| Point3::new(0.0, 0.0, f64::from(i))).collect();
        let spline = Spline::new(CurveKind::CubicBezier, &points, false, WrapPolicy::default())
            .unwrap();
        let sampled = spline.sample(6).unwrap();

        let frames = FrameSampler::default().frames(sampled.samples()).unwrap();
        assert!(frames.is_clean());
        for (frame, tangent) in frames.frames.iter().zip(sampled.tangents()) {
            let tangent = tangent.unwrap();
            assert_relative_eq!(tangent, Vector3::z(), epsilon = 1e-12);
            assert_relative_eq!(frame.binormal.dot(&tangent), 0.0, epsilon = 1e-12);
            assert_relative_eq!(frame.binormal.dot(&Vector3::y()), 0.0, epsilon = 1e-12);
        }

        assert_relative_eq!(sampled.total_length(), 3.0, epsilon = 1e-12);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_placed_spline_scales_length() {
        let points: Vec<_> = (0..4).map(|i| Point3::new(f64::from(i), 0.0, 0.0)).collect();
        let placement = Placement::identity().with_uniform_scale(2.0);

        let plain = Spline::new(CurveKind::CatmullRom, &points, false, WrapPolicy::default())
            .and_then(|s| s.sample(8))
            .unwrap();
        let placed = Spline::new(
            CurveKind::CatmullRom,
            &placement.apply(&points),
            false,
            WrapPolicy::default(),
        )
        .and_then(|s| s.sample(8))
        .unwrap();

        assert_relative_eq!(
            placed.total_length(),
            2.0 * plain.total_length(),
            epsilon = 1e-12
        );
    }
}
