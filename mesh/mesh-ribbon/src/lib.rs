//! Ribbon strip meshes along spline curves.
//!
//! This crate turns sampled curves into triangulated strips: two rails are
//! offset from the curve along its binormal, every row is interpolated
//! across the ribbon width, and consecutive rows are joined by quads.
//! Texture coordinates follow arc length so textures do not stretch where
//! samples bunch up.
//!
//! # Features
//!
//! - **Curve families**: cubic and quadratic Bézier chains, Catmull-Rom
//!   splines (open or looping), via [`spline_curves`]
//! - **Rails**: centred or one-sided width along the binormal
//! - **UV layouts**: stretched, arc-length, world-distance and per-span
//! - **Degenerate rows**: held, collapsed or rejected, and always reported
//!
//! # Quick Start
//!
//! ```
//! use mesh_ribbon::{SplineDescriptor, UvMode, generate_ribbon};
//! use spline_curves::CurveKind;
//! use nalgebra::Point3;
//!
//! let points: Vec<_> = (0..6)
//!     .map(|i| Point3::new(f64::from(i) * 4.0, 0.0, f64::from(i % 2) * 3.0))
//!     .collect();
//!
//! let desc = SplineDescriptor::new()
//!     .with_segments_per_span(12)
//!     .with_rail_width(2.0)
//!     .with_rail_resolution(2)
//!     .with_uv_mode(UvMode::ArcLength);
//!
//! let output = generate_ribbon(&points, CurveKind::CatmullRom, &desc)?;
//! let rows = 3 * 12 + 1;
//! assert_eq!(output.mesh.vertex_count(), rows * 3);
//! assert_eq!(output.mesh.index_count(), (rows - 1) * 2 * 6);
//! # Ok::<(), mesh_ribbon::RibbonError>(())
//! ```
//!
//! # Building from rails
//!
//! Callers that compute their own rails can skip the curve layer:
//!
//! ```
//! use mesh_ribbon::{RailPair, RibbonConfig, Winding, generate_ribbon_from_rails};
//! use nalgebra::Point3;
//!
//! let pairs = [
//!     RailPair::new(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)),
//!     RailPair::new(Point3::new(-1.0, 0.0, 5.0), Point3::new(1.0, 0.0, 5.0)),
//! ];
//! let config = RibbonConfig::new().with_winding(Winding::Reversed);
//! let mesh = generate_ribbon_from_rails(&pairs, &config)?;
//! assert_eq!(mesh.triangles, vec![[1, 2, 0], [3, 2, 1]]);
//! # Ok::<(), mesh_ribbon::RibbonError>(())
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::float_cmp,
    clippy::doc_markdown
)]

mod config;
mod error;
mod generate;
mod rails;
mod ribbon;
mod uv;

pub use config::{RibbonConfig, SpanContinuity, SplineDescriptor, UvMode, WidthMode, Winding};
pub use error::{RibbonError, RibbonResult};
pub use generate::{RibbonOutput, generate_ribbon, generate_ribbon_from_rails};
pub use rails::{RailPair, build_rails};
pub use ribbon::{MeshBuffers, ribbon_triangles, ribbon_vertices};
pub use uv::{UvLayout, generate_uvs};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SplineDescriptor>();
        assert_send_sync::<RibbonConfig>();
        assert_send_sync::<RailPair>();
        assert_send_sync::<MeshBuffers>();
        assert_send_sync::<RibbonOutput>();
        assert_send_sync::<RibbonError>();
    }
}
