//! Ribbon generation parameters.

use nalgebra::Vector3;
use spline_curves::{DegeneratePolicy, FrameSampler, Placement, WrapPolicy};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{RibbonError, RibbonResult};

/// Where the rails sit relative to the curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WidthMode {
    /// Rails at `±width/2` along the binormal.
    #[default]
    Centered,
    /// Left rail at `width` along the binormal, right rail on the curve.
    OneSided,
}

/// Triangle vertex order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Winding {
    /// Faces point along the frame normal (`binormal × tangent`).
    #[default]
    Standard,
    /// Every triangle reversed.
    Reversed,
}

/// How per-span UVs behave across span boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpanContinuity {
    /// `v` runs 0 to 1 inside every span.
    #[default]
    Restart,
    /// `v` runs 0 to 1 over the whole ribbon, accumulated span by span.
    Continue,
}

/// Texture coordinate layout.
///
/// `u` always runs `x / rail_resolution` across the ribbon; the mode picks
/// how `v` advances along it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UvMode {
    /// No UV buffer.
    None,
    /// `v = y / (rows - 1)`, ignoring sample spacing.
    Stretched,
    /// `v` is the normalized arc length at the row.
    #[default]
    ArcLength,
    /// `v` is the arc length at the row times `scale`, for world-space tiling.
    Distance {
        /// Texture repeats per world unit.
        scale: f64,
    },
    /// `v` follows each span's own arc-length table.
    PerSpan {
        /// Boundary behavior.
        continuity: SpanContinuity,
    },
}

impl UvMode {
    /// Whether this mode produces a UV buffer.
    #[must_use]
    pub const fn emits_uvs(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Everything that shapes one ribbon generation call.
///
/// # Example
///
/// ```
/// use mesh_ribbon::{SplineDescriptor, UvMode, WidthMode};
///
/// let desc = SplineDescriptor::new()
///     .with_segments_per_span(24)
///     .with_rail_width(4.0)
///     .with_width_mode(WidthMode::OneSided)
///     .with_uv_mode(UvMode::Distance { scale: 0.25 });
///
/// assert!(desc.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SplineDescriptor {
    /// Close the curve on itself (Catmull-Rom only).
    pub looping: bool,
    /// Samples per span, excluding the shared joint.
    pub segments_per_span: usize,
    /// Distance between the rails.
    pub rail_width: f64,
    /// Quads across the ribbon between the two rails.
    pub rail_resolution: usize,
    /// Rail placement relative to the curve.
    pub width_mode: WidthMode,
    /// Up reference for binormals.
    pub up: Vector3<f64>,
    /// Texture coordinate layout.
    pub uv_mode: UvMode,
    /// Triangle vertex order.
    pub winding: Winding,
    /// Index wrap for looping Catmull-Rom splines.
    pub wrap_policy: WrapPolicy,
    /// Handling of rows without a frame.
    pub degenerate_policy: DegeneratePolicy,
    /// Include per-row tangents and binormals in the output.
    pub emit_frames: bool,
    /// Placement applied to the control points before sampling.
    pub placement: Option<Placement>,
}

impl Default for SplineDescriptor {
    fn default() -> Self {
        Self {
            looping: false,
            segments_per_span: 10,
            rail_width: 1.0,
            rail_resolution: 1,
            width_mode: WidthMode::default(),
            up: Vector3::y(),
            uv_mode: UvMode::default(),
            winding: Winding::default(),
            wrap_policy: WrapPolicy::default(),
            degenerate_policy: DegeneratePolicy::default(),
            emit_frames: false,
            placement: None,
        }
    }
}

impl SplineDescriptor {
    /// Create a descriptor with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a descriptor for a closed loop.
    #[must_use]
    pub fn closed_loop() -> Self {
        Self {
            looping: true,
            ..Self::default()
        }
    }

    /// Set whether the curve loops.
    #[must_use]
    pub const fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Set samples per span.
    #[must_use]
    pub const fn with_segments_per_span(mut self, segments: usize) -> Self {
        self.segments_per_span = segments;
        self
    }

    /// Set the rail width.
    #[must_use]
    pub const fn with_rail_width(mut self, width: f64) -> Self {
        self.rail_width = width;
        self
    }

    /// Set quads across the ribbon.
    #[must_use]
    pub const fn with_rail_resolution(mut self, resolution: usize) -> Self {
        self.rail_resolution = resolution;
        self
    }

    /// Set rail placement.
    #[must_use]
    pub const fn with_width_mode(mut self, mode: WidthMode) -> Self {
        self.width_mode = mode;
        self
    }

    /// Set the up reference.
    #[must_use]
    pub const fn with_up(mut self, up: Vector3<f64>) -> Self {
        self.up = up;
        self
    }

    /// Set the UV layout.
    #[must_use]
    pub const fn with_uv_mode(mut self, mode: UvMode) -> Self {
        self.uv_mode = mode;
        self
    }

    /// Set triangle winding.
    #[must_use]
    pub const fn with_winding(mut self, winding: Winding) -> Self {
        self.winding = winding;
        self
    }

    /// Set the looping index wrap.
    #[must_use]
    pub const fn with_wrap_policy(mut self, policy: WrapPolicy) -> Self {
        self.wrap_policy = policy;
        self
    }

    /// Set the degenerate row policy.
    #[must_use]
    pub const fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    /// Set whether frames are returned.
    #[must_use]
    pub const fn with_emit_frames(mut self, emit: bool) -> Self {
        self.emit_frames = emit;
        self
    }

    /// Place the control points before sampling.
    #[must_use]
    pub const fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Frame sampler matching this descriptor.
    #[must_use]
    pub fn frame_sampler(&self) -> FrameSampler {
        FrameSampler::new(self.up).with_policy(self.degenerate_policy)
    }

    /// Check the numeric parameters.
    ///
    /// # Errors
    ///
    /// - [`RibbonError::InvalidResolution`] if `segments_per_span` or
    ///   `rail_resolution` is zero
    /// - [`RibbonError::InvalidWidth`] if `rail_width` is not finite and positive
    pub fn validate(&self) -> RibbonResult<()> {
        if self.segments_per_span == 0 {
            return Err(RibbonError::invalid_resolution("segments_per_span", 0));
        }
        if self.rail_resolution == 0 {
            return Err(RibbonError::invalid_resolution("rail_resolution", 0));
        }
        if !self.rail_width.is_finite() || self.rail_width <= 0.0 {
            return Err(RibbonError::InvalidWidth(self.rail_width));
        }
        Ok(())
    }
}

/// The meshing subset of a descriptor, for callers that build rails
/// themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RibbonConfig {
    /// Quads across the ribbon.
    pub rail_resolution: usize,
    /// Texture coordinate layout.
    pub uv_mode: UvMode,
    /// Triangle vertex order.
    pub winding: Winding,
    /// Rows per span for [`UvMode::PerSpan`]; `None` treats all rows as one
    /// span.
    pub segments_per_span: Option<usize>,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            rail_resolution: 1,
            uv_mode: UvMode::default(),
            winding: Winding::default(),
            segments_per_span: None,
        }
    }
}

impl From<&SplineDescriptor> for RibbonConfig {
    fn from(desc: &SplineDescriptor) -> Self {
        Self {
            rail_resolution: desc.rail_resolution,
            uv_mode: desc.uv_mode,
            winding: desc.winding,
            segments_per_span: Some(desc.segments_per_span),
        }
    }
}

impl RibbonConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set quads across the ribbon.
    #[must_use]
    pub const fn with_rail_resolution(mut self, resolution: usize) -> Self {
        self.rail_resolution = resolution;
        self
    }

    /// Set the UV layout.
    #[must_use]
    pub const fn with_uv_mode(mut self, mode: UvMode) -> Self {
        self.uv_mode = mode;
        self
    }

    /// Set triangle winding.
    #[must_use]
    pub const fn with_winding(mut self, winding: Winding) -> Self {
        self.winding = winding;
        self
    }

    /// Set rows per span for per-span UVs.
    #[must_use]
    pub const fn with_segments_per_span(mut self, segments: usize) -> Self {
        self.segments_per_span = Some(segments);
        self
    }

    /// Check the numeric parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RibbonError::InvalidResolution`] if `rail_resolution` or an
    /// explicit `segments_per_span` is zero.
    pub fn validate(&self) -> RibbonResult<()> {
        if self.rail_resolution == 0 {
            return Err(RibbonError::invalid_resolution("rail_resolution", 0));
        }
        if self.segments_per_span == Some(0) {
            return Err(RibbonError::invalid_resolution("segments_per_span", 0));
        }
        Ok(())
    }
}
