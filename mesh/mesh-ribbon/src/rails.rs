//! Rail construction from sample frames.
//!
//! Each frame is offset along its binormal to give a left and a right rail
//! point. The ribbon surface is then spanned between the two rails row by
//! row.

use nalgebra::Point3;
use spline_curves::SampleFrame;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::WidthMode;

/// The two rail points of one ribbon row.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RailPair {
    /// Rail on the positive binormal side.
    pub left: Point3<f64>,
    /// Rail on the negative binormal side.
    pub right: Point3<f64>,
}

impl RailPair {
    /// Create a rail pair.
    #[must_use]
    pub const fn new(left: Point3<f64>, right: Point3<f64>) -> Self {
        Self { left, right }
    }

    /// Offset a frame by `width` according to `mode`.
    #[must_use]
    pub fn from_frame(frame: &SampleFrame, width: f64, mode: WidthMode) -> Self {
        match mode {
            WidthMode::Centered => {
                let half = width * 0.5;
                Self::new(frame.offset(half), frame.offset(-half))
            }
            WidthMode::OneSided => Self::new(frame.offset(width), frame.position),
        }
    }

    /// Point at `t` from left (`0`) to right (`1`).
    #[must_use]
    pub fn lerp(&self, t: f64) -> Point3<f64> {
        self.left + (self.right - self.left) * t
    }

    /// Midpoint between the rails.
    #[must_use]
    pub fn midpoint(&self) -> Point3<f64> {
        self.lerp(0.5)
    }

    /// Distance between the rails.
    #[must_use]
    pub fn width(&self) -> f64 {
        (self.right - self.left).norm()
    }
}

/// Build one rail pair per frame.
#[must_use]
pub fn build_rails(frames: &[SampleFrame], width: f64, mode: WidthMode) -> Vec<RailPair> {
    frames
        .iter()
        .map(|f| RailPair::from_frame(f, width, mode))
        .collect()
}
