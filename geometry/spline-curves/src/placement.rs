//! Rigid placement with scale for control point sets.
//!
//! A [`Placement`] is applied to a copy of the control points before a
//! spline is built, so positions, frames and arc lengths are all measured
//! in the placed space.

use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3, Vector4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Translation, rotation and per-axis scale, composed as `T · R · S`.
///
/// # Example
///
/// ```
/// use spline_curves::Placement;
/// use nalgebra::{Point3, Vector3};
///
/// let placement = Placement::identity()
///     .with_translation(Vector3::new(0.0, 1.0, 0.0))
///     .with_uniform_scale(2.0);
///
/// let placed = placement.apply(&[Point3::new(1.0, 0.0, 0.0)]);
/// assert_eq!(placed[0], Point3::new(2.0, 1.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Translation applied last.
    pub translation: Vector3<f64>,
    /// Rotation applied after scaling.
    pub rotation: UnitQuaternion<f64>,
    /// Per-axis scale applied first.
    pub scale: Vector3<f64>,
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

impl Placement {
    /// The identity placement.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Set the translation.
    #[must_use]
    pub const fn with_translation(mut self, translation: Vector3<f64>) -> Self {
        self.translation = translation;
        self
    }

    /// Set the rotation.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: UnitQuaternion<f64>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set a per-axis scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: Vector3<f64>) -> Self {
        self.scale = scale;
        self
    }

    /// Set the same scale on every axis.
    #[must_use]
    pub fn with_uniform_scale(self, factor: f64) -> Self {
        self.with_scale(Vector3::new(factor, factor, factor))
    }

    /// Homogeneous matrix `T · R · S`.
    #[must_use]
    pub fn matrix(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&self.translation)
            * self.rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Whether applying the placement leaves points unchanged.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Transform a single point.
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        let p = self.matrix() * Vector4::new(point.x, point.y, point.z, 1.0);
        Point3::new(p.x, p.y, p.z)
    }

    /// Transform a copy of `points`.
    #[must_use]
    pub fn apply(&self, points: &[Point3<f64>]) -> Vec<Point3<f64>> {
        let m = self.matrix();
        points
            .iter()
            .map(|point| {
                let p = m * Vector4::new(point.x, point.y, point.z, 1.0);
                Point3::new(p.x, p.y, p.z)
            })
            .collect()
    }
}
