//! Tangent and binormal frames along sampled curves.
//!
//! Ribbons are oriented against a fixed up reference: the binormal at each
//! sample is `normalize(tangent × up)` and the surface normal completes the
//! basis as `binormal × tangent`. Rows where this is undefined (a vanishing
//! derivative, or a tangent parallel to up) are resolved by a
//! [`DegeneratePolicy`] and always reported back to the caller.

use nalgebra::{Point3, Vector3};
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CurveError, CurveSample, Result};

/// Magnitude below which a derivative or cross product counts as zero.
pub const TANGENT_EPSILON: f64 = 1e-9;

/// Normalize a derivative into a unit tangent.
///
/// # Errors
///
/// Returns [`CurveError::VanishingDerivative`] if `|derivative| < TANGENT_EPSILON`.
/// Callers that know the sample row attach it with [`CurveError::at_sample`].
///
/// # Example
///
/// ```
/// use spline_curves::unit_tangent;
/// use nalgebra::Vector3;
///
/// let t = unit_tangent(Vector3::new(0.0, 0.0, 4.0))?;
/// assert_eq!(t, Vector3::z());
/// assert!(unit_tangent(Vector3::zeros()).is_err());
/// # Ok::<(), spline_curves::CurveError>(())
/// ```
pub fn unit_tangent(derivative: Vector3<f64>) -> Result<Vector3<f64>> {
    let magnitude = derivative.norm();
    if !magnitude.is_finite() || magnitude < TANGENT_EPSILON {
        return Err(CurveError::vanishing_derivative(magnitude));
    }
    Ok(derivative / magnitude)
}

/// Binormal of a tangent against an up reference: `normalize(tangent × up)`.
///
/// Returns `None` when the tangent is (anti)parallel to `up` or either vector
/// is zero.
#[must_use]
pub fn binormal(tangent: &Vector3<f64>, up: &Vector3<f64>) -> Option<Vector3<f64>> {
    let cross = tangent.cross(up);
    let norm = cross.norm();
    if norm.is_finite() && norm >= TANGENT_EPSILON {
        Some(cross / norm)
    } else {
        None
    }
}

/// The frame attached to one sample row.
///
/// For a regular row the three vectors are orthonormal, with
/// `normal = binormal × tangent`. A collapsed row has a zero binormal and
/// normal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleFrame {
    /// Sample position.
    pub position: Point3<f64>,
    /// Unit tangent (forward direction).
    pub tangent: Vector3<f64>,
    /// Unit binormal, the direction rails are offset along.
    pub binormal: Vector3<f64>,
    /// Surface normal of the ribbon at this row.
    pub normal: Vector3<f64>,
}

impl SampleFrame {
    /// Build a frame from a unit tangent and an up reference.
    ///
    /// Returns `None` if the tangent is parallel to `up`.
    #[must_use]
    pub fn from_tangent_and_up(
        position: Point3<f64>,
        tangent: Vector3<f64>,
        up: &Vector3<f64>,
    ) -> Option<Self> {
        let b = binormal(&tangent, up)?;
        Some(Self {
            position,
            tangent,
            binormal: b,
            normal: b.cross(&tangent),
        })
    }

    /// A frame with no lateral extent.
    #[must_use]
    pub fn collapsed(position: Point3<f64>, tangent: Option<Vector3<f64>>) -> Self {
        Self {
            position,
            tangent: tangent.unwrap_or_else(Vector3::zeros),
            binormal: Vector3::zeros(),
            normal: Vector3::zeros(),
        }
    }

    /// Same orientation, moved to another position.
    #[must_use]
    pub fn moved_to(&self, position: Point3<f64>) -> Self {
        Self { position, ..*self }
    }

    /// Point at `distance` along the binormal.
    #[must_use]
    pub fn offset(&self, distance: f64) -> Point3<f64> {
        self.position + self.binormal * distance
    }

    /// Whether the binormal is zero.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.binormal.norm_squared() == 0.0
    }

    /// Check if the frame is orthonormal within tolerance.
    #[must_use]
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let t_len = (self.tangent.norm() - 1.0).abs();
        let n_len = (self.normal.norm() - 1.0).abs();
        let b_len = (self.binormal.norm() - 1.0).abs();
        let tn_dot = self.tangent.dot(&self.normal).abs();
        let tb_dot = self.tangent.dot(&self.binormal).abs();
        let nb_dot = self.normal.dot(&self.binormal).abs();

        t_len < tolerance
            && n_len < tolerance
            && b_len < tolerance
            && tn_dot < tolerance
            && tb_dot < tolerance
            && nb_dot < tolerance
    }
}

/// How rows without a well-defined frame are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DegeneratePolicy {
    /// Reuse the nearest earlier valid frame (leading rows use the first
    /// valid one).
    #[default]
    HoldPrevious,
    /// Give the row a zero binormal so both rails meet at the centreline.
    Collapse,
    /// Fail on the first degenerate row.
    Fail,
}

/// Frames for a whole sample sequence.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameSet {
    /// One frame per sample.
    pub frames: Vec<SampleFrame>,
    /// Rows whose frame was substituted under the policy, ascending.
    pub substituted: Vec<usize>,
}

impl FrameSet {
    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// True if no row needed substitution.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.substituted.is_empty()
    }

    /// Tangent per row.
    #[must_use]
    pub fn tangents(&self) -> Vec<Vector3<f64>> {
        self.frames.iter().map(|f| f.tangent).collect()
    }

    /// Binormal per row.
    #[must_use]
    pub fn binormals(&self) -> Vec<Vector3<f64>> {
        self.frames.iter().map(|f| f.binormal).collect()
    }

    /// Surface normal per row.
    #[must_use]
    pub fn normals(&self) -> Vec<Vector3<f64>> {
        self.frames.iter().map(|f| f.normal).collect()
    }
}

/// Computes binormal frames for sampled curves against a fixed up vector.
///
/// # Example
///
/// ```
/// use spline_curves::{CurveKind, FrameSampler, Spline, WrapPolicy};
/// use nalgebra::Point3;
///
/// let points = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
///     Point3::new(0.0, 0.0, 2.0),
///     Point3::new(0.0, 0.0, 3.0),
/// ];
/// let spline = Spline::new(CurveKind::CubicBezier, &points, false, WrapPolicy::default())?;
/// let sampled = spline.sample(8)?;
///
/// let frames = FrameSampler::default().frames(sampled.samples())?;
/// assert_eq!(frames.len(), 9);
/// assert!(frames.is_clean());
/// # Ok::<(), spline_curves::CurveError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameSampler {
    /// Up reference the binormal is taken against.
    pub up: Vector3<f64>,
    /// Handling of rows without a frame.
    pub policy: DegeneratePolicy,
}

impl Default for FrameSampler {
    fn default() -> Self {
        Self {
            up: Vector3::y(),
            policy: DegeneratePolicy::HoldPrevious,
        }
    }
}

impl FrameSampler {
    /// Create a sampler with the given up reference.
    #[must_use]
    pub fn new(up: Vector3<f64>) -> Self {
        Self {
            up,
            ..Self::default()
        }
    }

    /// Set the degenerate row policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build one frame per sample.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DegenerateTangent`] when the policy is
    /// [`DegeneratePolicy::Fail`] and a row is degenerate, or when the policy
    /// is [`DegeneratePolicy::HoldPrevious`] and no row has a valid frame.
    pub fn frames(&self, samples: &[CurveSample]) -> Result<FrameSet> {
        let resolved: Vec<Option<SampleFrame>> = samples
            .iter()
            .map(|s| {
                s.tangent
                    .and_then(|t| SampleFrame::from_tangent_and_up(s.position, t, &self.up))
            })
            .collect();

        let substituted: Vec<usize> = resolved
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.is_none().then_some(i))
            .collect();

        let frames = match self.policy {
            DegeneratePolicy::Fail => {
                if let Some(&row) = substituted.first() {
                    return Err(CurveError::degenerate_tangent(
                        row,
                        self.degeneracy_magnitude(&samples[row]),
                    ));
                }
                resolved.into_iter().flatten().collect()
            }
            DegeneratePolicy::Collapse => resolved
                .into_iter()
                .zip(samples)
                .map(|(f, s)| f.unwrap_or_else(|| SampleFrame::collapsed(s.position, s.tangent)))
                .collect(),
            DegeneratePolicy::HoldPrevious => {
                let Some(first_valid) = resolved.iter().flatten().next().copied() else {
                    return match samples.first() {
                        Some(s) => Err(CurveError::degenerate_tangent(
                            0,
                            self.degeneracy_magnitude(s),
                        )),
                        None => Ok(FrameSet::default()),
                    };
                };

                let mut held = first_valid;
                resolved
                    .into_iter()
                    .zip(samples)
                    .map(|(f, s)| match f {
                        Some(frame) => {
                            held = frame;
                            frame
                        }
                        None => held.moved_to(s.position),
                    })
                    .collect()
            }
        };

        if !substituted.is_empty() {
            warn!(
                rows = ?substituted,
                policy = ?self.policy,
                "substituted frames for degenerate samples"
            );
        }

        Ok(FrameSet {
            frames,
            substituted,
        })
    }

    fn degeneracy_magnitude(&self, sample: &CurveSample) -> f64 {
        sample
            .tangent
            .map_or(0.0, |t| t.cross(&self.up).norm())
    }
}
