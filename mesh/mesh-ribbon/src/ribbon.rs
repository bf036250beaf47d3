//! Ribbon vertex and triangle layout.
//!
//! Vertices are laid out row-major: row `y` holds `rail_resolution + 1`
//! points interpolated from the left rail to the right rail. Each cell
//! between rows `y` and `y + 1` and columns `x` and `x + 1` becomes two
//! triangles.

use nalgebra::{Point2, Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::RailPair;
use crate::config::Winding;
use crate::error::{RibbonError, RibbonResult};

/// Output buffers of a ribbon mesh.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshBuffers {
    /// Vertex positions, row-major.
    pub vertices: Vec<Point3<f64>>,
    /// Triangle vertex indices.
    pub triangles: Vec<[u32; 3]>,
    /// One UV per vertex, when requested.
    pub uvs: Option<Vec<Point2<f64>>>,
    /// One tangent per row, when requested.
    pub tangents: Option<Vec<Vector3<f64>>>,
    /// One binormal per row, when requested.
    pub binormals: Option<Vec<Vector3<f64>>>,
}

impl MeshBuffers {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of indices in the flattened index buffer.
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Whether the mesh has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Flattened index buffer.
    #[must_use]
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Check the buffer invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RibbonError::IndexOutOfRange`] if a triangle references a
    /// missing vertex, or [`RibbonError::TableMismatch`] if the UV buffer
    /// length differs from the vertex count.
    pub fn validate(&self) -> RibbonResult<()> {
        let len = self.vertices.len();
        if let Some(&index) = self.triangles.iter().flatten().find(|&&i| i as usize >= len) {
            return Err(RibbonError::IndexOutOfRange {
                index: index as usize,
                len,
            });
        }
        if let Some(uvs) = &self.uvs {
            if uvs.len() != len {
                return Err(RibbonError::TableMismatch {
                    expected: len,
                    actual: uvs.len(),
                });
            }
        }
        Ok(())
    }
}

/// Interpolate `rail_resolution + 1` vertices across every rail pair.
#[must_use]
pub fn ribbon_vertices(pairs: &[RailPair], rail_resolution: usize) -> Vec<Point3<f64>> {
    let res = rail_resolution.max(1);
    let mut vertices = Vec::with_capacity(pairs.len() * (res + 1));
    for pair in pairs {
        for x in 0..=res {
            vertices.push(pair.lerp(x as f64 / res as f64));
        }
    }
    vertices
}

/// Triangulate a grid of `rows × (rail_resolution + 1)` vertices.
///
/// For `vi = y·(res+1) + x` each cell emits `(vi, vi+res+1, vi+1)` and
/// `(vi+1, vi+res+1, vi+res+2)`, reversed under [`Winding::Reversed`].
///
/// # Errors
///
/// - [`RibbonError::InvalidResolution`] if `rail_resolution == 0`
/// - [`RibbonError::InsufficientSamples`] if `rows < 2`
/// - [`RibbonError::IndexOutOfRange`] if the vertex count does not fit `u32`
///   or the buffer does not come out at exactly `(rows-1)·res·2` triangles
///
/// # Example
///
/// ```
/// use mesh_ribbon::{Winding, ribbon_triangles};
///
/// let tris = ribbon_triangles(3, 2, Winding::Standard)?;
/// assert_eq!(tris.len() * 3, (3 - 1) * 2 * 6);
/// assert_eq!(tris[0], [0, 3, 1]);
/// assert_eq!(tris[1], [1, 3, 4]);
/// # Ok::<(), mesh_ribbon::RibbonError>(())
/// ```
pub fn ribbon_triangles(
    rows: usize,
    rail_resolution: usize,
    winding: Winding,
) -> RibbonResult<Vec<[u32; 3]>> {
    if rail_resolution == 0 {
        return Err(RibbonError::invalid_resolution("rail_resolution", 0));
    }
    if rows < 2 {
        return Err(RibbonError::InsufficientSamples {
            min: 2,
            actual: rows,
        });
    }

    let res = rail_resolution;
    let stride = res + 1;
    let vertex_count = rows.saturating_mul(stride);
    if u32::try_from(vertex_count).is_err() {
        return Err(RibbonError::IndexOutOfRange {
            index: vertex_count,
            len: u32::MAX as usize,
        });
    }

    let expected = (rows - 1) * res * 2;
    let mut triangles = Vec::with_capacity(expected);

    for y in 0..rows - 1 {
        for x in 0..res {
            let vi = (y * stride + x) as u32;
            let below = vi + stride as u32;

            let a = [vi, below, vi + 1];
            let b = [vi + 1, below, below + 1];

            match winding {
                Winding::Standard => {
                    triangles.push(a);
                    triangles.push(b);
                }
                Winding::Reversed => {
                    triangles.push([a[2], a[1], a[0]]);
                    triangles.push([b[2], b[1], b[0]]);
                }
            }
        }
    }

    if triangles.len() != expected {
        return Err(RibbonError::IndexOutOfRange {
            index: triangles.len() * 3,
            len: expected * 3,
        });
    }

    Ok(triangles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn strip(rows: usize) -> Vec<RailPair> {
        (0..rows)
            .map(|i| {
                let z = i as f64;
                RailPair::new(Point3::new(-1.0, 0.0, z), Point3::new(1.0, 0.0, z))
            })
            .collect()
    }

    #[test]
    fn test_vertices_are_row_major() {
        let vertices = ribbon_vertices(&strip(3), 4);
        assert_eq!(vertices.len(), 3 * 5);
        assert_relative_eq!(vertices[0].x, -1.0);
        assert_relative_eq!(vertices[2].x, 0.0);
        assert_relative_eq!(vertices[4].x, 1.0);
        assert_relative_eq!(vertices[5].z, 1.0);
        assert_relative_eq!(vertices[5].x, -1.0);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_triangle_count_and_bounds() {
        for rows in 2..6 {
            for res in 1..5 {
                let tris = ribbon_triangles(rows, res, Winding::Standard).unwrap();
                assert_eq!(tris.len() * 3, (rows - 1) * res * 6);
                let vertex_count = (rows * (res + 1)) as u32;
                assert!(tris.iter().flatten().all(|&i| i < vertex_count));
            }
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_single_quad() {
        let tris = ribbon_triangles(2, 1, Winding::Standard).unwrap();
        assert_eq!(tris, vec![[0, 2, 1], [1, 2, 3]]);

        let reversed = ribbon_triangles(2, 1, Winding::Reversed).unwrap();
        assert_eq!(reversed, vec![[1, 2, 0], [3, 2, 1]]);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_standard_winding_faces_up() {
        // Left rail at -x, rows advancing along +z: faces point to +y
        let vertices = ribbon_vertices(&strip(2), 1);
        let tris = ribbon_triangles(2, 1, Winding::Standard).unwrap();
        for [a, b, c] in tris {
            let (a, b, c) = (vertices[a as usize], vertices[b as usize], vertices[c as usize]);
            let n = (b - a).cross(&(c - a));
            assert!(n.y > 0.0);
        }
    }

    #[test]
    fn test_rejects_bad_layout() {
        assert!(matches!(
            ribbon_triangles(1, 1, Winding::Standard),
            Err(RibbonError::InsufficientSamples { min: 2, actual: 1 })
        ));
        assert!(
            ribbon_triangles(4, 0, Winding::Standard).is_err_and(|e| e.is_invalid_resolution())
        );
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let err = ribbon_triangles(usize::MAX / 4, 1, Winding::Standard);
        assert!(matches!(err, Err(RibbonError::IndexOutOfRange { .. })));
    }

    #[test]
    fn test_buffer_validation() {
        let mut mesh = MeshBuffers {
            vertices: ribbon_vertices(&strip(2), 1),
            triangles: vec![[0, 2, 1], [1, 2, 3]],
            ..MeshBuffers::default()
        };
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.indices(), vec![0, 2, 1, 1, 2, 3]);
        assert_eq!(mesh.index_count(), 6);

        mesh.uvs = Some(vec![Point2::origin(); 3]);
        assert!(matches!(
            mesh.validate(),
            Err(RibbonError::TableMismatch {
                expected: 4,
                actual: 3
            })
        ));

        mesh.uvs = None;
        mesh.triangles.push([0, 1, 4]);
        assert!(matches!(
            mesh.validate(),
            Err(RibbonError::IndexOutOfRange { index: 4, len: 4 })
        ));
    }
}
