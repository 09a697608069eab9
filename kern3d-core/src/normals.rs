//! Face and vertex normals for indexed triangle meshes.
//!
//! Face normals follow the winding order of each face: `(b - a) x (c - a)`.
//! Flipping the winding flips the normal, so loaders must keep the winding
//! they were given.

use nalgebra::{Point3, Vector3};

use crate::error::{GeometryError, GeometryResult};
use crate::mesh::{Mesh, Triangle};
use crate::vector::normalize_or_zero;

/// Centroid and unit normal of one face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceNormal {
    pub centroid: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl FaceNormal {
    /// Normal of a single triangle. Zero-area triangles get a zero normal.
    pub fn of(triangle: &Triangle) -> Self {
        let normal = triangle.normal();
        if normal == Vector3::zeros() {
            tracing::trace!(?triangle, "degenerate face, normal left at zero");
        }
        Self {
            centroid: triangle.centroid(),
            normal,
        }
    }
}

/// One [`FaceNormal`] per face, in face order.
pub fn face_normals(mesh: &Mesh) -> Vec<FaceNormal> {
    mesh.triangles().map(|tri| FaceNormal::of(&tri)).collect()
}

/// Per-vertex normals: the normalized mean of the incident face normals.
///
/// `face_normals` must hold one entry per face of `mesh`. A vertex with no
/// incident face keeps the zero vector.
pub fn vertex_normals(mesh: &Mesh, face_normals: &[FaceNormal]) -> GeometryResult<Vec<Vector3<f64>>> {
    if face_normals.len() != mesh.face_count() {
        return Err(GeometryError::LengthMismatch {
            expected: mesh.face_count(),
            actual: face_normals.len(),
        });
    }

    let mut sums = vec![Vector3::zeros(); mesh.vertex_count()];
    let mut counts = vec![0u32; mesh.vertex_count()];

    for (face, face_normal) in mesh.faces().iter().zip(face_normals) {
        for &index in face {
            sums[index] += face_normal.normal;
            counts[index] += 1;
        }
    }

    let isolated = counts.iter().filter(|&&c| c == 0).count();
    if isolated > 0 {
        tracing::debug!(isolated, "vertices without incident faces keep a zero normal");
    }

    Ok(sums
        .iter()
        .zip(&counts)
        .map(|(sum, &count)| {
            if count == 0 {
                Vector3::zeros()
            } else {
                normalize_or_zero(&(sum / f64::from(count)))
            }
        })
        .collect())
}
