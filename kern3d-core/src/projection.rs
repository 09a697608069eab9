//! Orthographic and perspective projection matrices
use nalgebra::{Matrix3, Matrix4, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::GeometryResult;
use crate::transform::Transform;
use crate::vector::unit_axis;

/// Focal distance substituted for `d == 0` in [`perspective`].
pub const PERSPECTIVE_EPSILON: f64 = 1e-10;

/// Projection stage applied last in a transform pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectionMode {
    Identity,
    /// Flatten onto the plane through the origin with normal `axis`
    Orthographic { axis: [f64; 3] },
    /// Divide by depth along +Z at focal distance `distance`
    Perspective { distance: f64 },
}

impl ProjectionMode {
    pub fn matrix(&self) -> GeometryResult<Matrix4<f64>> {
        match *self {
            ProjectionMode::Identity => Ok(Matrix4::identity()),
            ProjectionMode::Orthographic { axis } => orthographic(&Vector3::from(axis)),
            ProjectionMode::Perspective { distance } => Ok(perspective(distance)),
        }
    }
}

impl Default for ProjectionMode {
    fn default() -> Self {
        ProjectionMode::Identity
    }
}

/// Orthographic projection onto the plane with normal `axis`: `I - n n^T`.
///
/// Idempotent, and maps `axis` itself to the zero vector.
pub fn orthographic(axis: &Vector3<f64>) -> GeometryResult<Matrix4<f64>> {
    let n = unit_axis(axis)?;
    let block = Matrix3::identity() - n.into_inner() * n.transpose();
    Ok(block.to_homogeneous())
}

/// Perspective projection with focal distance `d`.
///
/// The last row is `(0, 0, 1/d, 0)`, so after the homogeneous divide a point
/// `(x, y, z)` lands at `(d x / z, d y / z, d)`. A zero `d` is replaced by
/// [`PERSPECTIVE_EPSILON`]; callers must not rely on exact-zero behavior.
pub fn perspective(d: f64) -> Matrix4<f64> {
    let d = if d == 0.0 {
        tracing::debug!("perspective focal distance is zero, substituting {PERSPECTIVE_EPSILON}");
        PERSPECTIVE_EPSILON
    } else {
        d
    };

    let mut m = Matrix4::identity();
    m[(3, 2)] = 1.0 / d;
    m[(3, 3)] = 0.0;
    m
}

/// Orthographic projection for 3x3 (non-homogeneous) callers.
pub fn orthographic_linear(axis: &Vector3<f64>) -> GeometryResult<Matrix3<f64>> {
    orthographic(axis).map(|m| Transform::linear_part(&m))
}
