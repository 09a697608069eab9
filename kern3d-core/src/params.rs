//! Per-frame transform parameters.
//!
//! A UI layer collects slider state into one immutable [`TransformParams`]
//! value per tick and hands it to the kernel, which turns it into a single
//! homogeneous matrix. Parameters can round-trip through RON text so that a
//! host application can persist or script them.

use nalgebra::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::GeometryResult;
use crate::mesh::Mesh;
use crate::projection::ProjectionMode;
use crate::transform::Transform;

/// Transform parameters for one frame.
///
/// Angles are in radians. Missing fields in RON input take their
/// [`Default`] value, which is the identity transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParams {
    pub translation: [f64; 3],
    /// Axis shared by rotation, axis scaling and shear
    pub axis: [f64; 3],
    pub angle: f64,
    pub scale: f64,
    pub shear_s: f64,
    pub shear_t: f64,
    pub projection: ProjectionMode,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            translation: [0.0; 3],
            axis: [0.0, 1.0, 0.0],
            angle: 0.0,
            scale: 1.0,
            shear_s: 0.0,
            shear_t: 0.0,
            projection: ProjectionMode::Identity,
        }
    }
}

impl TransformParams {
    /// Parse parameters from RON text.
    pub fn from_ron(text: &str) -> GeometryResult<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn to_ron(&self) -> GeometryResult<String> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Copy with the rotation angle given in degrees.
    pub fn with_angle_degrees(self, degrees: f64) -> Self {
        Self {
            angle: degrees.to_radians(),
            ..self
        }
    }

    /// The composed matrix.
    ///
    /// Application order: translation, rotation about `axis`, scaling along
    /// `axis`, shear perpendicular to `axis`, then projection.
    ///
    /// # Errors
    ///
    /// Returns an error if `axis` (or an orthographic projection axis) is zero.
    pub fn matrix(&self) -> GeometryResult<Matrix4<f64>> {
        let axis = Vector3::from(self.axis);
        let [tx, ty, tz] = self.translation;

        Ok(Transform::chain(&[
            Transform::translation(tx, ty, tz),
            Transform::rotation(&axis, self.angle)?,
            Transform::scaling(&axis, self.scale)?,
            Transform::shear(&axis, self.shear_s, self.shear_t)?,
            self.projection.matrix()?,
        ]))
    }

    /// Transform `mesh` into a fresh vertex buffer.
    pub fn apply(&self, mesh: &Mesh) -> GeometryResult<Vec<nalgebra::Point3<f64>>> {
        let matrix = self.matrix()?;
        tracing::debug!(vertices = mesh.vertex_count(), params = ?self, "applying transform parameters");
        Ok(mesh.transform_vertices(&matrix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_default_is_identity() {
        let m = TransformParams::default().matrix().unwrap();
        assert!((m - Matrix4::identity()).norm() < 1e-12);
    }

    #[test]
    fn test_parse_partial_ron() {
        let params = TransformParams::from_ron(
            "(translation: (1.0, 2.0, 3.0), angle: 0.5, projection: Perspective(distance: 4.0))",
        )
        .unwrap();
        assert_eq!(params.translation, [1.0, 2.0, 3.0]);
        assert_eq!(params.angle, 0.5);
        assert_eq!(params.scale, 1.0);
        assert_eq!(params.axis, [0.0, 1.0, 0.0]);
        assert_eq!(params.projection, ProjectionMode::Perspective { distance: 4.0 });
    }

    #[test]
    fn test_ron_round_trip() {
        let params = TransformParams {
            scale: 2.5,
            shear_s: 0.25,
            projection: ProjectionMode::Orthographic { axis: [0.0, 0.0, 1.0] },
            ..TransformParams::default()
        };
        let text = params.to_ron().unwrap();
        assert_eq!(TransformParams::from_ron(&text).unwrap(), params);
    }

    #[test]
    fn test_bad_ron() {
        assert!(TransformParams::from_ron("(scale: \"big\")").is_err());
    }

    #[test]
    fn test_translate_then_rotate() {
        let params = TransformParams {
            translation: [1.0, 0.0, 0.0],
            ..TransformParams::default()
        }
        .with_angle_degrees(90.0);

        let m = params.matrix().unwrap();
        let p = Transform::apply_point(&m, &Point3::origin());
        // Translated to +X first, then rotated about +Y onto -Z.
        assert!((p - Point3::new(0.0, 0.0, -1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_zero_axis_is_error() {
        let params = TransformParams {
            axis: [0.0; 3],
            ..TransformParams::default()
        };
        assert!(params.matrix().is_err());
    }

    #[test]
    fn test_apply_flattens_mesh() {
        let params = TransformParams {
            projection: ProjectionMode::Orthographic { axis: [0.0, 1.0, 0.0] },
            ..TransformParams::default()
        };
        let cube = Mesh::cube(2.0);
        let flat = params.apply(&cube).unwrap();
        assert_eq!(flat.len(), cube.vertex_count());
        assert!(flat.iter().all(|p| p.y == 0.0));
    }
}
