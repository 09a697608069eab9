//! Homogeneous 4x4 transformation builders and Euler rotation state
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

use crate::error::GeometryResult;
use crate::vector::{orthonormal_basis, unit_axis};

/// Yaw/pitch/roll rotation state (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerAngles {
    /// Rotation around Z
    pub yaw: f64,
    /// Rotation around Y
    pub pitch: f64,
    /// Rotation around X
    pub roll: f64,
}

impl EulerAngles {
    pub fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self { yaw, pitch, roll }
    }

    pub fn from_degrees(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self::new(yaw.to_radians(), pitch.to_radians(), roll.to_radians())
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, d_yaw: f64, d_pitch: f64, d_roll: f64) {
        self.yaw += d_yaw;
        self.pitch += d_pitch;
        self.roll += d_roll;
    }

    /// `Rz(yaw) * Ry(pitch) * Rx(roll)`: roll is applied first.
    pub fn matrix(&self) -> Matrix4<f64> {
        let rz = Transform::rotation_z(self.yaw);
        let ry = Transform::rotation_y(self.pitch);
        let rx = Transform::rotation_x(self.roll);

        rz * ry * rx
    }
}

impl Default for EulerAngles {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for 3D transformations
///
/// Every builder returns a homogeneous matrix acting on column vectors.
/// Builders taking an axis normalize it and fail on a zero axis.
pub struct Transform;

impl Transform {
    /// Translation by `(tx, ty, tz)`; only the last column differs from identity.
    pub fn translation(tx: f64, ty: f64, tz: f64) -> Matrix4<f64> {
        let mut m = Matrix4::identity();
        m[(0, 3)] = tx;
        m[(1, 3)] = ty;
        m[(2, 3)] = tz;
        m
    }

    /// Rotation of `theta` radians about `axis` (Rodrigues' formula).
    ///
    /// Right-handed: rotating +X by 90 degrees about +Y gives -Z.
    pub fn rotation(axis: &Vector3<f64>, theta: f64) -> GeometryResult<Matrix4<f64>> {
        let n = unit_axis(axis)?;
        let (x, y, z) = (n.x, n.y, n.z);
        let (s, c) = theta.sin_cos();
        let t = 1.0 - c;

        Ok(Matrix4::new(
            c + x * x * t,     x * y * t - z * s, x * z * t + y * s, 0.0,
            y * x * t + z * s, c + y * y * t,     y * z * t - x * s, 0.0,
            z * x * t - y * s, z * y * t + x * s, c + z * z * t,     0.0,
            0.0,               0.0,               0.0,               1.0,
        ))
    }

    pub fn rotation_x(theta: f64) -> Matrix4<f64> {
        let (s, c) = theta.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,   -s,  0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn rotation_y(theta: f64) -> Matrix4<f64> {
        let (s, c) = theta.sin_cos();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
            -s,  0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn rotation_z(theta: f64) -> Matrix4<f64> {
        let (s, c) = theta.sin_cos();
        Matrix4::new(
            c,   -s,  0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Scale by `k` along `axis` only: `I + (k - 1) n n^T`.
    pub fn scaling(axis: &Vector3<f64>, k: f64) -> GeometryResult<Matrix4<f64>> {
        let n = unit_axis(axis)?;
        let block = Matrix3::identity() + (k - 1.0) * (n.into_inner() * n.transpose());
        Ok(block.to_homogeneous())
    }

    pub fn uniform_scaling(k: f64) -> Matrix4<f64> {
        Matrix3::from_diagonal_element(k).to_homogeneous()
    }

    /// Shear perpendicular to `axis`: `I + s u n^T + t v n^T`, where
    /// `(u, v, n)` is the frame from [`orthonormal_basis`].
    ///
    /// For `axis = +Z` the third column becomes `(s, t, 1)`.
    pub fn shear(axis: &Vector3<f64>, s: f64, t: f64) -> GeometryResult<Matrix4<f64>> {
        let n = unit_axis(axis)?;
        let (u, v) = orthonormal_basis(&n);
        let block = Matrix3::identity() + (s * u + t * v) * n.transpose();
        Ok(block.to_homogeneous())
    }

    /// `T(pivot) * rotation * T(-pivot)`: rotate about `pivot` instead of the origin.
    pub fn about_point(rotation: &Matrix4<f64>, pivot: &Point3<f64>) -> Matrix4<f64> {
        let to_origin = Self::translation(-pivot.x, -pivot.y, -pivot.z);
        let from_origin = Self::translation(pivot.x, pivot.y, pivot.z);
        from_origin * rotation * to_origin
    }

    /// Compose matrices given in application order: the first element acts first.
    ///
    /// `chain(&[t, r, s])` is `s * r * t`.
    pub fn chain(matrices: &[Matrix4<f64>]) -> Matrix4<f64> {
        matrices
            .iter()
            .fold(Matrix4::identity(), |acc, m| m * acc)
    }

    /// Upper-left 3x3 block for non-homogeneous callers.
    pub fn linear_part(m: &Matrix4<f64>) -> Matrix3<f64> {
        Matrix3::new(
            m[(0, 0)], m[(0, 1)], m[(0, 2)],
            m[(1, 0)], m[(1, 1)], m[(1, 2)],
            m[(2, 0)], m[(2, 1)], m[(2, 2)],
        )
    }

    /// Apply `m` to `p` in homogeneous coordinates and divide by the resulting `w`.
    ///
    /// When `w` is exactly zero the point lies on the projection's vanishing
    /// plane; `x, y, z` are returned undivided.
    pub fn apply_point(m: &Matrix4<f64>, p: &Point3<f64>) -> Point3<f64> {
        let h = m * p.to_homogeneous();
        if h.w == 0.0 {
            tracing::trace!(?p, "homogeneous w is zero, skipping divide");
            return Point3::new(h.x, h.y, h.z);
        }
        Point3::new(h.x / h.w, h.y / h.w, h.z / h.w)
    }

    /// Apply the 3x3 block of a non-homogeneous transform.
    pub fn apply_linear(m: &Matrix3<f64>, p: &Point3<f64>) -> Point3<f64> {
        Point3::from(m * p.coords)
    }
}

/// One link in a [`JointChain`]: a local rotation about a pivot point.
#[derive(Debug, Clone, Copy)]
pub struct Joint {
    /// Rest position of the joint; also the pivot its rotation turns about
    pub position: Point3<f64>,
    pub rotation: EulerAngles,
}

/// Posed joint: accumulated world matrix and transformed position.
#[derive(Debug, Clone, Copy)]
pub struct PosedJoint {
    pub world: Matrix4<f64>,
    pub position: Point3<f64>,
}

/// Hierarchical chain where each joint inherits every earlier joint's transform.
#[derive(Debug, Clone, Default)]
pub struct JointChain {
    pub joints: Vec<Joint>,
}

impl JointChain {
    pub fn new(joints: Vec<Joint>) -> Self {
        Self { joints }
    }

    /// World matrix of joint `i` is `world(i - 1) * T(p_i) * R_i * T(-p_i)`.
    pub fn pose(&self) -> Vec<PosedJoint> {
        let mut parent = Matrix4::identity();
        self.joints
            .iter()
            .map(|joint| {
                let local = Transform::about_point(&joint.rotation.matrix(), &joint.position);
                parent *= local;
                PosedJoint {
                    world: parent,
                    position: parent.transform_point(&joint.position),
                }
            })
            .collect()
    }
}
