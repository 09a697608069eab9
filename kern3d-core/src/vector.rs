//! Vector algebra shared by every other module
use nalgebra::{Point3, Unit, Vector3};

use crate::error::{GeometryError, GeometryResult};

/// Tolerance used when deciding whether a vector is unit length.
pub const UNIT_TOLERANCE: f64 = 1e-6;

pub fn dot(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

/// Right-handed cross product.
pub fn cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

pub fn length(v: &Vector3<f64>) -> f64 {
    dot(v, v).sqrt()
}

/// Normalize a vector, failing on zero length.
pub fn normalize(v: &Vector3<f64>) -> GeometryResult<Vector3<f64>> {
    let len = length(v);
    if len == 0.0 {
        return Err(GeometryError::ZeroLengthVector);
    }
    Ok(v / len)
}

/// Normalize a vector, returning the zero vector when it has zero length.
pub fn normalize_or_zero(v: &Vector3<f64>) -> Vector3<f64> {
    normalize(v).unwrap_or_else(|_| Vector3::zeros())
}

/// Normalize a transform axis into a unit direction.
pub fn unit_axis(axis: &Vector3<f64>) -> GeometryResult<Unit<Vector3<f64>>> {
    if length(axis) == 0.0 {
        return Err(GeometryError::ZeroLengthAxis);
    }
    Ok(Unit::new_normalize(*axis))
}

/// Area of the parallelogram spanned by two vectors.
pub fn parallelogram_area(u: &Vector3<f64>, v: &Vector3<f64>) -> f64 {
    length(&cross(u, v))
}

pub fn triangle_area(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    0.5 * parallelogram_area(&(b - a), &(c - a))
}

/// Rotate a vector about the Y axis by `angle` radians.
///
/// Positive angles turn +X towards +Z.
pub fn rotate_about_y(v: &Vector3<f64>, angle: f64) -> Vector3<f64> {
    let (sin_a, cos_a) = angle.sin_cos();
    Vector3::new(
        v.x * cos_a - v.z * sin_a,
        v.y,
        v.x * sin_a + v.z * cos_a,
    )
}

/// Two unit vectors `(u, v)` such that `(u, v, n)` is a right-handed
/// orthonormal frame. For `n = +Z` this returns `(+X, +Y)`.
pub fn orthonormal_basis(n: &Unit<Vector3<f64>>) -> (Vector3<f64>, Vector3<f64>) {
    let reference = if n.y.abs() < 0.9 {
        Vector3::y()
    } else {
        Vector3::z()
    };
    let u = normalize_or_zero(&cross(&reference, n));
    let v = cross(n, &u);
    (u, v)
}

/// Direction of travel at the middle point of three consecutive path points,
/// seen from above (+Y).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Classify the turn `a -> b -> c` by the sign of the Y component of
/// `(b - a) x (c - b)`.
pub fn turn_direction(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> TurnDirection {
    let turn = cross(&(b - a), &(c - b));
    if turn.y > 0.0 {
        TurnDirection::CounterClockwise
    } else if turn.y < 0.0 {
        TurnDirection::Clockwise
    } else {
        TurnDirection::Collinear
    }
}

/// One classification per interior point of a polyline.
pub fn classify_path_turns(points: &[Point3<f64>]) -> Vec<TurnDirection> {
    points
        .windows(3)
        .map(|w| turn_direction(&w[0], &w[1], &w[2]))
        .collect()
}
