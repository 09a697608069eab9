//! Planes and total-least-squares plane fitting.

use nalgebra::{DMatrix, Point3, Unit, Vector3};
use rand::Rng;

use crate::error::{GeometryError, GeometryResult};
use crate::vector::{dot, orthonormal_basis, unit_axis};

/// A plane through `point` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Point3<f64>,
    pub normal: Unit<Vector3<f64>>,
}

impl Plane {
    /// Fails if `normal` has zero length.
    pub fn new(point: Point3<f64>, normal: Vector3<f64>) -> GeometryResult<Self> {
        Ok(Self {
            point,
            normal: unit_axis(&normal)?,
        })
    }

    /// Best-fit plane through `points`: the centroid and the [`fit_normal`] direction.
    pub fn fit(points: &[Point3<f64>]) -> GeometryResult<Self> {
        let normal = fit_normal(points)?;
        Ok(Self {
            point: centroid(points)?,
            normal,
        })
    }

    /// Positive on the side the normal points to.
    pub fn signed_distance(&self, p: &Point3<f64>) -> f64 {
        dot(&(p - self.point), &self.normal)
    }

    pub fn project_point(&self, p: &Point3<f64>) -> Point3<f64> {
        p - self.normal.into_inner() * self.signed_distance(p)
    }
}

/// Arithmetic mean of `points`.
pub fn centroid(points: &[Point3<f64>]) -> GeometryResult<Point3<f64>> {
    if points.is_empty() {
        return Err(GeometryError::EmptyPointSet);
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Ok(Point3::from(sum / points.len() as f64))
}

/// Normal of the total-least-squares plane through `points`.
///
/// The points are centered on their centroid and stacked into an `n x 3`
/// matrix; the right-singular vector of its smallest singular value is the
/// direction of least variance. The sign is arbitrary.
///
/// # Errors
///
/// Returns an error if fewer than three points are given or the SVD
/// does not produce right-singular vectors.
pub fn fit_normal(points: &[Point3<f64>]) -> GeometryResult<Unit<Vector3<f64>>> {
    if points.len() < 3 {
        return Err(GeometryError::InsufficientPoints {
            required: 3,
            provided: points.len(),
        });
    }

    let center = centroid(points)?;
    let centered = DMatrix::from_fn(points.len(), 3, |row, col| points[row][col] - center[col]);

    let svd = centered.svd(false, true);
    let v_t = svd.v_t.ok_or(GeometryError::SvdFailed)?;
    let smallest = svd.singular_values.imin();

    let row = v_t.row(smallest);
    let normal = Vector3::new(row[0], row[1], row[2]);
    tracing::trace!(
        singular_value = svd.singular_values[smallest],
        ?normal,
        "fitted plane normal"
    );

    unit_axis(&normal).map_err(|_| GeometryError::SvdFailed)
}

/// Sample `count` random points on `plane`.
///
/// In-plane coordinates are uniform in `[-spread, spread]` along the basis from
/// [`orthonormal_basis`]; each point is then pushed along the normal by a
/// uniform amount in `[-offset, offset]` (pass `0.0` for exact samples).
/// The sign of `spread` is ignored; a NaN range collapses to zero.
pub fn sample_points_on_plane<R: Rng + ?Sized>(
    plane: &Plane,
    count: usize,
    spread: f64,
    offset: f64,
    rng: &mut R,
) -> Vec<Point3<f64>> {
    let (u, v) = orthonormal_basis(&plane.normal);
    let n = plane.normal.into_inner();
    let spread = spread.abs();

    (0..count)
        .map(|_| {
            let (r1, r2) = if spread > 0.0 {
                (rng.gen_range(-spread..=spread), rng.gen_range(-spread..=spread))
            } else {
                (0.0, 0.0)
            };
            let lift = if offset > 0.0 {
                rng.gen_range(-offset..=offset)
            } else {
                0.0
            };
            plane.point + u * r1 + v * r2 + n * lift
        })
        .collect()
}
