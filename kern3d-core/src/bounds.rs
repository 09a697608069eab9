//! Axis-aligned bounding boxes.

use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

use crate::error::{GeometryError, GeometryResult};
use crate::transform::Transform;

/// Axis-aligned bounding box.
///
/// `min <= max` holds on every axis. A box around a single point has
/// `min == max` and is valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3<f64>,
    /// Maximum corner of the bounding box.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Creates a bounding box from two opposite corners in any order.
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Creates a bounding box from a center point and half-extents.
    pub fn from_center_half_extents(center: Point3<f64>, half_extents: Vector3<f64>) -> Self {
        let half_extents = half_extents.abs();
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Component-wise min/max over `points`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyPointSet`] when `points` is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> GeometryResult<Self> {
        let mut points = points.into_iter();
        let first = points.next().ok_or(GeometryError::EmptyPointSet)?;
        Ok(points.fold(Self::new(*first, *first), |bbox, p| bbox.expand_to_include(p)))
    }

    /// Returns the center of the bounding box.
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns the half-extents of the bounding box.
    pub fn half_extents(&self) -> Vector3<f64> {
        (self.max - self.min) * 0.5
    }

    /// Returns the size (full extents) of the bounding box.
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// The eight corners; bit 0 of the index selects max x, bit 1 max y, bit 2 max z.
    pub fn corners(&self) -> [Point3<f64>; 8] {
        std::array::from_fn(|i| {
            Point3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }

    /// Returns true if the bounding box contains the given point (boundary included).
    pub fn contains_point(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Returns true if this bounding box intersects another.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Returns the union of two bounding boxes.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Returns a new bounding box expanded to include the given point.
    pub fn expand_to_include(&self, point: &Point3<f64>) -> Aabb {
        Aabb {
            min: self.min.inf(point),
            max: self.max.sup(point),
        }
    }

    /// Conservative transform by a homogeneous matrix.
    ///
    /// The center goes through the full matrix; the half-extents through the
    /// absolute values of the linear block, `e'_i = sum_j |M_ij| e_j`. The
    /// result always contains the transformed box but is generally looser
    /// than [`Aabb::transform_tight`].
    pub fn transform(&self, matrix: &Matrix4<f64>) -> Aabb {
        let center = Transform::apply_point(matrix, &self.center());
        let extents = Transform::linear_part(matrix).abs() * self.half_extents();
        Aabb::from_center_half_extents(center, extents)
    }

    /// Conservative transform by a 3x3 linear map.
    pub fn transform_linear(&self, matrix: &Matrix3<f64>) -> Aabb {
        let center = Transform::apply_linear(matrix, &self.center());
        let extents = matrix.abs() * self.half_extents();
        Aabb::from_center_half_extents(center, extents)
    }

    /// Box around the eight transformed corners.
    ///
    /// Tight for affine maps; still an AABB of the corners only.
    pub fn transform_tight(&self, matrix: &Matrix4<f64>) -> Aabb {
        let corners = self.corners().map(|c| Transform::apply_point(matrix, &c));
        let mut bbox = Aabb::new(corners[0], corners[0]);
        for c in &corners[1..] {
            bbox = bbox.expand_to_include(c);
        }
        bbox
    }

    /// Returns true if `min <= max` on every axis.
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn unit_box() -> Aabb {
        Aabb::new(Point3::new(-1.0, -2.0, 0.0), Point3::new(3.0, 1.0, 2.0))
    }

    #[test]
    fn test_from_points() {
        let points = [
            Point3::new(1.0, -1.0, 4.0),
            Point3::new(-2.0, 3.0, 0.5),
            Point3::new(0.0, 0.0, -6.0),
        ];
        let bbox = Aabb::from_points(&points).unwrap();
        assert_eq!(bbox.min, Point3::new(-2.0, -1.0, -6.0));
        assert_eq!(bbox.max, Point3::new(1.0, 3.0, 4.0));
        assert!(points.iter().all(|p| bbox.contains_point(p)));
    }

    #[test]
    fn test_single_point_box() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let bbox = Aabb::from_points([&p]).unwrap();
        assert_eq!(bbox.min, bbox.max);
        assert!(bbox.is_valid());
        assert!(bbox.contains_point(&p));
    }

    #[test]
    fn test_empty_points() {
        let empty: [Point3<f64>; 0] = [];
        assert!(matches!(
            Aabb::from_points(&empty),
            Err(GeometryError::EmptyPointSet)
        ));
    }

    #[test]
    fn test_center_extents_corners() {
        let bbox = unit_box();
        assert_eq!(bbox.center(), Point3::new(1.0, -0.5, 1.0));
        assert_eq!(bbox.half_extents(), Vector3::new(2.0, 1.5, 1.0));
        assert_eq!(bbox.size(), Vector3::new(4.0, 3.0, 2.0));

        let corners = bbox.corners();
        assert_eq!(corners[0], bbox.min);
        assert_eq!(corners[7], bbox.max);
        assert_eq!(Aabb::from_points(&corners).unwrap(), bbox);
    }

    #[test]
    fn test_union_and_intersects() {
        let a = unit_box();
        let b = Aabb::new(Point3::new(2.0, 0.0, 1.0), Point3::new(5.0, 5.0, 5.0));
        let c = Aabb::new(Point3::new(10.0, 10.0, 10.0), Point3::new(11.0, 11.0, 11.0));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));

        let u = a.union(&c);
        assert_eq!(u.min, a.min);
        assert_eq!(u.max, c.max);
    }

    #[test]
    fn test_translate_is_exact() {
        let bbox = unit_box();
        let moved = bbox.transform(&Transform::translation(1.0, 2.0, 3.0));
        assert_relative_eq!(moved.min, Point3::new(0.0, 0.0, 3.0), epsilon = 1e-12);
        assert_relative_eq!(moved.max, Point3::new(4.0, 3.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn test_rotated_box_is_conservative() {
        let mut rng = StdRng::seed_from_u64(3);
        let bbox = unit_box();

        for _ in 0..50 {
            let axis = Vector3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            if axis.norm() < 1e-3 {
                continue;
            }
            let m = Transform::chain(&[
                Transform::rotation(&axis, rng.gen_range(0.0..std::f64::consts::TAU)).unwrap(),
                Transform::scaling(&axis.yzx(), rng.gen_range(0.1..3.0)).unwrap(),
                Transform::translation(rng.gen_range(-5.0..5.0), 0.0, 1.0),
            ]);

            let loose = bbox.transform(&m);
            let tight = bbox.transform_tight(&m);
            assert!(loose.is_valid());
            for corner in bbox.corners() {
                let moved = Transform::apply_point(&m, &corner);
                // Corners may land exactly on the boundary, up to rounding.
                assert!((moved - loose.min).iter().all(|d| *d >= -1e-9));
                assert!((loose.max - moved).iter().all(|d| *d >= -1e-9));
            }
            assert!((tight.min - loose.min).iter().all(|d| *d >= -1e-9));
            assert!((loose.max - tight.max).iter().all(|d| *d >= -1e-9));
        }
    }

    #[test]
    fn test_linear_matches_homogeneous() {
        let m = Transform::rotation(&Vector3::new(1.0, 1.0, 0.0), 0.6).unwrap();
        let bbox = unit_box();
        let a = bbox.transform(&m);
        let b = bbox.transform_linear(&Transform::linear_part(&m));
        assert_relative_eq!(a.min, b.min, epsilon = 1e-12);
        assert_relative_eq!(a.max, b.max, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_45_grows_box() {
        let bbox = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let m = Transform::rotation_z(std::f64::consts::FRAC_PI_4);
        let rotated = bbox.transform(&m);
        let expected = std::f64::consts::SQRT_2;
        assert_relative_eq!(rotated.max, Point3::new(expected, expected, 1.0), epsilon = 1e-12);
    }
}
