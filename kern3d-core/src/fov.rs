//! Field-of-view cone membership
use nalgebra::{Point3, Unit, Vector3};

use crate::error::GeometryResult;
use crate::vector::{dot, length, rotate_about_y, unit_axis};

/// An observer's view cone: apex, facing direction, reach and full opening angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewCone {
    pub position: Point3<f64>,
    pub direction: Unit<Vector3<f64>>,
    pub max_distance: f64,
    /// Full opening angle in radians
    pub angle: f64,
}

impl ViewCone {
    /// Fails if `direction` has zero length.
    pub fn new(
        position: Point3<f64>,
        direction: Vector3<f64>,
        max_distance: f64,
        angle: f64,
    ) -> GeometryResult<Self> {
        Ok(Self {
            position,
            direction: unit_axis(&direction)?,
            max_distance,
            angle,
        })
    }

    /// True when `point` is within `max_distance` and within `angle / 2` of the
    /// facing direction. The apex itself counts as inside.
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        let offset = point - self.position;
        let distance = length(&offset);
        if distance > self.max_distance {
            return false;
        }
        if distance == 0.0 {
            return true;
        }

        dot(&self.direction, &(offset / distance)) >= (self.angle / 2.0).cos()
    }

    /// `segments + 1` points on the far edge of the cone, swept about the Y
    /// axis from `-angle / 2` to `angle / 2`. Zero segments yields only the
    /// point straight ahead.
    pub fn boundary_arc(&self, segments: usize) -> Vec<Point3<f64>> {
        if segments == 0 {
            return vec![self.position + self.direction.into_inner() * self.max_distance];
        }

        let half = self.angle / 2.0;
        let step = self.angle / segments as f64;

        (0..=segments)
            .map(|i| {
                let turned = rotate_about_y(&self.direction, -half + i as f64 * step);
                self.position + turned * self.max_distance
            })
            .collect()
    }
}
