//! Barycentric coordinates, attribute blending and cell rasterization.

use std::ops::{Add, Mul};

use nalgebra::Point3;

use crate::mesh::Triangle;
use crate::vector::dot;

/// Weights `(u, v, w)` of a point against triangle `(a, b, c)`; they sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarycentricCoords {
    pub u: f64,
    pub v: f64,
    pub w: f64,
}

impl BarycentricCoords {
    /// Inside or on the boundary.
    pub fn is_inside(&self) -> bool {
        self.u >= 0.0 && self.v >= 0.0 && self.w >= 0.0
    }

    /// `u * a + v * b + w * c`
    pub fn interpolate<T>(&self, a: T, b: T, c: T) -> T
    where
        T: Add<Output = T> + Mul<f64, Output = T>,
    {
        a * self.u + b * self.v + c * self.w
    }

    /// Blend three RGB colors, truncating each channel.
    pub fn interpolate_color(&self, a: [u8; 3], b: [u8; 3], c: [u8; 3]) -> [u8; 3] {
        std::array::from_fn(|i| {
            let value = self.u * f64::from(a[i]) + self.v * f64::from(b[i]) + self.w * f64::from(c[i]);
            value.clamp(0.0, 255.0) as u8
        })
    }
}

/// Outcome of a barycentric solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Barycentric {
    Solved(BarycentricCoords),
    /// The triangle has zero area
    Degenerate,
}

impl Barycentric {
    /// Solve the 2x2 normal equations for `p` against triangle `(a, b, c)`.
    ///
    /// `p` need not lie in the triangle's plane; it is effectively projected
    /// onto it.
    pub fn compute(p: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Self {
        let v0 = b - a;
        let v1 = c - a;
        let v2 = p - a;

        let p00 = dot(&v0, &v0);
        let p01 = dot(&v0, &v1);
        let p11 = dot(&v1, &v1);
        let p20 = dot(&v2, &v0);
        let p21 = dot(&v2, &v1);

        let denom = p00 * p11 - p01 * p01;
        if denom.abs() <= f64::EPSILON * p00 * p11 {
            tracing::trace!(?a, ?b, ?c, "zero-area triangle in barycentric solve");
            return Barycentric::Degenerate;
        }

        let v = (p11 * p20 - p01 * p21) / denom;
        let w = (p00 * p21 - p01 * p20) / denom;

        Barycentric::Solved(BarycentricCoords { u: 1.0 - v - w, v, w })
    }

    pub fn of_triangle(p: &Point3<f64>, triangle: &Triangle) -> Self {
        let [a, b, c] = &triangle.vertices;
        Self::compute(p, a, b, c)
    }

    pub fn coords(&self) -> Option<BarycentricCoords> {
        match self {
            Barycentric::Solved(coords) => Some(*coords),
            Barycentric::Degenerate => None,
        }
    }

    /// Never true for a degenerate triangle.
    pub fn is_inside(&self) -> bool {
        self.coords().is_some_and(|c| c.is_inside())
    }

    /// Classic `(u, v, w)` triple with `(-1, -1, -1)` standing for a degenerate triangle.
    pub fn to_sentinel(&self) -> (f64, f64, f64) {
        match self {
            Barycentric::Solved(BarycentricCoords { u, v, w }) => (*u, *v, *w),
            Barycentric::Degenerate => (-1.0, -1.0, -1.0),
        }
    }
}

/// One filled cell from [`rasterize_triangle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadedCell {
    pub x: i32,
    pub y: i32,
    pub color: [u8; 3],
}

/// Fill a triangle in the XY plane with interpolated vertex colors.
///
/// The bounding box is walked in steps of `cell`; each cell is sampled at its
/// center and emitted when the center is inside the triangle. Z is ignored.
pub fn rasterize_triangle(triangle: &Triangle, colors: [[u8; 3]; 3], cell: u32) -> Vec<ShadedCell> {
    let [a, b, c] = triangle.vertices.map(|p| Point3::new(p.x, p.y, 0.0));
    if cell == 0 {
        return Vec::new();
    }

    let min_x = a.x.min(b.x).min(c.x).floor() as i32;
    let max_x = a.x.max(b.x).max(c.x).ceil() as i32;
    let min_y = a.y.min(b.y).min(c.y).floor() as i32;
    let max_y = a.y.max(b.y).max(c.y).ceil() as i32;
    let half = f64::from(cell) / 2.0;

    let mut cells = Vec::new();
    for y in (min_y..max_y).step_by(cell as usize) {
        for x in (min_x..max_x).step_by(cell as usize) {
            let center = Point3::new(f64::from(x) + half, f64::from(y) + half, 0.0);
            if let Barycentric::Solved(coords) = Barycentric::compute(&center, &a, &b, &c) {
                if coords.is_inside() {
                    cells.push(ShadedCell {
                        x,
                        y,
                        color: coords.interpolate_color(colors[0], colors[1], colors[2]),
                    });
                }
            }
        }
    }
    cells
}
