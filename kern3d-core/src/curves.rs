//! Parametric knots and helices that objects can be placed along.

use std::f64::consts::TAU;

use nalgebra::Point3;

/// Helix around the Y axis, rescaled so one full sweep of `turns` turns
/// spans `scale` units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helix {
    /// Rise per turn before rescaling
    pub length: f64,
    /// Radius before rescaling
    pub spacing: f64,
    pub turns: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    /// `(sin 3t, cos 2t, sin 2t)`
    Trefoil,
    /// `((2 + cos 2t) cos 3t, (2 + cos 2t) sin 3t, sin 4t)`
    FigureEight,
    /// `((2 + cos 3t) cos 2t, (2 + cos 3t) sin 2t, sin 5t)`
    TorusKnot,
    /// `((2 + cos 5t) cos 2t, (2 + cos 5t) sin 2t, sin 5t)`
    Solomon,
    Helix(Helix),
}

impl Curve {
    /// Knot selector by index; anything past the last knot falls back to the trefoil.
    pub fn from_index(index: usize) -> Self {
        match index {
            1 => Curve::FigureEight,
            2 => Curve::TorusKnot,
            3 => Curve::Solomon,
            _ => Curve::Trefoil,
        }
    }

    pub fn point(&self, t: f64) -> Point3<f64> {
        match *self {
            Curve::Trefoil => Point3::new((3.0 * t).sin(), (2.0 * t).cos(), (2.0 * t).sin()),
            Curve::FigureEight => {
                let r = 2.0 + (2.0 * t).cos();
                Point3::new(r * (3.0 * t).cos(), r * (3.0 * t).sin(), (4.0 * t).sin())
            }
            Curve::TorusKnot => {
                let r = 2.0 + (3.0 * t).cos();
                Point3::new(r * (2.0 * t).cos(), r * (2.0 * t).sin(), (5.0 * t).sin())
            }
            Curve::Solomon => {
                let r = 2.0 + (5.0 * t).cos();
                Point3::new(r * (2.0 * t).cos(), r * (2.0 * t).sin(), (5.0 * t).sin())
            }
            Curve::Helix(helix) => helix.point(t),
        }
    }

    /// `count` points scaled by `scale`, spaced evenly over `turns` full turns
    /// and centered on `t = 0`.
    pub fn sample(&self, count: usize, turns: f64, scale: f64) -> Vec<Point3<f64>> {
        if count == 0 {
            return Vec::new();
        }
        let step = TAU * turns / count as f64;
        let first = -(count.div_ceil(2) as f64);

        (0..count)
            .map(|i| self.point((first + i as f64) * step) * scale)
            .collect()
    }
}

impl Helix {
    /// Collapses to the origin when `spacing * turns` is zero.
    pub fn point(&self, t: f64) -> Point3<f64> {
        let extent = self.spacing * self.turns * TAU;
        if extent == 0.0 {
            return Point3::origin();
        }
        let k = self.scale / extent;
        Point3::new(
            self.spacing * t.cos() * k,
            self.length * t / TAU * k,
            self.spacing * t.sin() * k,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_knots_at_zero() {
        assert_relative_eq!(Curve::Trefoil.point(0.0), Point3::new(0.0, 1.0, 0.0));
        for knot in [Curve::FigureEight, Curve::TorusKnot, Curve::Solomon] {
            assert_relative_eq!(knot.point(0.0), Point3::new(3.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_knots_at_quarter_turn() {
        let t = FRAC_PI_2;
        assert_relative_eq!(Curve::Trefoil.point(t), Point3::new(-1.0, -1.0, 0.0), epsilon = 1e-12);
        // r = 2 + cos(pi) = 1
        assert_relative_eq!(Curve::FigureEight.point(t), Point3::new(0.0, -1.0, 0.0), epsilon = 1e-12);
        // r = 2 + cos(3 pi / 2) = 2
        assert_relative_eq!(Curve::TorusKnot.point(t), Point3::new(-2.0, 0.0, 1.0), epsilon = 1e-12);
        // r = 2 + cos(5 pi / 2) = 2
        assert_relative_eq!(Curve::Solomon.point(t), Point3::new(-2.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_helix_closed_form() {
        let helix = Curve::Helix(Helix {
            length: TAU,
            spacing: 1.0,
            turns: 1.0,
            scale: TAU,
        });
        // With these settings the helix is (cos t, t, sin t).
        for t in [0.0, FRAC_PI_2, PI, 5.0] {
            assert_relative_eq!(helix.point(t), Point3::new(t.cos(), t, t.sin()), epsilon = 1e-12);
        }

        let flat = Helix {
            length: 1.0,
            spacing: 0.0,
            turns: 2.0,
            scale: 1.0,
        };
        assert_eq!(flat.point(1.0), Point3::origin());
    }

    #[test]
    fn test_selector_falls_back_to_trefoil() {
        assert_eq!(Curve::from_index(0), Curve::Trefoil);
        assert_eq!(Curve::from_index(1), Curve::FigureEight);
        assert_eq!(Curve::from_index(2), Curve::TorusKnot);
        assert_eq!(Curve::from_index(3), Curve::Solomon);
        assert_eq!(Curve::from_index(42), Curve::Trefoil);
    }

    #[test]
    fn test_sample_is_centered_and_scaled() {
        let points = Curve::Trefoil.sample(4, 1.0, 2.0);
        assert_eq!(points.len(), 4);
        // t runs over -pi, -pi/2, 0, pi/2.
        assert_relative_eq!(points[2], Point3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(points[0], Curve::Trefoil.point(-PI) * 2.0, epsilon = 1e-12);
        assert_relative_eq!(points[3], Point3::new(-2.0, -2.0, 0.0), epsilon = 1e-12);

        assert_eq!(Curve::Solomon.sample(5, 1.0, 1.0).len(), 5);
        assert!(Curve::Solomon.sample(0, 1.0, 1.0).is_empty());
    }
}
