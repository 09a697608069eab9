//! Random grid paths that never revisit a cell.
//!
//! These are the polylines fed to [`classify_path_turns`](crate::vector::classify_path_turns).

use std::collections::HashSet;

use nalgebra::Point3;
use rand::seq::SliceRandom;
use rand::Rng;

const PLANAR_STEPS: [[i32; 3]; 4] = [[1, 0, 0], [-1, 0, 0], [0, 0, 1], [0, 0, -1]];
const ALL_STEPS: [[i32; 3]; 6] = [
    [1, 0, 0],
    [-1, 0, 0],
    [0, 0, 1],
    [0, 0, -1],
    [0, 1, 0],
    [0, -1, 0],
];

/// Integer lattice a maze path walks on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeGrid {
    /// Cells range over `[-half_extent, half_extent]` on every axis
    pub half_extent: i32,
    /// World distance between neighbouring cells
    pub segment_length: f64,
    /// Allow steps along Y; otherwise the path stays on `y = 0`
    pub vertical: bool,
}

impl Default for MazeGrid {
    fn default() -> Self {
        Self {
            half_extent: 15,
            segment_length: 1.0,
            vertical: false,
        }
    }
}

impl MazeGrid {
    /// Walk up to `attempts` random unit steps from a start cell near the origin.
    ///
    /// A step that would leave the grid or land on a visited cell is dropped,
    /// so the path holds at most `attempts + 1` points and never crosses itself.
    pub fn random_path<R: Rng + ?Sized>(&self, attempts: usize, rng: &mut R) -> Vec<Point3<f64>> {
        let bound = self.half_extent.abs();
        let steps: &[[i32; 3]] = if self.vertical {
            &ALL_STEPS
        } else {
            &PLANAR_STEPS
        };

        let start = [
            rng.gen_range(-2..=2).clamp(-bound, bound),
            0,
            rng.gen_range(-2..=2).clamp(-bound, bound),
        ];
        let mut cells = vec![start];
        let mut visited = HashSet::from([start]);

        for _ in 0..attempts {
            let Some(step) = steps.choose(rng) else {
                break;
            };
            let [x, y, z] = cells[cells.len() - 1];
            let next = [x + step[0], y + step[1], z + step[2]];

            if next.iter().all(|c| c.abs() <= bound) && visited.insert(next) {
                cells.push(next);
            }
        }

        tracing::trace!(attempts, kept = cells.len() - 1, "generated maze path");

        cells
            .into_iter()
            .map(|[x, y, z]| {
                Point3::new(f64::from(x), f64::from(y), f64::from(z)) * self.segment_length
            })
            .collect()
    }
}
