//! Indexed triangle meshes
use nalgebra::{Matrix4, Point3, Vector3};

use crate::error::{GeometryError, GeometryResult};
use crate::transform::Transform;
use crate::vector::{cross, normalize_or_zero};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A triangle given by three positions, in winding order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<f64>; 3],
}

impl Triangle {
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Unit normal from `(b - a) x (c - a)`; zero for a degenerate triangle.
    pub fn normal(&self) -> Vector3<f64> {
        let [v0, v1, v2] = self.vertices;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        normalize_or_zero(&cross(&edge1, &edge2))
    }

    pub fn centroid(&self) -> Point3<f64> {
        let [a, b, c] = self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }
}

/// An immutable indexed triangle mesh.
///
/// Vertex positions are the source snapshot: transforms never write back into
/// them and instead fill a caller-owned buffer (see [`Mesh::transform_vertices_into`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point3<f64>>,
    faces: Vec<[usize; 3]>,
}

impl Mesh {
    /// Build a mesh, checking that every face index names a vertex.
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<[usize; 3]>) -> GeometryResult<Self> {
        let vertex_count = vertices.len();
        for (face_index, face) in faces.iter().enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i >= vertex_count) {
                return Err(GeometryError::FaceIndexOutOfRange {
                    face: face_index,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Positions of face `index`, in winding order.
    pub fn triangle(&self, index: usize) -> Option<Triangle> {
        self.faces.get(index).map(|&[a, b, c]| {
            Triangle::new(self.vertices[a], self.vertices[b], self.vertices[c])
        })
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(move |&[a, b, c]| {
            Triangle::new(self.vertices[a], self.vertices[b], self.vertices[c])
        })
    }

    /// Unique undirected edges as `(low, high)` index pairs, sorted.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = self
            .faces
            .iter()
            .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
            .map(|(i, j)| (i.min(j), i.max(j)))
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }

    /// Flags for vertices referenced by at least one face.
    fn used_vertices(&self) -> Vec<bool> {
        let mut used = vec![false; self.vertices.len()];
        for &index in self.faces.iter().flatten() {
            used[index] = true;
        }
        used
    }

    /// `V - E + F`, where `V` counts only vertices used by some face.
    pub fn euler_characteristic(&self) -> i64 {
        let used = self.used_vertices().iter().filter(|&&u| u).count();
        used as i64 - self.edges().len() as i64 + self.faces.len() as i64
    }

    /// Number of face-connected components. Vertices used by no face are ignored.
    pub fn connected_components(&self) -> usize {
        let mut parent: Vec<usize> = (0..self.vertices.len()).collect();

        fn find(parent: &mut [usize], mut i: usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]];
                i = parent[i];
            }
            i
        }

        let used = self.used_vertices();
        for &[a, b, c] in &self.faces {
            for (i, j) in [(a, b), (b, c)] {
                let (ri, rj) = (find(&mut parent, i), find(&mut parent, j));
                if ri != rj {
                    parent[ri] = rj;
                }
            }
        }

        (0..self.vertices.len())
            .filter(|&i| used[i] && find(&mut parent, i) == i)
            .count()
    }

    /// Genus of a closed orientable mesh, from `chi = 2 (C - g)`.
    pub fn genus(&self) -> i64 {
        let components = self.connected_components() as i64;
        (2 * components - self.euler_characteristic()) / 2
    }

    /// Transform every source vertex by `matrix` into a new buffer.
    pub fn transform_vertices(&self, matrix: &Matrix4<f64>) -> Vec<Point3<f64>> {
        let mut out = Vec::with_capacity(self.vertices.len());
        self.transform_vertices_into(matrix, &mut out);
        out
    }

    /// Transform every source vertex by `matrix`, overwriting `out`.
    ///
    /// Each vertex goes through the homogeneous divide of [`Transform::apply_point`].
    /// The source positions are never modified, so calling this once per frame
    /// with a fresh matrix never accumulates earlier transforms.
    pub fn transform_vertices_into(&self, matrix: &Matrix4<f64>, out: &mut Vec<Point3<f64>>) {
        out.clear();

        #[cfg(feature = "parallel")]
        self.vertices
            .par_iter()
            .map(|p| Transform::apply_point(matrix, p))
            .collect_into_vec(out);

        #[cfg(not(feature = "parallel"))]
        out.extend(self.vertices.iter().map(|p| Transform::apply_point(matrix, p)));
    }

    /// Create an indexed cube centered on the origin with outward winding
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let vertices = vec![
            Point3::new(-h, -h, -h),
            Point3::new(h, -h, -h),
            Point3::new(h, h, -h),
            Point3::new(-h, h, -h),
            Point3::new(-h, -h, h),
            Point3::new(h, -h, h),
            Point3::new(h, h, h),
            Point3::new(-h, h, h),
        ];
        let faces = vec![
            // Front (+Z)
            [4, 5, 6],
            [4, 6, 7],
            // Back (-Z)
            [0, 2, 1],
            [0, 3, 2],
            // Top (+Y)
            [3, 7, 6],
            [3, 6, 2],
            // Bottom (-Y)
            [0, 1, 5],
            [0, 5, 4],
            // Right (+X)
            [1, 2, 6],
            [1, 6, 5],
            // Left (-X)
            [0, 4, 7],
            [0, 7, 3],
        ];
        Self { vertices, faces }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_face() {
        let result = Mesh::new(vec![Point3::origin(); 3], vec![[0, 1, 2], [0, 1, 3]]);
        match result {
            Err(GeometryError::FaceIndexOutOfRange {
                face,
                index,
                vertex_count,
            }) => {
                assert_eq!((face, index, vertex_count), (1, 3, 3));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_cube_topology() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 12);
        assert_eq!(cube.edges().len(), 18);
        assert_eq!(cube.euler_characteristic(), 2);
        assert_eq!(cube.connected_components(), 1);
        assert_eq!(cube.genus(), 0);
    }

    #[test]
    fn test_cube_outward_winding() {
        let cube = Mesh::cube(2.0);
        for tri in cube.triangles() {
            let outward = tri.centroid().coords;
            assert!(tri.normal().dot(&outward) > 0.0);
        }
    }

    #[test]
    fn test_two_components() {
        let mut vertices = Mesh::cube(1.0).vertices().to_vec();
        let mut faces = Mesh::cube(1.0).faces().to_vec();
        let offset = vertices.len();
        vertices.extend(
            Mesh::cube(1.0)
                .vertices()
                .iter()
                .map(|p| p + Vector3::new(5.0, 0.0, 0.0)),
        );
        faces.extend(
            Mesh::cube(1.0)
                .faces()
                .iter()
                .map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]),
        );
        // A stray vertex used by no face.
        vertices.push(Point3::new(100.0, 0.0, 0.0));

        let mesh = Mesh::new(vertices, faces).unwrap();
        assert_eq!(mesh.connected_components(), 2);
        assert_eq!(mesh.euler_characteristic(), 4);
        assert_eq!(mesh.genus(), 0);
    }

    #[test]
    fn test_unused_vertices_ignored_by_topology() {
        let mut vertices = Mesh::cube(2.0).vertices().to_vec();
        vertices.push(Point3::new(10.0, 0.0, 0.0));
        vertices.push(Point3::new(-10.0, 0.0, 0.0));
        let mesh = Mesh::new(vertices, Mesh::cube(2.0).faces().to_vec()).unwrap();

        assert_eq!(mesh.vertex_count(), 10);
        assert_eq!(mesh.euler_characteristic(), 2);
        assert_eq!(mesh.connected_components(), 1);
        assert_eq!(mesh.genus(), 0);
    }

    #[test]
    fn test_triangle_normal_and_centroid() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        );
        assert_eq!(tri.normal(), Vector3::z());
        assert_eq!(tri.centroid(), Point3::new(1.0, 1.0, 0.0));

        let flat = Triangle::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0), Point3::new(2.0, 2.0, 2.0));
        assert_eq!(flat.normal(), Vector3::zeros());
    }

    #[test]
    fn test_transform_leaves_source_untouched() {
        let cube = Mesh::cube(2.0);
        let shift = Transform::translation(1.0, 0.0, 0.0);

        let mut current = Vec::new();
        cube.transform_vertices_into(&shift, &mut current);
        cube.transform_vertices_into(&shift, &mut current);

        assert_eq!(current.len(), 8);
        assert_eq!(current[0], Point3::new(0.0, -1.0, -1.0));
        assert_eq!(cube.vertices()[0], Point3::new(-1.0, -1.0, -1.0));
    }
}
