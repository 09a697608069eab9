//! kern3d Core Library - Geometry kernel for transform and mesh exercises
//!
//! This library provides stateless geometry operations: vector algebra,
//! homogeneous transformation and projection matrices, mesh normals and
//! topology, best-fit planes, bounding boxes, barycentric interpolation and
//! field-of-view tests, plus the
//! knot curves and grid paths those tests are driven by. It performs no I/O and owns no display state.

pub mod barycentric;
pub mod bounds;
pub mod curves;
pub mod error;
pub mod fov;
pub mod mesh;
pub mod normals;
pub mod params;
pub mod path;
pub mod plane;
pub mod projection;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use barycentric::{rasterize_triangle, Barycentric, BarycentricCoords, ShadedCell};
pub use bounds::Aabb;
pub use curves::{Curve, Helix};
pub use error::{GeometryError, GeometryResult};
pub use fov::ViewCone;
pub use mesh::{Mesh, Triangle};
pub use normals::{face_normals, vertex_normals, FaceNormal};
pub use params::TransformParams;
pub use path::MazeGrid;
pub use plane::Plane;
pub use projection::ProjectionMode;
pub use transform::{EulerAngles, Joint, JointChain, PosedJoint, Transform};
pub use vector::TurnDirection;
