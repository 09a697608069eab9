//! Error types for geometry kernel operations.

use thiserror::Error;

/// Errors raised when a caller violates a precondition of the kernel.
///
/// Degenerate numeric inputs (zero-area triangles, zero focal distance, a
/// homogeneous `w` of zero) are not errors; they have documented fallbacks.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// A vector that must be normalized has zero length.
    #[error("cannot normalize a zero-length vector")]
    ZeroLengthVector,

    /// An axis passed to a transform builder has zero length.
    #[error("transform axis must be non-zero")]
    ZeroLengthAxis,

    /// The point set is empty.
    #[error("point set is empty")]
    EmptyPointSet,

    /// Not enough points for the requested operation.
    #[error("at least {required} points required, got {provided}")]
    InsufficientPoints {
        /// Number of points required.
        required: usize,
        /// Number of points provided.
        provided: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        /// Index of the offending face.
        face: usize,
        /// The invalid vertex index.
        index: usize,
        /// The number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Two arrays that must be parallel have different lengths.
    #[error("expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// SVD did not produce the requested singular vectors.
    #[error("SVD computation failed")]
    SvdFailed,

    /// Transform parameters could not be parsed.
    #[error("invalid transform parameters: {0}")]
    Params(#[from] ron::error::SpannedError),

    /// Transform parameters could not be serialized.
    #[error("failed to serialize transform parameters: {0}")]
    Serialize(#[from] ron::Error),
}

/// Result type for geometry kernel operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
