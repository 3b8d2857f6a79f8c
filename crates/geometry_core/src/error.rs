//! Error types for fallible geometry operations

/// Errors raised by the checked variants of matrix operations
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// The homogeneous coordinate came out as zero during a point transform
    #[error("degenerate homogeneous coordinate (w = {w})")]
    DegenerateHomogeneous {
        /// The offending w value
        w: f32,
    },

    /// The matrix has a zero determinant
    #[error("matrix is singular and has no inverse")]
    SingularMatrix,
}
