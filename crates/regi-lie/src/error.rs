/// Error types for building group elements from raw matrices.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LieError {
    /// The matrix contains NaN or infinite entries.
    #[error("matrix contains non-finite entries")]
    NonFinite,

    /// The bottom row of a homogeneous transform is not (0, 0, 0, 1).
    #[error("invalid homogeneous bottom row {0:?}, expected [0, 0, 0, 1]")]
    InvalidBottomRow([f64; 4]),

    /// The rotation block is not orthonormal.
    #[error("rotation block is not orthonormal (max |R*R^T - I| = {0})")]
    NotOrthonormal(f64),

    /// The rotation block is a reflection or is scaled.
    #[error("rotation block determinant is {0}, expected 1")]
    InvalidDeterminant(f64),
}
