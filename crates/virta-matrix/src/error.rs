use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Error indicating that a matrix could not be built from its entries.
    #[error("Invalid matrix structure: {0}")]
    InvalidStructure(String),

    /// Error indicating that an operand has the wrong dimension.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
