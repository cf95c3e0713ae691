pub mod dense;
pub mod error;
pub mod operator;
pub mod sparse;
pub mod triplets;

pub use crate::dense::{DenseComplexMatrix, DenseMatrix};
pub use crate::error::Error;
pub use crate::operator::{ComplexOperator, RealOperator};
pub use crate::sparse::{SparseComplexMatrix, SparseMatrix};
pub use crate::triplets::TripletList;

pub type Result<T> = core::result::Result<T, Error>;
