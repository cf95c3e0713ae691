use std::fmt;

use thiserror::Error;

/// Which BiCG quantity collapsed below the breakdown threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownKind {
    /// `r̃·z` vanished.
    Rho,
    /// `p̃·q` vanished.
    Omega,
}

impl fmt::Display for BreakdownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakdownKind::Rho => write!(f, "rho"),
            BreakdownKind::Omega => write!(f, "omega"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// Error when the swept element is not found in the netlist.
    #[error("Element '{0}' not found in the netlist")]
    ElementNotFound(String),

    /// Error when a DC sweep names an element that cannot be swept.
    #[error("DC sweep element must be a voltage or current source: {0}")]
    InvalidSweepSource(String),

    /// Error when a direct factorization detects a singular system.
    #[error("Singular MNA matrix: {0}")]
    SingularMatrix(String),

    /// Error when BiCG encounters a vanishing inner product.
    #[error("Iterative solver breakdown: {0} below threshold")]
    Breakdown(BreakdownKind),

    /// Error from matrix construction.
    #[error(transparent)]
    Matrix(#[from] virta_matrix::Error),
}
