use faer::c64;

/// A real square matrix seen through the operations the iterative solvers
/// need. Both the dense and the compressed-column backends implement this,
/// so the Krylov methods never know which storage they run on.
pub trait RealOperator {
    /// Dimension of the (square) matrix.
    fn dim(&self) -> usize;

    /// y = A * x
    fn matvec(&self, x: &[f64], y: &mut [f64]);

    /// y = Aᵀ * x
    fn matvec_transpose(&self, x: &[f64], y: &mut [f64]);

    /// The main diagonal of A.
    fn diagonal(&self) -> Vec<f64>;
}

/// Complex counterpart of [`RealOperator`]. The transpose operation is
/// replaced by the conjugate transpose, which is what BiCG needs.
pub trait ComplexOperator {
    /// Dimension of the (square) matrix.
    fn dim(&self) -> usize;

    /// y = A * x
    fn matvec(&self, x: &[c64], y: &mut [c64]);

    /// y = Aᴴ * x
    fn matvec_adjoint(&self, x: &[c64], y: &mut [c64]);

    /// The main diagonal of A.
    fn diagonal(&self) -> Vec<c64>;
}
