use virta_parser::analyses::Options;

/// Default iteration cap for the Krylov solvers.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// The solution method, derived once from the netlist `.OPTIONS` booleans.
///
/// `SPD` selects the symmetric-positive-definite variants (Cholesky or CG),
/// `ITER` selects the Krylov methods, `SPARSE` selects compressed-column
/// storage. For the iterative methods the storage choice lives in
/// [`SolverConfig::sparse_storage`] instead, because CG and BiCG run on an
/// operator abstraction and never see the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    DenseLu,
    DenseCholesky,
    SparseLu,
    SparseCholesky,
    Cg,
    BiCg,
}

impl Method {
    pub fn from_options(options: &Options) -> Self {
        match (options.iter, options.spd, options.sparse) {
            (true, true, _) => Method::Cg,
            (true, false, _) => Method::BiCg,
            (false, true, false) => Method::DenseCholesky,
            (false, true, true) => Method::SparseCholesky,
            (false, false, false) => Method::DenseLu,
            (false, false, true) => Method::SparseLu,
        }
    }

    pub fn is_iterative(self) -> bool {
        matches!(self, Method::Cg | Method::BiCg)
    }
}

/// Configuration for a solver run, derived from the netlist options.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// The solution method.
    pub method: Method,

    /// Operator storage for the iterative methods.
    pub sparse_storage: bool,

    /// Convergence threshold for the iterative methods.
    pub itol: f64,

    /// Iteration cap for the iterative methods. BiCG raises this to its
    /// own floor, see [`crate::iterative::BICG_ITER_FLOOR`].
    pub max_iterations: usize,
}

impl SolverConfig {
    pub fn from_options(options: &Options) -> Self {
        SolverConfig {
            method: Method::from_options(options),
            sparse_storage: options.sparse,
            itol: options.itol,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig::from_options(&Options::default())
    }
}
