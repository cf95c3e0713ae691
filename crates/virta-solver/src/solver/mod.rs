pub mod ac;
pub mod dc;
pub mod op;

use std::collections::HashMap;

use faer::c64;
use log::warn;
use virta_matrix::{
    ComplexOperator, DenseComplexMatrix, DenseMatrix, RealOperator, SparseComplexMatrix,
    SparseMatrix, TripletList,
};
use virta_parser::analyses::{AcAnalysis, DcAnalysis};
use virta_parser::circuit::Circuit;

use crate::config::{Method, SolverConfig};
use crate::iterative::{
    IterationOutcome, bi_conjugate_gradient, complex_bi_conjugate_gradient,
    complex_conjugate_gradient, conjugate_gradient,
};
use crate::linear::{ComplexFactorization, RealFactorization};
use crate::{AcSweepPoint, DcSweepPoint, Result};

/// The main solver, dispatching analyses over one parsed circuit.
pub struct Solver {
    circuit: Circuit,
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver configured from the netlist `.OPTIONS`.
    pub fn new(circuit: Circuit) -> Self {
        let config = SolverConfig::from_options(&circuit.options);
        Solver { circuit, config }
    }

    pub fn with_config(circuit: Circuit, config: SolverConfig) -> Self {
        Solver { circuit, config }
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// DC operating point.
    pub fn solve_op(&self) -> Result<HashMap<String, f64>> {
        op::solve(&self.circuit, &self.config)
    }

    /// DC sweep for one `.DC` directive.
    pub fn solve_dc(&self, analysis: &DcAnalysis) -> Result<Vec<DcSweepPoint>> {
        dc::solve(&self.circuit, &self.config, analysis)
    }

    /// AC sweep for one `.AC` directive.
    pub fn solve_ac(&self, analysis: &AcAnalysis) -> Result<Vec<AcSweepPoint>> {
        ac::solve(&self.circuit, &self.config, analysis)
    }
}

pub(crate) fn real_operator(
    triplets: &TripletList<f64>,
    sparse: bool,
) -> Result<Box<dyn RealOperator>> {
    Ok(if sparse {
        Box::new(SparseMatrix::from_triplets(triplets)?)
    } else {
        Box::new(DenseMatrix::from_triplets(triplets)?)
    })
}

pub(crate) fn complex_operator(
    triplets: &TripletList<c64>,
    sparse: bool,
) -> Result<Box<dyn ComplexOperator>> {
    Ok(if sparse {
        Box::new(SparseComplexMatrix::from_triplets(triplets)?)
    } else {
        Box::new(DenseComplexMatrix::from_triplets(triplets)?)
    })
}

/// Runs the configured Krylov method on `x` in place. Non-convergence is
/// reported with a warning; the last iterate is kept.
pub(crate) fn run_real_iterative(
    operator: &dyn RealOperator,
    rhs: &[f64],
    x: &mut [f64],
    config: &SolverConfig,
) -> Result<()> {
    let outcome = match config.method {
        Method::Cg => conjugate_gradient(operator, rhs, x, config.itol, config.max_iterations),
        Method::BiCg => bi_conjugate_gradient(operator, rhs, x, config.itol, config.max_iterations)?,
        _ => unreachable!("direct method routed to the iterative path"),
    };
    if let IterationOutcome::NotConverged(iterations) = outcome {
        warn!("iterative solver hit the cap of {iterations} iterations without converging");
    }
    Ok(())
}

pub(crate) fn run_complex_iterative(
    operator: &dyn ComplexOperator,
    rhs: &[c64],
    x: &mut [c64],
    config: &SolverConfig,
) -> Result<()> {
    let outcome = match config.method {
        Method::Cg => {
            complex_conjugate_gradient(operator, rhs, x, config.itol, config.max_iterations)
        }
        Method::BiCg => {
            complex_bi_conjugate_gradient(operator, rhs, x, config.itol, config.max_iterations)?
        }
        _ => unreachable!("direct method routed to the iterative path"),
    };
    if let IterationOutcome::NotConverged(iterations) = outcome {
        warn!("iterative solver hit the cap of {iterations} iterations without converging");
    }
    Ok(())
}

/// One-shot solve of a real system, used by the operating point.
pub(crate) fn solve_real_system(
    triplets: &TripletList<f64>,
    rhs: &[f64],
    config: &SolverConfig,
) -> Result<Vec<f64>> {
    if config.method.is_iterative() {
        let operator = real_operator(triplets, config.sparse_storage)?;
        let mut x = vec![0.0; rhs.len()];
        run_real_iterative(operator.as_ref(), rhs, &mut x, config)?;
        Ok(x)
    } else {
        RealFactorization::factor(triplets, config.method)?.solve(rhs)
    }
}

/// One-shot solve of a complex system, used per AC sweep step.
pub(crate) fn solve_complex_system(
    triplets: &TripletList<c64>,
    rhs: &[c64],
    config: &SolverConfig,
) -> Result<Vec<c64>> {
    if config.method.is_iterative() {
        let operator = complex_operator(triplets, config.sparse_storage)?;
        let mut x = vec![c64::new(0.0, 0.0); rhs.len()];
        run_complex_iterative(operator.as_ref(), rhs, &mut x, config)?;
        Ok(x)
    } else {
        ComplexFactorization::factor(triplets, config.method)?.solve(rhs)
    }
}

pub(crate) fn map_real_solution(circuit: &Circuit, x: &[f64]) -> HashMap<String, f64> {
    circuit
        .index_map
        .iter()
        .map(|(name, &index)| (name.clone(), x[index]))
        .collect()
}

pub(crate) fn map_complex_solution(circuit: &Circuit, x: &[c64]) -> HashMap<String, c64> {
    circuit
        .index_map
        .iter()
        .map(|(name, &index)| (name.clone(), x[index]))
        .collect()
}
