use log::info;
use virta_parser::analyses::DcAnalysis;
use virta_parser::circuit::Circuit;
use virta_parser::elements::{Element, Identifiable};

use crate::assemble::assemble_dc;
use crate::config::SolverConfig;
use crate::linear::RealFactorization;
use crate::solver::{map_real_solution, real_operator, run_real_iterative};
use crate::{DcSweepPoint, Error, Result};

/// Where the swept value lands in the right-hand side.
enum Target {
    /// Voltage source: the branch row carries the source value.
    Branch(usize),
    /// Current source: the node rows carry `-v` and `+v`; a ground end
    /// contributes nothing.
    Nodes(Option<usize>, Option<usize>),
}

/// Solves a DC sweep: repeated re-solve with only the right-hand side
/// changing, so direct methods factor the matrix exactly once.
pub fn solve(
    circuit: &Circuit,
    config: &SolverConfig,
    analysis: &DcAnalysis,
) -> Result<Vec<DcSweepPoint>> {
    let element = circuit
        .find_element(&analysis.source)
        .ok_or_else(|| Error::ElementNotFound(analysis.source.clone()))?;

    let target = match element {
        Element::VoltageSource(source) => {
            let branch = circuit
                .branch_index(&source.identifier())
                .ok_or_else(|| Error::ElementNotFound(analysis.source.clone()))?;
            Target::Branch(branch)
        }
        Element::CurrentSource(source) => Target::Nodes(
            circuit.voltage_index(&source.plus),
            circuit.voltage_index(&source.minus),
        ),
        _ => return Err(Error::InvalidSweepSource(analysis.source.clone())),
    };

    let (matrix, mut rhs) = assemble_dc(circuit);

    let factorization = if config.method.is_iterative() {
        None
    } else {
        Some(RealFactorization::factor(&matrix, config.method)?)
    };
    let operator = if config.method.is_iterative() {
        Some(real_operator(&matrix, config.sparse_storage)?)
    } else {
        None
    };

    // Start from zero, not from a leftover operating point; the iterative
    // path then warm-starts each step from the previous one.
    let mut x = vec![0.0; circuit.dimension()];

    let num_steps = analysis.num_steps();
    info!(
        "DC sweep of {} over [{}, {}] in {} steps",
        analysis.source, analysis.start, analysis.stop, num_steps
    );

    let mut points = Vec::with_capacity(num_steps);
    for k in 0..num_steps {
        let value = analysis.value_at(k);
        match target {
            Target::Branch(index) => rhs[index] = value,
            Target::Nodes(plus, minus) => {
                if let Some(i) = plus {
                    rhs[i] = -value;
                }
                if let Some(j) = minus {
                    rhs[j] = value;
                }
            }
        }

        if let Some(factorization) = &factorization {
            x = factorization.solve(&rhs)?;
        } else if let Some(operator) = &operator {
            run_real_iterative(operator.as_ref(), &rhs, &mut x, config)?;
        }

        points.push(DcSweepPoint {
            sweep_value: value,
            solution: map_real_solution(circuit, &x),
        });
    }

    Ok(points)
}
