use std::collections::HashMap;

use log::info;
use virta_parser::circuit::Circuit;

use crate::assemble::assemble_dc;
use crate::config::SolverConfig;
use crate::solver::{map_real_solution, solve_real_system};
use crate::Result;

/// Solves for the DC operating point: assemble once, solve once.
///
/// The returned map is keyed like the circuit index map, so plotted node
/// voltages come out as `V(<node>)` and branch currents as `I(<elem>)`.
pub fn solve(circuit: &Circuit, config: &SolverConfig) -> Result<HashMap<String, f64>> {
    info!(
        "operating point: {} nodes, {} branch currents",
        circuit.num_nodes, circuit.num_branches
    );

    let (matrix, rhs) = assemble_dc(circuit);
    let x = solve_real_system(&matrix, &rhs, config)?;

    Ok(map_real_solution(circuit, &x))
}
