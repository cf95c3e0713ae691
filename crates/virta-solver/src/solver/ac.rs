use std::f64::consts::PI;

use log::info;
use virta_parser::analyses::AcAnalysis;
use virta_parser::circuit::Circuit;

use crate::assemble::assemble_ac;
use crate::config::SolverConfig;
use crate::solver::{map_complex_solution, solve_complex_system};
use crate::{AcSweepPoint, Result};

/// Solves an AC frequency sweep.
///
/// Unlike the DC sweep, the matrix itself changes with ω, so every step
/// assembles and factors (or iterates) from scratch.
pub fn solve(
    circuit: &Circuit,
    config: &SolverConfig,
    analysis: &AcAnalysis,
) -> Result<Vec<AcSweepPoint>> {
    let frequencies = analysis.frequencies();
    info!(
        "AC {} sweep over {} frequencies in [{}, {}] Hz",
        analysis.scale,
        frequencies.len(),
        analysis.start_freq,
        analysis.stop_freq
    );

    let mut points = Vec::with_capacity(frequencies.len());
    for frequency in frequencies {
        if frequency <= 0.0 {
            // Physically meaningless for an AC sweep; skip rather than fail.
            info!("skipping non-positive frequency {frequency}");
            continue;
        }

        let omega = 2.0 * PI * frequency;
        let (matrix, rhs) = assemble_ac(circuit, omega);
        let x = solve_complex_system(&matrix, &rhs, config)?;

        points.push(AcSweepPoint {
            frequency,
            solution: map_complex_solution(circuit, &x),
        });
    }

    Ok(points)
}
