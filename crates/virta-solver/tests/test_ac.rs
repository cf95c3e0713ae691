use std::{env, path::Path, path::PathBuf};

use virta_solver::config::{Method, SolverConfig};
use virta_solver::solver::Solver;

fn circuits_dir() -> PathBuf {
    Path::new(&env::var("CARGO_MANIFEST_DIR").unwrap()).join("../../circuits/")
}

#[test]
fn test_rc_lowpass_magnitudes() {
    // Three log-spaced points at roughly fc, 10 fc and 100 fc. The transfer
    // magnitude is 1/sqrt(1 + (f/fc)^2).
    let path = circuits_dir().join("rc_lowpass/rc_lowpass.cir");
    let circuit = virta_parser::netlist::parse_netlist_file(&path).unwrap();
    let solver = Solver::new(circuit);

    let analysis = solver.circuit().ac_sweeps[0].clone();
    let points = solver.solve_ac(&analysis).unwrap();
    assert_eq!(points.len(), 3);

    let expected = [0.7071, 0.0995, 0.0100];
    for (point, expected) in points.iter().zip(expected) {
        let magnitude = point.solution.get("V(2)").unwrap().norm();
        assert!(
            (magnitude - expected).abs() < 1e-3,
            "f = {}: |V(2)| = {magnitude}, expected {expected}",
            point.frequency
        );
    }

    // At the corner the phase sits at -45 degrees.
    let phase = points[0].solution.get("V(2)").unwrap().arg().to_degrees();
    assert!((phase + 45.0).abs() < 0.5, "corner phase {phase}");
}

#[test]
fn test_rl_highpass_magnitudes() {
    // |V(2)| = wL / sqrt(R^2 + (wL)^2); unity corner at f = R/(2 pi L).
    let circuit_description = "
V1 1 0 AC 1 0
R1 1 2 1
L1 2 0 1m
.AC LIN 2 159.155 1591.55
";
    let circuit = virta_parser::netlist::parse_netlist(circuit_description).unwrap();
    let solver = Solver::new(circuit);

    let analysis = solver.circuit().ac_sweeps[0].clone();
    let points = solver.solve_ac(&analysis).unwrap();
    assert_eq!(points.len(), 2);

    let corner = points[0].solution.get("V(2)").unwrap().norm();
    let decade = points[1].solution.get("V(2)").unwrap().norm();
    assert!((corner - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-3);
    assert!((decade - 0.99504).abs() < 1e-3);
}

#[test]
fn test_source_phase_rotates_the_response() {
    let circuit_description = "
V1 1 0 AC 1 90
R1 1 0 1k
.AC LIN 2 100 200
";
    let circuit = virta_parser::netlist::parse_netlist(circuit_description).unwrap();
    let solver = Solver::new(circuit);

    let analysis = solver.circuit().ac_sweeps[0].clone();
    let points = solver.solve_ac(&analysis).unwrap();

    // 1∠90° is pure imaginary.
    let v1 = points[0].solution.get("V(1)").unwrap();
    assert!(v1.re.abs() < 1e-12);
    assert!((v1.im - 1.0).abs() < 1e-12);
}

#[test]
fn test_nonpositive_frequencies_are_skipped() {
    let circuit_description = "
V1 1 0 AC 1 0
R1 1 0 1k
.AC LIN 3 0 100
";
    let circuit = virta_parser::netlist::parse_netlist(circuit_description).unwrap();
    let solver = Solver::new(circuit);

    let analysis = solver.circuit().ac_sweeps[0].clone();
    let points = solver.solve_ac(&analysis).unwrap();

    // 0, 50, 100 Hz: the zero point is dropped.
    assert_eq!(points.len(), 2);
    assert!((points[0].frequency - 50.0).abs() < 1e-12);
}

#[test]
fn test_iterative_ac_matches_direct() {
    let path = circuits_dir().join("rc_lowpass/rc_lowpass.cir");

    let direct = {
        let circuit = virta_parser::netlist::parse_netlist_file(&path).unwrap();
        let solver = Solver::new(circuit);
        let analysis = solver.circuit().ac_sweeps[0].clone();
        solver.solve_ac(&analysis).unwrap()
    };

    let circuit = virta_parser::netlist::parse_netlist_file(&path).unwrap();
    let config = SolverConfig {
        method: Method::BiCg,
        sparse_storage: false,
        itol: 1e-9,
        max_iterations: 1000,
    };
    let solver = Solver::with_config(circuit, config);
    let analysis = solver.circuit().ac_sweeps[0].clone();
    let iterative = solver.solve_ac(&analysis).unwrap();

    for (a, b) in direct.iter().zip(&iterative) {
        let lhs = a.solution.get("V(2)").unwrap();
        let rhs = b.solution.get("V(2)").unwrap();
        assert!((lhs - rhs).norm() < 1e-4, "f = {}", a.frequency);
    }
}

#[test]
fn test_sparse_ac_matches_dense() {
    let path = circuits_dir().join("rc_lowpass/rc_lowpass.cir");

    let dense = {
        let circuit = virta_parser::netlist::parse_netlist_file(&path).unwrap();
        let solver = Solver::new(circuit);
        let analysis = solver.circuit().ac_sweeps[0].clone();
        solver.solve_ac(&analysis).unwrap()
    };

    let circuit = virta_parser::netlist::parse_netlist_file(&path).unwrap();
    let config = SolverConfig {
        method: Method::SparseLu,
        sparse_storage: true,
        itol: 1e-9,
        max_iterations: 1000,
    };
    let solver = Solver::with_config(circuit, config);
    let analysis = solver.circuit().ac_sweeps[0].clone();
    let sparse = solver.solve_ac(&analysis).unwrap();

    for (a, b) in dense.iter().zip(&sparse) {
        let lhs = a.solution.get("V(2)").unwrap();
        let rhs = b.solution.get("V(2)").unwrap();
        assert!((lhs - rhs).norm() < 1e-9);
    }
}
