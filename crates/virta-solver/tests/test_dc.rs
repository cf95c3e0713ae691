use std::{env, path::Path, path::PathBuf};

use virta_parser::analyses::DcAnalysis;
use virta_solver::config::{Method, SolverConfig};
use virta_solver::solver::Solver;

fn circuits_dir() -> PathBuf {
    Path::new(&env::var("CARGO_MANIFEST_DIR").unwrap()).join("../../circuits/")
}

#[test]
fn test_current_source_sweep() {
    let path = circuits_dir().join("current_sweep/current_sweep.cir");
    let circuit = virta_parser::netlist::parse_netlist_file(&path).unwrap();
    let solver = Solver::new(circuit);

    let analysis = solver.circuit().dc_sweeps[0].clone();
    let points = solver.solve_dc(&analysis).unwrap();

    // 0..=10 in steps of 1: eleven points, V(1) climbing by 100 V each.
    assert_eq!(points.len(), 11);
    for (k, point) in points.iter().enumerate() {
        assert!((point.sweep_value - k as f64).abs() < 1e-12);
        let v1 = point.solution.get("V(1)").unwrap();
        assert!((v1 - 100.0 * k as f64).abs() < 1e-9, "step {k}: {v1}");
    }
}

#[test]
fn test_voltage_source_sweep() {
    let circuit_description = "
V1 1 0 0
R1 1 2 1k
R2 2 0 1k
.DC V1 0 10 2
";
    let circuit = virta_parser::netlist::parse_netlist(circuit_description).unwrap();
    let solver = Solver::new(circuit);

    let analysis = solver.circuit().dc_sweeps[0].clone();
    let points = solver.solve_dc(&analysis).unwrap();

    assert_eq!(points.len(), 6);
    for point in &points {
        let v2 = point.solution.get("V(2)").unwrap();
        assert!((v2 - point.sweep_value / 2.0).abs() < 1e-9);
    }
}

#[test]
fn test_sweep_values_do_not_drift() {
    // 0..1 in steps of 0.1 accumulates error when summed; the driver must
    // compute each value from the start instead.
    let circuit_description = "
V1 1 0 0
R1 1 0 1k
.DC V1 0 1 0.1
";
    let circuit = virta_parser::netlist::parse_netlist(circuit_description).unwrap();
    let solver = Solver::new(circuit);

    let analysis = solver.circuit().dc_sweeps[0].clone();
    let points = solver.solve_dc(&analysis).unwrap();

    assert_eq!(points.len(), 11);
    for (k, point) in points.iter().enumerate() {
        assert!((point.sweep_value - k as f64 * 0.1).abs() < 1e-15);
    }
}

#[test]
fn test_iterative_sweep_matches_direct() {
    let circuit_description = "
V1 1 0 0
R1 1 2 1k
R2 2 0 1k
.DC V1 0 5 1
";
    let direct = {
        let circuit = virta_parser::netlist::parse_netlist(circuit_description).unwrap();
        let solver = Solver::new(circuit);
        let analysis = solver.circuit().dc_sweeps[0].clone();
        solver.solve_dc(&analysis).unwrap()
    };

    let circuit = virta_parser::netlist::parse_netlist(circuit_description).unwrap();
    let config = SolverConfig {
        method: Method::BiCg,
        sparse_storage: true,
        itol: 1e-9,
        max_iterations: 1000,
    };
    let solver = Solver::with_config(circuit, config);
    let analysis = solver.circuit().dc_sweeps[0].clone();
    let iterative = solver.solve_dc(&analysis).unwrap();

    assert_eq!(direct.len(), iterative.len());
    for (a, b) in direct.iter().zip(&iterative) {
        for (name, expected) in &a.solution {
            assert!((b.solution.get(name).unwrap() - expected).abs() < 1e-6);
        }
    }
}

#[test]
fn test_unknown_sweep_source() {
    let circuit = virta_parser::netlist::parse_netlist("V1 1 0 1\nR1 1 0 1k").unwrap();
    let solver = Solver::new(circuit);

    let analysis = DcAnalysis {
        source: "V9".to_string(),
        start: 0.0,
        stop: 1.0,
        step: 0.5,
    };
    assert!(matches!(
        solver.solve_dc(&analysis),
        Err(virta_solver::Error::ElementNotFound(_))
    ));
}

#[test]
fn test_resistor_cannot_be_swept() {
    let circuit = virta_parser::netlist::parse_netlist("V1 1 0 1\nR1 1 0 1k").unwrap();
    let solver = Solver::new(circuit);

    let analysis = DcAnalysis {
        source: "R1".to_string(),
        start: 0.0,
        stop: 1.0,
        step: 0.5,
    };
    assert!(matches!(
        solver.solve_dc(&analysis),
        Err(virta_solver::Error::InvalidSweepSource(_))
    ));
}
