use std::{env, path::Path, path::PathBuf};

use virta_solver::config::{Method, SolverConfig};
use virta_solver::solver::Solver;

fn circuits_dir() -> PathBuf {
    Path::new(&env::var("CARGO_MANIFEST_DIR").unwrap()).join("../../circuits/")
}

#[test]
fn test_voltage_divider_op() {
    let path = circuits_dir().join("voltage_divider/voltage_divider.cir");
    let circuit = virta_parser::netlist::parse_netlist_file(&path).unwrap();

    let solver = Solver::new(circuit);
    let solution = solver.solve_op().unwrap();

    assert!((solution.get("V(1)").unwrap() - 10.0).abs() < 1e-9);
    assert!((solution.get("V(2)").unwrap() - 5.0).abs() < 1e-9);
    assert!((solution.get("I(V1)").unwrap() - (-0.005)).abs() < 1e-9);
}

#[test]
fn test_rl_divider_op() {
    // The inductor is a short at DC, so node 2 sits at ground and the full
    // 5 V drops across the 10 ohm resistor.
    let path = circuits_dir().join("rl_divider/rl_divider.cir");
    let circuit = virta_parser::netlist::parse_netlist_file(&path).unwrap();

    let solver = Solver::new(circuit);
    let solution = solver.solve_op().unwrap();

    assert!((solution.get("V(2)").unwrap() - 0.0).abs() < 1e-9);
    assert!((solution.get("I(V1)").unwrap() - (-0.5)).abs() < 1e-9);
    assert!((solution.get("I(L1)").unwrap() - 0.5).abs() < 1e-9);
}

#[test]
fn test_mesh_with_two_sources() {
    let circuit_description = "
V1 2 1 32
R1 1 0 2
R2 2 3 4
R3 2 0 8
V2 3 0 20
";
    let circuit = virta_parser::netlist::parse_netlist(circuit_description).unwrap();
    let solver = Solver::new(circuit);
    let solution = solver.solve_op().unwrap();

    assert!((solution.get("V(1)").unwrap() - (-8.0)).abs() < 1e-9);
    assert!((solution.get("V(2)").unwrap() - 24.0).abs() < 1e-9);
    assert!((solution.get("V(3)").unwrap() - 20.0).abs() < 1e-9);
    assert!((solution.get("I(V1)").unwrap() - (-4.0)).abs() < 1e-9);
    assert!((solution.get("I(V2)").unwrap() - 1.0).abs() < 1e-9);
}

/// A purely resistive, current-driven network: the MNA matrix has no
/// Group 2 rows and is symmetric positive-definite, so every method from
/// dense Cholesky to CG applies.
const SPD_NETWORK: &str = "
I1 0 1 1m
R1 1 2 1k
R2 2 0 1k
R3 1 3 2k
R4 3 0 2k
R5 2 3 1k
";

#[test]
fn test_all_methods_agree_on_spd_network() {
    let reference = {
        let circuit = virta_parser::netlist::parse_netlist(SPD_NETWORK).unwrap();
        Solver::new(circuit).solve_op().unwrap()
    };

    for method in [
        Method::DenseCholesky,
        Method::SparseLu,
        Method::SparseCholesky,
        Method::Cg,
        Method::BiCg,
    ] {
        let circuit = virta_parser::netlist::parse_netlist(SPD_NETWORK).unwrap();
        let config = SolverConfig {
            method,
            sparse_storage: matches!(method, Method::SparseLu | Method::SparseCholesky),
            itol: 1e-9,
            max_iterations: 1000,
        };
        let solution = Solver::with_config(circuit, config).solve_op().unwrap();

        for (name, expected) in &reference {
            let actual = solution.get(name).unwrap();
            assert!(
                (actual - expected).abs() < 1e-6,
                "{method:?} disagrees on {name}: {actual} vs {expected}"
            );
        }
    }
}

#[test]
fn test_cg_matches_cholesky_elementwise() {
    let circuit = virta_parser::netlist::parse_netlist(SPD_NETWORK).unwrap();
    let cholesky = Solver::with_config(
        circuit.clone(),
        SolverConfig {
            method: Method::DenseCholesky,
            sparse_storage: false,
            itol: 1e-9,
            max_iterations: 1000,
        },
    )
    .solve_op()
    .unwrap();

    let cg = Solver::with_config(
        circuit,
        SolverConfig {
            method: Method::Cg,
            sparse_storage: false,
            itol: 1e-9,
            max_iterations: 1000,
        },
    )
    .solve_op()
    .unwrap();

    for (name, expected) in &cholesky {
        assert!((cg.get(name).unwrap() - expected).abs() < 1e-6, "{name}");
    }
}

#[test]
fn test_floating_voltage_source_is_singular() {
    // Two voltage sources forcing different voltages across the same pair
    // of nodes: structurally singular, must error instead of panicking.
    let circuit_description = "
V1 1 0 5
V2 1 0 3
R1 1 0 1k
";
    let circuit = virta_parser::netlist::parse_netlist(circuit_description).unwrap();
    let result = Solver::new(circuit).solve_op();
    assert!(matches!(
        result,
        Err(virta_solver::Error::SingularMatrix(_))
    ));
}
