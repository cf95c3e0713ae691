use criterion::{Criterion, black_box, criterion_group, criterion_main};
use virta_solver::solver::Solver;

/// Builds a resistor ladder netlist: V1 drives node 1, each section adds a
/// series and a shunt resistor.
fn ladder_netlist(sections: usize) -> String {
    let mut netlist = String::from("V1 1 0 1\n");
    for k in 1..=sections {
        netlist.push_str(&format!("R{} {} {} 1k\n", 2 * k - 1, k, k + 1));
        netlist.push_str(&format!("R{} {} 0 1k\n", 2 * k, k + 1));
    }
    netlist
}

fn benchmark_resistor_ladder_200(c: &mut Criterion) {
    let circuit = virta_parser::netlist::parse_netlist(&ladder_netlist(200)).unwrap();

    c.bench_function("resistor_ladder_200_op", |b| {
        b.iter(|| {
            let solver = Solver::new(circuit.clone());
            let solution = solver.solve_op().unwrap();
            black_box(solution);
        })
    });
}

criterion_group!(benches, benchmark_resistor_ladder_200);
criterion_main!(benches);
