use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::info;
use virta_result::{write_ac_sweep_results, write_dc_sweep_results, write_op_results};
use virta_solver::solver::Solver;

/// Virta is a SPICE-like circuit simulator written in Rust.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist file to simulate.
    netlist: PathBuf,

    /// Directory where the analysis output files are written.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let circuit = match virta_parser::netlist::parse_netlist_file(&args.netlist) {
        Ok(circuit) => circuit,
        Err(e) => {
            eprintln!("Error parsing netlist '{}': {e}", args.netlist.display());
            process::exit(1);
        }
    };

    if let Err(e) = std::fs::create_dir_all(&args.output_dir) {
        eprintln!(
            "Error creating output directory '{}': {e}",
            args.output_dir.display()
        );
        process::exit(1);
    }

    let solver = Solver::new(circuit);
    let circuit = solver.circuit();

    // The operating point always runs first, like the sweeps it feeds.
    let op_solution = solver.solve_op().unwrap_or_else(|e| {
        eprintln!("Error during operating point analysis: {e}");
        process::exit(1);
    });
    write_op_results(&circuit.nodes, &op_solution, &args.output_dir).unwrap_or_else(|e| {
        eprintln!("Error writing operating point results: {e}");
        process::exit(1);
    });

    for analysis in &circuit.dc_sweeps {
        let points = solver.solve_dc(analysis).unwrap_or_else(|e| {
            eprintln!("Error during DC sweep of {}: {e}", analysis.source);
            process::exit(1);
        });
        write_dc_sweep_results(analysis, &circuit.plot_nodes, &points, &args.output_dir)
            .unwrap_or_else(|e| {
                eprintln!("Error writing DC sweep results: {e}");
                process::exit(1);
            });
    }

    for analysis in &circuit.ac_sweeps {
        let points = solver.solve_ac(analysis).unwrap_or_else(|e| {
            eprintln!("Error during AC sweep: {e}");
            process::exit(1);
        });
        write_ac_sweep_results(analysis, &circuit.plot_nodes, &points, &args.output_dir)
            .unwrap_or_else(|e| {
                eprintln!("Error writing AC sweep results: {e}");
                process::exit(1);
            });
    }

    info!("all analyses completed");
}
