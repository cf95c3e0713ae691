use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use faer::c64;
use log::info;
use virta_parser::analyses::{AcAnalysis, DcAnalysis, SweepScale};
use virta_solver::{AcSweepPoint, DcSweepPoint};

/// Converts a rectangular complex value to `(magnitude, phase)` with the
/// phase in degrees.
pub fn rect_to_polar(z: c64) -> (f64, f64) {
    (z.norm(), z.arg().to_degrees())
}

/// Formats a sweep bound the short way for use inside a file name.
fn format_bound(value: f64) -> String {
    format!("{value}")
}

/// File name for one plotted node of a DC sweep.
pub fn dc_sweep_file_name(analysis: &DcAnalysis, node: &str) -> String {
    format!(
        "dc_sweep_analysis_V({node})_{}_{}_{}_{}.txt",
        analysis.source,
        format_bound(analysis.start),
        format_bound(analysis.stop),
        format_bound(analysis.step),
    )
}

/// File name for one plotted node of an AC sweep.
pub fn ac_sweep_file_name(analysis: &AcAnalysis, node: &str) -> String {
    format!(
        "ac_analysis_V({node})_{}_{}_{}.txt",
        format_bound(analysis.start_freq),
        format_bound(analysis.stop_freq),
        analysis.scale,
    )
}

/// Writes the operating point table to `dc_operating_point.txt`.
///
/// One row per non-ground node, in matrix index order.
pub fn write_op_results(
    nodes: &[String],
    solution: &HashMap<String, f64>,
    output_dir: &Path,
) -> io::Result<PathBuf> {
    let path = output_dir.join("dc_operating_point.txt");
    let mut out = BufWriter::new(File::create(&path)?);

    writeln!(out, "{:<30}{:<30}", "Node", "Voltage (V)")?;
    writeln!(out, "-----------------------------------------")?;
    for node in nodes {
        let value = solution.get(&format!("V({node})")).copied().unwrap_or(0.0);
        writeln!(out, "{node:<30}{value:<30.12}")?;
    }
    out.flush()?;

    info!("Saved operating point results to {}", path.display());
    Ok(path)
}

/// Writes one DC sweep output file per plotted node.
pub fn write_dc_sweep_results(
    analysis: &DcAnalysis,
    plot_nodes: &[String],
    points: &[DcSweepPoint],
    output_dir: &Path,
) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(plot_nodes.len());

    for node in plot_nodes {
        let path = output_dir.join(dc_sweep_file_name(analysis, node));
        let mut out = BufWriter::new(File::create(&path)?);

        writeln!(out, "{:<30}{:<30}", "Voltage Sweep (V)", "Voltage (V)")?;
        writeln!(out, "-----------------------------------------")?;
        for point in points {
            let value = point
                .solution
                .get(&format!("V({node})"))
                .copied()
                .unwrap_or(0.0);
            writeln!(out, "{:<30.12}{value:<30.12}", point.sweep_value)?;
        }
        out.flush()?;

        info!("Saved DC sweep results to {}", path.display());
        paths.push(path);
    }

    Ok(paths)
}

/// Writes one AC sweep output file per plotted node.
///
/// LIN sweeps report the magnitude in Volts; LOG sweeps report it in
/// decibels, `20·log10 |V|`.
pub fn write_ac_sweep_results(
    analysis: &AcAnalysis,
    plot_nodes: &[String],
    points: &[AcSweepPoint],
    output_dir: &Path,
) -> io::Result<Vec<PathBuf>> {
    let magnitude_header = match analysis.scale {
        SweepScale::Lin => "Magnitude (V)",
        SweepScale::Log => "Magnitude (dB)",
    };

    let mut paths = Vec::with_capacity(plot_nodes.len());
    for node in plot_nodes {
        let path = output_dir.join(ac_sweep_file_name(analysis, node));
        let mut out = BufWriter::new(File::create(&path)?);

        writeln!(
            out,
            "{:<30}{magnitude_header:<30}{:<30}",
            "Frequency (Hz)", "Phase (degrees)"
        )?;
        writeln!(
            out,
            "---------------------------------------------------------------------------"
        )?;
        for point in points {
            let value = point
                .solution
                .get(&format!("V({node})"))
                .copied()
                .unwrap_or(c64::new(0.0, 0.0));
            let (magnitude, phase) = rect_to_polar(value);
            let magnitude = match analysis.scale {
                SweepScale::Lin => magnitude,
                SweepScale::Log => 20.0 * magnitude.log10(),
            };
            writeln!(
                out,
                "{:<30.12}{magnitude:<30.12}{phase:<30.12}",
                point.frequency
            )?;
        }
        out.flush()?;

        info!("Saved AC sweep results to {}", path.display());
        paths.push(path);
    }

    Ok(paths)
}
