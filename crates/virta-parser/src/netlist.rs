use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::analyses::{Directive, parse_directive};
use crate::circuit::Circuit;
use crate::elements::{
    capacitor::Capacitor, current_source::CurrentSource, inductor::Inductor, resistor::Resistor,
    voltage_source::VoltageSource,
};
use crate::prelude::*;

/// Parses one element line based on its leading type letter.
fn parse_element(line: &str) -> Result<Element> {
    match line.chars().next() {
        Some('R' | 'r') => Ok(line.parse::<Resistor>()?.into()),
        Some('C' | 'c') => Ok(line.parse::<Capacitor>()?.into()),
        Some('L' | 'l') => Ok(line.parse::<Inductor>()?.into()),
        Some('V' | 'v') => Ok(line.parse::<VoltageSource>()?.into()),
        Some('I' | 'i') => Ok(line.parse::<CurrentSource>()?.into()),
        _ => Err(Error::UnknownElement(line.to_string())),
    }
}

/// Parses a SPICE-like netlist into a [`Circuit`].
///
/// The format is line oriented:
/// - `*` or `%` starts a comment; blank lines are ignored.
/// - Each remaining line is either one element or one dot-directive.
/// - Node names are arbitrary identifiers; `0` is ground.
///
/// Node voltages get matrix indices in order of first appearance; branch
/// currents of Group 2 elements follow, in declaration order.
pub fn parse_netlist(input: &str) -> Result<Circuit> {
    let mut elements = Vec::new();
    let mut options = None;
    let mut dc_sweeps = Vec::new();
    let mut ac_sweeps = Vec::new();
    let mut plot_nodes = Vec::new();

    for (line_num, raw_line) in input.lines().enumerate() {
        let current_line = line_num + 1;

        // Drop inline `%` comments, then whole-line comments and blanks.
        let line = raw_line.split('%').next().unwrap_or("").trim();
        if line.is_empty() || line.starts_with('*') {
            continue;
        }

        if line.starts_with('.') {
            let directive = parse_directive(line).map_err(|e| Error::ParseError {
                line: current_line,
                message: e.to_string(),
            })?;
            match directive {
                Directive::Options(parsed) => options = Some(parsed),
                Directive::Dc(dc) => dc_sweeps.push(dc),
                Directive::Ac(ac) => ac_sweeps.push(ac),
                Directive::Plot(nodes) => plot_nodes.extend(nodes),
                Directive::End => {}
            }
            continue;
        }

        let element = parse_element(line).map_err(|e| Error::ParseError {
            line: current_line,
            message: e.to_string(),
        })?;
        elements.push(element);
    }

    if elements.is_empty() {
        return Err(Error::EmptyNetlist);
    }

    // Assign node voltage indices in order of first appearance, skipping
    // ground, then branch current indices in declaration order.
    let mut index_map = HashMap::new();
    let mut nodes = Vec::new();

    for element in &elements {
        for node in element.nodes() {
            if node == "0" {
                continue;
            }
            let key = format!("V({node})");
            if !index_map.contains_key(&key) {
                index_map.insert(key, nodes.len());
                nodes.push(node.to_string());
            }
        }
    }

    let num_nodes = nodes.len();
    let mut num_branches = 0;
    for element in &elements {
        if element.is_g2() {
            index_map.insert(format!("I({})", element.identifier()), num_nodes + num_branches);
            num_branches += 1;
        }
    }

    for node in &plot_nodes {
        if node != "0" && !index_map.contains_key(&format!("V({node})")) {
            return Err(Error::UnknownPlotNode(node.clone()));
        }
    }

    Ok(Circuit {
        elements,
        index_map,
        nodes,
        num_nodes,
        num_branches,
        options: options.unwrap_or_default(),
        dc_sweeps,
        ac_sweeps,
        plot_nodes,
    })
}

/// Parses a netlist file from disk.
pub fn parse_netlist_file(file_path: &Path) -> Result<Circuit> {
    let file = File::open(file_path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    parse_netlist(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOLTAGE_DIVIDER: &str = "
* voltage divider
V1 1 0 10
R1 1 2 1k
R2 2 0 1k
.PLOT V(2)
";

    #[test]
    fn test_parse_voltage_divider() {
        let circuit = parse_netlist(VOLTAGE_DIVIDER).unwrap();

        assert_eq!(circuit.elements.len(), 3);
        assert_eq!(circuit.num_nodes, 2);
        assert_eq!(circuit.num_branches, 1);
        assert_eq!(circuit.dimension(), 3);
        assert_eq!(circuit.plot_nodes, vec!["2".to_string()]);
    }

    #[test]
    fn test_node_indices_precede_branch_indices() {
        let circuit = parse_netlist(VOLTAGE_DIVIDER).unwrap();

        assert_eq!(circuit.voltage_index("1"), Some(0));
        assert_eq!(circuit.voltage_index("2"), Some(1));
        assert_eq!(circuit.branch_index("V1"), Some(2));
        assert_eq!(circuit.voltage_index("0"), None);
    }

    #[test]
    fn test_branch_indices_follow_declaration_order() {
        let input = "
V1 1 0 5
L1 1 2 1m
R1 2 0 10
V2 3 0 1
R2 3 2 10
";
        let circuit = parse_netlist(input).unwrap();
        let n = circuit.num_nodes;

        assert_eq!(n, 3);
        assert_eq!(circuit.branch_index("V1"), Some(n));
        assert_eq!(circuit.branch_index("L1"), Some(n + 1));
        assert_eq!(circuit.branch_index("V2"), Some(n + 2));
    }

    #[test]
    fn test_directives_are_collected() {
        let input = "
V1 1 0 10
R1 1 0 1k
.OPTIONS ITER ITOL=1e-6
.DC V1 0 5 1
.AC LIN 10 1 100
.PLOT V(1)
.END
";
        let circuit = parse_netlist(input).unwrap();
        assert!(circuit.options.iter);
        assert!((circuit.options.itol - 1e-6).abs() < 1e-18);
        assert_eq!(circuit.dc_sweeps.len(), 1);
        assert_eq!(circuit.ac_sweeps.len(), 1);
        assert_eq!(circuit.plot_nodes.len(), 1);
    }

    #[test]
    fn test_comments_and_blanks_are_skipped() {
        let input = "
* a comment
V1 1 0 1 % trailing comment

R1 1 0 1k
";
        let circuit = parse_netlist(input).unwrap();
        assert_eq!(circuit.elements.len(), 2);
    }

    #[test]
    fn test_empty_netlist() {
        assert!(matches!(parse_netlist("* nothing"), Err(Error::EmptyNetlist)));
    }

    #[test]
    fn test_parse_error_carries_line_number() {
        let input = "V1 1 0 1\nR1 1 0 oops";
        match parse_netlist(input) {
            Err(Error::ParseError { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_plot_node_is_rejected() {
        let input = "V1 1 0 1\nR1 1 0 1k\n.PLOT V(7)";
        assert!(matches!(
            parse_netlist(input),
            Err(Error::UnknownPlotNode(_))
        ));
    }
}
