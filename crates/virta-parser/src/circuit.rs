use crate::analyses::{AcAnalysis, DcAnalysis, Options};
use crate::prelude::*;

#[derive(Debug, Clone)]
/// A structured representation of a parsed netlist.
///
/// The index map assigns every unknown of the MNA system its matrix index:
/// node voltages are keyed `V(<node>)` and occupy `[0, num_nodes)` in order
/// of first appearance; Group 2 branch currents are keyed
/// `I(<identifier>)` and occupy `[num_nodes, dimension)` in element
/// declaration order. Ground (`0`) has no entry.
pub struct Circuit {
    /// The circuit elements, in netlist order.
    pub elements: Vec<Element>,

    /// Maps unknown names (`V(..)`, `I(..)`) to matrix indices.
    pub index_map: HashMap<String, usize>,

    /// Non-ground node names, in index order.
    pub nodes: Vec<String>,

    /// Number of non-ground nodes.
    pub num_nodes: usize,

    /// Number of Group 2 elements (voltage sources and inductors).
    pub num_branches: usize,

    /// Solver options from `.OPTIONS` directives.
    pub options: Options,

    /// DC sweep specifications, in netlist order.
    pub dc_sweeps: Vec<DcAnalysis>,

    /// AC sweep specifications, in netlist order.
    pub ac_sweeps: Vec<AcAnalysis>,

    /// Nodes requested by `.PLOT`/`.PRINT` directives, in netlist order.
    pub plot_nodes: Vec<String>,
}

impl Circuit {
    /// Total dimension of the MNA system.
    pub fn dimension(&self) -> usize {
        self.num_nodes + self.num_branches
    }

    /// Matrix index of a node voltage, `None` for ground or unknown nodes.
    pub fn voltage_index(&self, node: &str) -> Option<usize> {
        self.index_map.get(&format!("V({node})")).copied()
    }

    /// Matrix index of a Group 2 branch current.
    pub fn branch_index(&self, identifier: &str) -> Option<usize> {
        self.index_map.get(&format!("I({identifier})")).copied()
    }

    /// Looks up an element by its identifier, e.g. `V1`.
    pub fn find_element(&self, identifier: &str) -> Option<&Element> {
        self.elements
            .iter()
            .find(|e| e.identifier() == identifier)
    }
}
