use std::collections::HashMap;

use faer::c64;
use faer::sparse::Triplet;
use virta_parser::elements::{
    Capacitor, CurrentSource, Element, Identifiable, Inductor, Resistor, VoltageSource,
};

/// A trait for elements that contribute their stamp to the MNA system.
///
/// The conductance stamps target the system matrix, the excitation stamps
/// target the right-hand side (column 0). All index lookups go through the
/// circuit index map; a failed lookup means the node is ground, and the
/// contribution is dropped.
pub trait Stampable {
    /// Matrix stamp for DC analysis.
    fn stamp_conductance_dc(
        &self,
        index_map: &HashMap<String, usize>,
    ) -> Vec<Triplet<usize, usize, f64>>;

    /// Right-hand-side stamp for DC analysis.
    fn stamp_excitation_dc(
        &self,
        index_map: &HashMap<String, usize>,
    ) -> Vec<Triplet<usize, usize, f64>>;

    /// Matrix stamp for AC analysis at angular frequency `omega`.
    fn stamp_conductance_ac(
        &self,
        index_map: &HashMap<String, usize>,
        omega: f64,
    ) -> Vec<Triplet<usize, usize, c64>>;

    /// Right-hand-side stamp for AC analysis.
    fn stamp_excitation_ac(
        &self,
        index_map: &HashMap<String, usize>,
        omega: f64,
    ) -> Vec<Triplet<usize, usize, c64>>;
}

fn node_index(index_map: &HashMap<String, usize>, node: &str) -> Option<usize> {
    index_map.get(&format!("V({node})")).copied()
}

fn branch_index(index_map: &HashMap<String, usize>, identifier: &str) -> Option<usize> {
    index_map.get(&format!("I({identifier})")).copied()
}

/// The two-terminal conductance pattern shared by resistors (g real) and
/// capacitors (jωC), with ground entries dropped.
fn conductance_pattern<T: Copy + std::ops::Neg<Output = T>>(
    plus: Option<usize>,
    minus: Option<usize>,
    g: T,
) -> Vec<Triplet<usize, usize, T>> {
    let mut triplets = Vec::with_capacity(4);
    if let Some(i) = plus {
        triplets.push(Triplet::new(i, i, g));
    }
    if let Some(j) = minus {
        triplets.push(Triplet::new(j, j, g));
    }
    if let (Some(i), Some(j)) = (plus, minus) {
        triplets.push(Triplet::new(i, j, -g));
        triplets.push(Triplet::new(j, i, -g));
    }
    triplets
}

/// The incidence pattern tying a Group 2 branch current to its nodes:
/// ±1 in the branch column and the matching branch row entries.
fn incidence_pattern<T: Copy + std::ops::Neg<Output = T>>(
    plus: Option<usize>,
    minus: Option<usize>,
    branch: usize,
    one: T,
) -> Vec<Triplet<usize, usize, T>> {
    let mut triplets = Vec::with_capacity(4);
    if let Some(i) = plus {
        triplets.push(Triplet::new(i, branch, one));
        triplets.push(Triplet::new(branch, i, one));
    }
    if let Some(j) = minus {
        triplets.push(Triplet::new(j, branch, -one));
        triplets.push(Triplet::new(branch, j, -one));
    }
    triplets
}

impl Stampable for Resistor {
    fn stamp_conductance_dc(
        &self,
        index_map: &HashMap<String, usize>,
    ) -> Vec<Triplet<usize, usize, f64>> {
        conductance_pattern(
            node_index(index_map, &self.plus),
            node_index(index_map, &self.minus),
            1.0 / self.value,
        )
    }

    fn stamp_excitation_dc(&self, _: &HashMap<String, usize>) -> Vec<Triplet<usize, usize, f64>> {
        Vec::new()
    }

    fn stamp_conductance_ac(
        &self,
        index_map: &HashMap<String, usize>,
        _omega: f64,
    ) -> Vec<Triplet<usize, usize, c64>> {
        conductance_pattern(
            node_index(index_map, &self.plus),
            node_index(index_map, &self.minus),
            c64::new(1.0 / self.value, 0.0),
        )
    }

    fn stamp_excitation_ac(
        &self,
        _: &HashMap<String, usize>,
        _omega: f64,
    ) -> Vec<Triplet<usize, usize, c64>> {
        Vec::new()
    }
}

impl Stampable for Capacitor {
    // Open at DC: no stamp at all.
    fn stamp_conductance_dc(&self, _: &HashMap<String, usize>) -> Vec<Triplet<usize, usize, f64>> {
        Vec::new()
    }

    fn stamp_excitation_dc(&self, _: &HashMap<String, usize>) -> Vec<Triplet<usize, usize, f64>> {
        Vec::new()
    }

    fn stamp_conductance_ac(
        &self,
        index_map: &HashMap<String, usize>,
        omega: f64,
    ) -> Vec<Triplet<usize, usize, c64>> {
        conductance_pattern(
            node_index(index_map, &self.plus),
            node_index(index_map, &self.minus),
            c64::new(0.0, omega * self.value),
        )
    }

    fn stamp_excitation_ac(
        &self,
        _: &HashMap<String, usize>,
        _omega: f64,
    ) -> Vec<Triplet<usize, usize, c64>> {
        Vec::new()
    }
}

impl Stampable for Inductor {
    fn stamp_conductance_dc(
        &self,
        index_map: &HashMap<String, usize>,
    ) -> Vec<Triplet<usize, usize, f64>> {
        let Some(branch) = branch_index(index_map, &self.identifier()) else {
            return Vec::new();
        };
        // The branch row reads v+ − v− = 0: a short at DC.
        incidence_pattern(
            node_index(index_map, &self.plus),
            node_index(index_map, &self.minus),
            branch,
            1.0,
        )
    }

    fn stamp_excitation_dc(&self, _: &HashMap<String, usize>) -> Vec<Triplet<usize, usize, f64>> {
        Vec::new()
    }

    fn stamp_conductance_ac(
        &self,
        index_map: &HashMap<String, usize>,
        omega: f64,
    ) -> Vec<Triplet<usize, usize, c64>> {
        let Some(branch) = branch_index(index_map, &self.identifier()) else {
            return Vec::new();
        };
        let mut triplets = incidence_pattern(
            node_index(index_map, &self.plus),
            node_index(index_map, &self.minus),
            branch,
            c64::new(1.0, 0.0),
        );
        triplets.push(Triplet::new(
            branch,
            branch,
            c64::new(0.0, -omega * self.value),
        ));
        triplets
    }

    fn stamp_excitation_ac(
        &self,
        _: &HashMap<String, usize>,
        _omega: f64,
    ) -> Vec<Triplet<usize, usize, c64>> {
        Vec::new()
    }
}

impl Stampable for VoltageSource {
    fn stamp_conductance_dc(
        &self,
        index_map: &HashMap<String, usize>,
    ) -> Vec<Triplet<usize, usize, f64>> {
        let Some(branch) = branch_index(index_map, &self.identifier()) else {
            return Vec::new();
        };
        incidence_pattern(
            node_index(index_map, &self.plus),
            node_index(index_map, &self.minus),
            branch,
            1.0,
        )
    }

    fn stamp_excitation_dc(
        &self,
        index_map: &HashMap<String, usize>,
    ) -> Vec<Triplet<usize, usize, f64>> {
        match branch_index(index_map, &self.identifier()) {
            Some(branch) => vec![Triplet::new(branch, 0, self.dc_value)],
            None => Vec::new(),
        }
    }

    fn stamp_conductance_ac(
        &self,
        index_map: &HashMap<String, usize>,
        _omega: f64,
    ) -> Vec<Triplet<usize, usize, c64>> {
        let Some(branch) = branch_index(index_map, &self.identifier()) else {
            return Vec::new();
        };
        incidence_pattern(
            node_index(index_map, &self.plus),
            node_index(index_map, &self.minus),
            branch,
            c64::new(1.0, 0.0),
        )
    }

    fn stamp_excitation_ac(
        &self,
        index_map: &HashMap<String, usize>,
        _omega: f64,
    ) -> Vec<Triplet<usize, usize, c64>> {
        match branch_index(index_map, &self.identifier()) {
            Some(branch) => vec![Triplet::new(
                branch,
                0,
                c64::from_polar(self.ac_magnitude, self.ac_phase.to_radians()),
            )],
            None => Vec::new(),
        }
    }
}

impl Stampable for CurrentSource {
    fn stamp_conductance_dc(&self, _: &HashMap<String, usize>) -> Vec<Triplet<usize, usize, f64>> {
        Vec::new()
    }

    fn stamp_excitation_dc(
        &self,
        index_map: &HashMap<String, usize>,
    ) -> Vec<Triplet<usize, usize, f64>> {
        current_excitation(
            node_index(index_map, &self.plus),
            node_index(index_map, &self.minus),
            self.dc_value,
        )
    }

    fn stamp_conductance_ac(
        &self,
        _: &HashMap<String, usize>,
        _omega: f64,
    ) -> Vec<Triplet<usize, usize, c64>> {
        Vec::new()
    }

    fn stamp_excitation_ac(
        &self,
        index_map: &HashMap<String, usize>,
        _omega: f64,
    ) -> Vec<Triplet<usize, usize, c64>> {
        current_excitation(
            node_index(index_map, &self.plus),
            node_index(index_map, &self.minus),
            c64::from_polar(self.ac_magnitude, self.ac_phase.to_radians()),
        )
    }
}

/// Current flows from plus to minus inside the source, so the plus node
/// row loses the current and the minus node row gains it.
fn current_excitation<T: Copy + std::ops::Neg<Output = T>>(
    plus: Option<usize>,
    minus: Option<usize>,
    value: T,
) -> Vec<Triplet<usize, usize, T>> {
    let mut triplets = Vec::with_capacity(2);
    if let Some(i) = plus {
        triplets.push(Triplet::new(i, 0, -value));
    }
    if let Some(j) = minus {
        triplets.push(Triplet::new(j, 0, value));
    }
    triplets
}

/// A macro to forward a stamp call to the correct inner element struct.
macro_rules! dispatch {
    ($self:expr, $method:ident($($args:expr),*)) => {
        match $self {
            Element::Resistor(e) => e.$method($($args),*),
            Element::Capacitor(e) => e.$method($($args),*),
            Element::Inductor(e) => e.$method($($args),*),
            Element::VoltageSource(e) => e.$method($($args),*),
            Element::CurrentSource(e) => e.$method($($args),*),
        }
    };
}

impl Stampable for Element {
    fn stamp_conductance_dc(
        &self,
        index_map: &HashMap<String, usize>,
    ) -> Vec<Triplet<usize, usize, f64>> {
        dispatch!(self, stamp_conductance_dc(index_map))
    }

    fn stamp_excitation_dc(
        &self,
        index_map: &HashMap<String, usize>,
    ) -> Vec<Triplet<usize, usize, f64>> {
        dispatch!(self, stamp_excitation_dc(index_map))
    }

    fn stamp_conductance_ac(
        &self,
        index_map: &HashMap<String, usize>,
        omega: f64,
    ) -> Vec<Triplet<usize, usize, c64>> {
        dispatch!(self, stamp_conductance_ac(index_map, omega))
    }

    fn stamp_excitation_ac(
        &self,
        index_map: &HashMap<String, usize>,
        omega: f64,
    ) -> Vec<Triplet<usize, usize, c64>> {
        dispatch!(self, stamp_excitation_ac(index_map, omega))
    }
}
