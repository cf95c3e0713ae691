use faer::c64;
use virta_matrix::TripletList;
use virta_parser::circuit::Circuit;

use crate::stamp::Stampable;

/// Assembles the real DC system `(A, b)` in one pass over the elements.
///
/// Capacitors contribute nothing (open at DC); inductor branch rows encode
/// shorts. The triplet list still carries duplicate entries; compaction
/// happens when a concrete matrix is built from it.
pub fn assemble_dc(circuit: &Circuit) -> (TripletList<f64>, Vec<f64>) {
    let dim = circuit.dimension();
    let mut matrix = TripletList::new(dim, dim);
    let mut rhs = vec![0.0; dim];

    for element in &circuit.elements {
        matrix.extend(element.stamp_conductance_dc(&circuit.index_map));
        for triplet in element.stamp_excitation_dc(&circuit.index_map) {
            rhs[triplet.row] += triplet.val;
        }
    }

    (matrix, rhs)
}

/// Assembles the complex AC system `(A(ω), b)` at angular frequency
/// `omega`, where `A(ω) = G + jωC`.
pub fn assemble_ac(circuit: &Circuit, omega: f64) -> (TripletList<c64>, Vec<c64>) {
    let dim = circuit.dimension();
    let mut matrix = TripletList::new(dim, dim);
    let mut rhs = vec![c64::new(0.0, 0.0); dim];

    for element in &circuit.elements {
        matrix.extend(element.stamp_conductance_ac(&circuit.index_map, omega));
        for triplet in element.stamp_excitation_ac(&circuit.index_map, omega) {
            rhs[triplet.row] += triplet.val;
        }
    }

    (matrix, rhs)
}
