use std::ops::AddAssign;

use faer::sparse::Triplet;

/// Accumulates matrix stamp contributions in triplet form.
///
/// MNA assembly pushes one triplet per stamp entry without caring whether
/// the cell was already touched; [`TripletList::compacted`] later merges
/// duplicates. Compaction sorts by column then row, so the same netlist
/// always produces the same entry order.
#[derive(Debug, Clone)]
pub struct TripletList<T> {
    rows: usize,
    cols: usize,
    entries: Vec<Triplet<usize, usize, T>>,
}

impl<T: Copy + AddAssign> TripletList<T> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: Vec::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records one contribution to cell (row, col).
    ///
    /// # Panics
    /// Panics if the indices fall outside the matrix; stamps are expected
    /// to drop ground contributions before they get here.
    pub fn push(&mut self, row: usize, col: usize, value: T) {
        assert!(
            row < self.rows && col < self.cols,
            "triplet ({row}, {col}) outside {}x{} matrix",
            self.rows,
            self.cols
        );
        self.entries.push(Triplet::new(row, col, value));
    }

    pub fn extend(&mut self, triplets: impl IntoIterator<Item = Triplet<usize, usize, T>>) {
        for triplet in triplets {
            self.push(triplet.row, triplet.col, triplet.val);
        }
    }

    /// Merges duplicate entries and returns the result sorted by
    /// (column, row).
    pub fn compacted(&self) -> Vec<Triplet<usize, usize, T>> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|t| (t.col, t.row));

        let mut compacted: Vec<Triplet<usize, usize, T>> = Vec::with_capacity(sorted.len());
        for triplet in sorted {
            match compacted.last_mut() {
                Some(last) if last.row == triplet.row && last.col == triplet.col => {
                    last.val += triplet.val;
                }
                _ => compacted.push(triplet),
            }
        }
        compacted
    }
}
