use faer::c64;

use crate::operator::{ComplexOperator, RealOperator};
use crate::triplets::TripletList;
use crate::{Error, Result};

/// Square real matrix in compressed-column form.
///
/// Built from a compacted triplet list; the entries arrive sorted by
/// column, so the column pointer array is a single scan.
pub struct SparseMatrix {
    dim: usize,
    col_ptr: Vec<usize>,
    row_idx: Vec<usize>,
    values: Vec<f64>,
}

impl SparseMatrix {
    pub fn from_triplets(triplets: &TripletList<f64>) -> Result<Self> {
        if triplets.rows() != triplets.cols() {
            return Err(Error::InvalidStructure(format!(
                "expected a square matrix, got {}x{}",
                triplets.rows(),
                triplets.cols()
            )));
        }

        let dim = triplets.rows();
        let compacted = triplets.compacted();

        let mut col_ptr = vec![0usize; dim + 1];
        let mut row_idx = Vec::with_capacity(compacted.len());
        let mut values = Vec::with_capacity(compacted.len());

        for triplet in &compacted {
            col_ptr[triplet.col + 1] += 1;
            row_idx.push(triplet.row);
            values.push(triplet.val);
        }
        for col in 0..dim {
            col_ptr[col + 1] += col_ptr[col];
        }

        Ok(Self {
            dim,
            col_ptr,
            row_idx,
            values,
        })
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }
}

impl RealOperator for SparseMatrix {
    fn dim(&self) -> usize {
        self.dim
    }

    fn matvec(&self, x: &[f64], y: &mut [f64]) {
        y.fill(0.0);
        for (col, &xj) in x.iter().enumerate() {
            for idx in self.col_ptr[col]..self.col_ptr[col + 1] {
                y[self.row_idx[idx]] += self.values[idx] * xj;
            }
        }
    }

    fn matvec_transpose(&self, x: &[f64], y: &mut [f64]) {
        for (col, out) in y.iter_mut().enumerate() {
            let mut sum = 0.0;
            for idx in self.col_ptr[col]..self.col_ptr[col + 1] {
                sum += self.values[idx] * x[self.row_idx[idx]];
            }
            *out = sum;
        }
    }

    fn diagonal(&self) -> Vec<f64> {
        let mut diag = vec![0.0; self.dim];
        for col in 0..self.dim {
            for idx in self.col_ptr[col]..self.col_ptr[col + 1] {
                if self.row_idx[idx] == col {
                    diag[col] = self.values[idx];
                }
            }
        }
        diag
    }
}

/// Square complex matrix in compressed-column form.
pub struct SparseComplexMatrix {
    dim: usize,
    col_ptr: Vec<usize>,
    row_idx: Vec<usize>,
    values: Vec<c64>,
}

impl SparseComplexMatrix {
    pub fn from_triplets(triplets: &TripletList<c64>) -> Result<Self> {
        if triplets.rows() != triplets.cols() {
            return Err(Error::InvalidStructure(format!(
                "expected a square matrix, got {}x{}",
                triplets.rows(),
                triplets.cols()
            )));
        }

        let dim = triplets.rows();
        let compacted = triplets.compacted();

        let mut col_ptr = vec![0usize; dim + 1];
        let mut row_idx = Vec::with_capacity(compacted.len());
        let mut values = Vec::with_capacity(compacted.len());

        for triplet in &compacted {
            col_ptr[triplet.col + 1] += 1;
            row_idx.push(triplet.row);
            values.push(triplet.val);
        }
        for col in 0..dim {
            col_ptr[col + 1] += col_ptr[col];
        }

        Ok(Self {
            dim,
            col_ptr,
            row_idx,
            values,
        })
    }
}

impl ComplexOperator for SparseComplexMatrix {
    fn dim(&self) -> usize {
        self.dim
    }

    fn matvec(&self, x: &[c64], y: &mut [c64]) {
        y.fill(c64::new(0.0, 0.0));
        for (col, &xj) in x.iter().enumerate() {
            for idx in self.col_ptr[col]..self.col_ptr[col + 1] {
                y[self.row_idx[idx]] += self.values[idx] * xj;
            }
        }
    }

    fn matvec_adjoint(&self, x: &[c64], y: &mut [c64]) {
        for (col, out) in y.iter_mut().enumerate() {
            let mut sum = c64::new(0.0, 0.0);
            for idx in self.col_ptr[col]..self.col_ptr[col + 1] {
                sum += self.values[idx].conj() * x[self.row_idx[idx]];
            }
            *out = sum;
        }
    }

    fn diagonal(&self) -> Vec<c64> {
        let mut diag = vec![c64::new(0.0, 0.0); self.dim];
        for col in 0..self.dim {
            for idx in self.col_ptr[col]..self.col_ptr[col + 1] {
                if self.row_idx[idx] == col {
                    diag[col] = self.values[idx];
                }
            }
        }
        diag
    }
}
