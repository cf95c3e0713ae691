use std::fmt;

use faer::{Mat, c64};

use crate::operator::{ComplexOperator, RealOperator};
use crate::triplets::TripletList;
use crate::{Error, Result};

/// Square real matrix in row-major storage.
pub struct DenseMatrix {
    dim: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    pub fn from_triplets(triplets: &TripletList<f64>) -> Result<Self> {
        if triplets.rows() != triplets.cols() {
            return Err(Error::InvalidStructure(format!(
                "expected a square matrix, got {}x{}",
                triplets.rows(),
                triplets.cols()
            )));
        }

        let dim = triplets.rows();
        let mut data = vec![0.0; dim * dim];
        for triplet in triplets.compacted() {
            data[triplet.row * dim + triplet.col] = triplet.val;
        }
        Ok(Self { dim, data })
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.dim + col]
    }

    pub fn to_faer(&self) -> Mat<f64> {
        Mat::from_fn(self.dim, self.dim, |row, col| self.get(row, col))
    }
}

impl RealOperator for DenseMatrix {
    fn dim(&self) -> usize {
        self.dim
    }

    fn matvec(&self, x: &[f64], y: &mut [f64]) {
        for (row, out) in y.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (col, &xj) in x.iter().enumerate() {
                sum += self.data[row * self.dim + col] * xj;
            }
            *out = sum;
        }
    }

    fn matvec_transpose(&self, x: &[f64], y: &mut [f64]) {
        for (col, out) in y.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (row, &xi) in x.iter().enumerate() {
                sum += self.data[row * self.dim + col] * xi;
            }
            *out = sum;
        }
    }

    fn diagonal(&self) -> Vec<f64> {
        (0..self.dim).map(|k| self.get(k, k)).collect()
    }
}

impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dim {
            for col in 0..self.dim {
                write!(f, "{:10.4} ", self.get(row, col))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Square complex matrix in row-major storage.
pub struct DenseComplexMatrix {
    dim: usize,
    data: Vec<c64>,
}

impl DenseComplexMatrix {
    pub fn from_triplets(triplets: &TripletList<c64>) -> Result<Self> {
        if triplets.rows() != triplets.cols() {
            return Err(Error::InvalidStructure(format!(
                "expected a square matrix, got {}x{}",
                triplets.rows(),
                triplets.cols()
            )));
        }

        let dim = triplets.rows();
        let mut data = vec![c64::new(0.0, 0.0); dim * dim];
        for triplet in triplets.compacted() {
            data[triplet.row * dim + triplet.col] = triplet.val;
        }
        Ok(Self { dim, data })
    }

    pub fn get(&self, row: usize, col: usize) -> c64 {
        self.data[row * self.dim + col]
    }

    pub fn to_faer(&self) -> Mat<c64> {
        Mat::from_fn(self.dim, self.dim, |row, col| self.get(row, col))
    }
}

impl ComplexOperator for DenseComplexMatrix {
    fn dim(&self) -> usize {
        self.dim
    }

    fn matvec(&self, x: &[c64], y: &mut [c64]) {
        for (row, out) in y.iter_mut().enumerate() {
            let mut sum = c64::new(0.0, 0.0);
            for (col, &xj) in x.iter().enumerate() {
                sum += self.data[row * self.dim + col] * xj;
            }
            *out = sum;
        }
    }

    fn matvec_adjoint(&self, x: &[c64], y: &mut [c64]) {
        for (col, out) in y.iter_mut().enumerate() {
            let mut sum = c64::new(0.0, 0.0);
            for (row, &xi) in x.iter().enumerate() {
                sum += self.data[row * self.dim + col].conj() * xi;
            }
            *out = sum;
        }
    }

    fn diagonal(&self) -> Vec<c64> {
        (0..self.dim).map(|k| self.get(k, k)).collect()
    }
}
