use faer::linalg::solvers::{Llt, PartialPivLu, Solve};
use faer::sparse::SparseColMat;
use faer::sparse::linalg::solvers::{Llt as SparseLlt, Lu as SparseLu};
use faer::{Mat, Side, c64};
use log::debug;
use virta_matrix::{DenseComplexMatrix, DenseMatrix, TripletList};

use crate::config::Method;
use crate::{Error, Result};

fn sparse_real(triplets: &TripletList<f64>) -> Result<SparseColMat<usize, f64>> {
    SparseColMat::try_new_from_triplets(triplets.rows(), triplets.cols(), &triplets.compacted())
        .map_err(|e| Error::Matrix(virta_matrix::Error::InvalidStructure(e.to_string())))
}

fn sparse_complex(triplets: &TripletList<c64>) -> Result<SparseColMat<usize, c64>> {
    SparseColMat::try_new_from_triplets(triplets.rows(), triplets.cols(), &triplets.compacted())
        .map_err(|e| Error::Matrix(virta_matrix::Error::InvalidStructure(e.to_string())))
}

/// A cached factorization of the real MNA matrix.
///
/// The DC sweep factors once and calls [`RealFactorization::solve`] per
/// step, since only the right-hand side changes between steps.
pub enum RealFactorization {
    DenseLu(PartialPivLu<f64>),
    DenseCholesky(Llt<f64>),
    SparseLu(SparseLu<usize, f64>),
    SparseCholesky(SparseLlt<usize, f64>),
}

impl RealFactorization {
    pub fn factor(triplets: &TripletList<f64>, method: Method) -> Result<Self> {
        match method {
            Method::DenseLu => {
                let matrix = DenseMatrix::from_triplets(triplets)?.to_faer();
                Ok(RealFactorization::DenseLu(matrix.partial_piv_lu()))
            }
            Method::DenseCholesky => {
                let matrix = DenseMatrix::from_triplets(triplets)?.to_faer();
                let llt = matrix.llt(Side::Lower).map_err(|_| {
                    Error::SingularMatrix("dense Cholesky factorization failed".to_string())
                })?;
                Ok(RealFactorization::DenseCholesky(llt))
            }
            Method::SparseLu => {
                let matrix = sparse_real(triplets)?;
                let lu = matrix.sp_lu().map_err(|_| {
                    Error::SingularMatrix("sparse LU factorization failed".to_string())
                })?;
                Ok(RealFactorization::SparseLu(lu))
            }
            Method::SparseCholesky => {
                let matrix = sparse_real(triplets)?;
                let llt = matrix.sp_cholesky(Side::Lower).map_err(|_| {
                    Error::SingularMatrix("sparse Cholesky factorization failed".to_string())
                })?;
                Ok(RealFactorization::SparseCholesky(llt))
            }
            Method::Cg | Method::BiCg => {
                unreachable!("iterative methods have no factorization")
            }
        }
    }

    pub fn solve(&self, rhs: &[f64]) -> Result<Vec<f64>> {
        let n = rhs.len();
        let mut b = Mat::zeros(n, 1);
        for (i, &value) in rhs.iter().enumerate() {
            b[(i, 0)] = value;
        }

        let x = match self {
            RealFactorization::DenseLu(lu) => lu.solve(&b),
            RealFactorization::DenseCholesky(llt) => llt.solve(&b),
            RealFactorization::SparseLu(lu) => lu.solve(&b),
            RealFactorization::SparseCholesky(llt) => llt.solve(&b),
        };

        let mut solution = Vec::with_capacity(n);
        for row in 0..n {
            let value = x[(row, 0)];
            if !value.is_finite() {
                return Err(Error::SingularMatrix(format!(
                    "non-finite solution at row {row}"
                )));
            }
            solution.push(value);
        }
        Ok(solution)
    }
}

/// A cached factorization of the complex MNA matrix.
///
/// The AC matrix `G + jωC` is complex symmetric rather than Hermitian, so
/// the Cholesky method selections fall back to LU here.
pub enum ComplexFactorization {
    DenseLu(PartialPivLu<c64>),
    SparseLu(SparseLu<usize, c64>),
}

impl ComplexFactorization {
    pub fn factor(triplets: &TripletList<c64>, method: Method) -> Result<Self> {
        match method {
            Method::DenseLu | Method::DenseCholesky => {
                if method == Method::DenseCholesky {
                    debug!("AC matrix is complex symmetric, using dense LU instead of Cholesky");
                }
                let matrix = DenseComplexMatrix::from_triplets(triplets)?.to_faer();
                Ok(ComplexFactorization::DenseLu(matrix.partial_piv_lu()))
            }
            Method::SparseLu | Method::SparseCholesky => {
                if method == Method::SparseCholesky {
                    debug!("AC matrix is complex symmetric, using sparse LU instead of Cholesky");
                }
                let matrix = sparse_complex(triplets)?;
                let lu = matrix.sp_lu().map_err(|_| {
                    Error::SingularMatrix("sparse LU factorization failed".to_string())
                })?;
                Ok(ComplexFactorization::SparseLu(lu))
            }
            Method::Cg | Method::BiCg => {
                unreachable!("iterative methods have no factorization")
            }
        }
    }

    pub fn solve(&self, rhs: &[c64]) -> Result<Vec<c64>> {
        let n = rhs.len();
        let mut b = Mat::zeros(n, 1);
        for (i, &value) in rhs.iter().enumerate() {
            b[(i, 0)] = value;
        }

        let x = match self {
            ComplexFactorization::DenseLu(lu) => lu.solve(&b),
            ComplexFactorization::SparseLu(lu) => lu.solve(&b),
        };

        let mut solution = Vec::with_capacity(n);
        for row in 0..n {
            let value: c64 = x[(row, 0)];
            if !value.re.is_finite() || !value.im.is_finite() {
                return Err(Error::SingularMatrix(format!(
                    "non-finite solution at row {row}"
                )));
            }
            solution.push(value);
        }
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> (TripletList<f64>, Vec<f64>) {
        // [ 4 1 ] x = [ 1 ]
        // [ 1 3 ]     [ 2 ]
        let mut triplets = TripletList::new(2, 2);
        triplets.push(0, 0, 4.0);
        triplets.push(0, 1, 1.0);
        triplets.push(1, 0, 1.0);
        triplets.push(1, 1, 3.0);
        (triplets, vec![1.0, 2.0])
    }

    #[test]
    fn test_all_direct_methods_agree() {
        let (triplets, rhs) = system();
        let expected = [1.0 / 11.0, 7.0 / 11.0];

        for method in [
            Method::DenseLu,
            Method::DenseCholesky,
            Method::SparseLu,
            Method::SparseCholesky,
        ] {
            let factorization = RealFactorization::factor(&triplets, method).unwrap();
            let x = factorization.solve(&rhs).unwrap();
            assert!((x[0] - expected[0]).abs() < 1e-12, "{method:?}");
            assert!((x[1] - expected[1]).abs() < 1e-12, "{method:?}");
        }
    }

    #[test]
    fn test_factorization_reuse_across_rhs() {
        let (triplets, _) = system();
        let factorization = RealFactorization::factor(&triplets, Method::DenseLu).unwrap();

        let x1 = factorization.solve(&[1.0, 2.0]).unwrap();
        let x2 = factorization.solve(&[11.0, 11.0]).unwrap();
        assert!((x1[0] - 1.0 / 11.0).abs() < 1e-12);
        assert!((x2[0] - 2.0).abs() < 1e-12);
        assert!((x2[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_singular_dense_lu_is_reported() {
        let mut triplets = TripletList::new(2, 2);
        triplets.push(0, 0, 1.0);
        triplets.push(0, 1, 2.0);
        triplets.push(1, 0, 2.0);
        triplets.push(1, 1, 4.0);

        let factorization = RealFactorization::factor(&triplets, Method::DenseLu).unwrap();
        assert!(matches!(
            factorization.solve(&[1.0, 1.0]),
            Err(Error::SingularMatrix(_))
        ));
    }

    #[test]
    fn test_complex_lu_solves_ac_like_system() {
        // (1 + j) x = 2  =>  x = 1 - j
        let mut triplets = TripletList::new(1, 1);
        triplets.push(0, 0, c64::new(1.0, 1.0));

        let factorization = ComplexFactorization::factor(&triplets, Method::DenseLu).unwrap();
        let x = factorization.solve(&[c64::new(2.0, 0.0)]).unwrap();
        assert!((x[0] - c64::new(1.0, -1.0)).norm() < 1e-12);
    }
}
