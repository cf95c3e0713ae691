use faer::c64;
use virta_matrix::{ComplexOperator, RealOperator};

use crate::error::BreakdownKind;
use crate::precondition::{ComplexJacobiPreconditioner, JacobiPreconditioner};
use crate::{Error, Result};

/// BiCG stagnates on ill-conditioned systems when the iteration cap is
/// small, so it never runs with fewer iterations allowed than this.
pub const BICG_ITER_FLOOR: usize = 10_000;

/// Threshold below which a BiCG inner product counts as breakdown.
const BREAKDOWN_EPSILON: f64 = 1e-14;

/// How an iterative solve ended.
///
/// Breakdown is an `Err`; running out of iterations is not, because the
/// last iterate is still a usable (if unconverged) solution and the caller
/// decides how loudly to complain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    Converged(usize),
    NotConverged(usize),
}

impl IterationOutcome {
    pub fn iterations(self) -> usize {
        match self {
            IterationOutcome::Converged(n) | IterationOutcome::NotConverged(n) => n,
        }
    }

    pub fn converged(self) -> bool {
        matches!(self, IterationOutcome::Converged(_))
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(&x, &y)| x * y).sum()
}

fn norm2(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}

/// Hermitian inner product `Σ conj(aᵢ)·bᵢ`.
fn hdot(a: &[c64], b: &[c64]) -> c64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| x.conj() * y)
        .fold(c64::new(0.0, 0.0), |acc, term| acc + term)
}

fn cnorm2(v: &[c64]) -> f64 {
    v.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt()
}

/// Guard against dividing by a zero forcing term in the convergence test.
fn safe_norm(norm: f64) -> f64 {
    if norm == 0.0 { 1.0 } else { norm }
}

/// Preconditioned Conjugate Gradient for symmetric positive-definite
/// systems. `x` is both the start vector and the solution.
pub fn conjugate_gradient(
    a: &dyn RealOperator,
    b: &[f64],
    x: &mut [f64],
    itol: f64,
    max_iterations: usize,
) -> IterationOutcome {
    let n = a.dim();
    let jacobi = JacobiPreconditioner::new(&a.diagonal());

    let mut r = vec![0.0; n];
    let mut z = vec![0.0; n];
    let mut p = vec![0.0; n];
    let mut q = vec![0.0; n];

    // r = b - A x
    a.matvec(x, &mut q);
    for i in 0..n {
        r[i] = b[i] - q[i];
    }

    let b_norm = safe_norm(norm2(b));
    let mut r_norm = norm2(&r);
    let mut rho_prev = 0.0;
    let mut iter = 0;

    while iter < max_iterations && r_norm / b_norm > itol {
        iter += 1;
        jacobi.solve(&r, &mut z);
        let rho = dot(&r, &z);
        if iter == 1 {
            p.copy_from_slice(&z);
        } else {
            let beta = rho / rho_prev;
            for i in 0..n {
                p[i] = z[i] + beta * p[i];
            }
        }
        rho_prev = rho;
        a.matvec(&p, &mut q);
        let alpha = rho / dot(&p, &q);
        for i in 0..n {
            x[i] += alpha * p[i];
            r[i] -= alpha * q[i];
        }
        r_norm = norm2(&r);
    }

    if r_norm / b_norm <= itol {
        IterationOutcome::Converged(iter)
    } else {
        IterationOutcome::NotConverged(iter)
    }
}

/// Preconditioned Bi-Conjugate Gradient for general systems.
///
/// Fails with [`Error::Breakdown`] when `r̃·z` or `p̃·q` vanishes.
pub fn bi_conjugate_gradient(
    a: &dyn RealOperator,
    b: &[f64],
    x: &mut [f64],
    itol: f64,
    max_iterations: usize,
) -> Result<IterationOutcome> {
    let max_iterations = max_iterations.max(BICG_ITER_FLOOR);
    let n = a.dim();
    let jacobi = JacobiPreconditioner::new(&a.diagonal());

    let mut r = vec![0.0; n];
    let mut z = vec![0.0; n];
    let mut p = vec![0.0; n];
    let mut q = vec![0.0; n];
    let mut r_tilde = vec![0.0; n];
    let mut z_tilde = vec![0.0; n];
    let mut p_tilde = vec![0.0; n];
    let mut q_tilde = vec![0.0; n];

    // r = b - A x, and the shadow residual starts equal to it.
    a.matvec(x, &mut q);
    for i in 0..n {
        r[i] = b[i] - q[i];
    }
    r_tilde.copy_from_slice(&r);

    let b_norm = safe_norm(norm2(b));
    let mut r_norm = norm2(&r);
    let mut rho_prev = 0.0;
    let mut iter = 0;

    while iter < max_iterations && r_norm / b_norm > itol {
        iter += 1;
        jacobi.solve(&r, &mut z);
        // Mᵀ = M for a diagonal preconditioner.
        jacobi.solve(&r_tilde, &mut z_tilde);

        let rho = dot(&r_tilde, &z);
        if rho.abs() < BREAKDOWN_EPSILON {
            return Err(Error::Breakdown(BreakdownKind::Rho));
        }
        if iter == 1 {
            p.copy_from_slice(&z);
            p_tilde.copy_from_slice(&z_tilde);
        } else {
            let beta = rho / rho_prev;
            for i in 0..n {
                p[i] = z[i] + beta * p[i];
                p_tilde[i] = z_tilde[i] + beta * p_tilde[i];
            }
        }
        rho_prev = rho;

        a.matvec(&p, &mut q);
        a.matvec_transpose(&p_tilde, &mut q_tilde);

        let omega = dot(&p_tilde, &q);
        if omega.abs() < BREAKDOWN_EPSILON {
            return Err(Error::Breakdown(BreakdownKind::Omega));
        }
        let alpha = rho / omega;
        for i in 0..n {
            x[i] += alpha * p[i];
            r[i] -= alpha * q[i];
            r_tilde[i] -= alpha * q_tilde[i];
        }
        r_norm = norm2(&r);
    }

    if r_norm / b_norm <= itol {
        Ok(IterationOutcome::Converged(iter))
    } else {
        Ok(IterationOutcome::NotConverged(iter))
    }
}

/// Complex Conjugate Gradient: the real algorithm with the Hermitian
/// inner product.
pub fn complex_conjugate_gradient(
    a: &dyn ComplexOperator,
    b: &[c64],
    x: &mut [c64],
    itol: f64,
    max_iterations: usize,
) -> IterationOutcome {
    let n = a.dim();
    let zero = c64::new(0.0, 0.0);
    let jacobi = ComplexJacobiPreconditioner::new(&a.diagonal());

    let mut r = vec![zero; n];
    let mut z = vec![zero; n];
    let mut p = vec![zero; n];
    let mut q = vec![zero; n];

    a.matvec(x, &mut q);
    for i in 0..n {
        r[i] = b[i] - q[i];
    }

    let b_norm = safe_norm(cnorm2(b));
    let mut r_norm = cnorm2(&r);
    let mut rho_prev = zero;
    let mut iter = 0;

    while iter < max_iterations && r_norm / b_norm > itol {
        iter += 1;
        jacobi.solve(&r, &mut z);
        let rho = hdot(&r, &z);
        if iter == 1 {
            p.copy_from_slice(&z);
        } else {
            let beta = rho / rho_prev;
            for i in 0..n {
                p[i] = z[i] + beta * p[i];
            }
        }
        rho_prev = rho;
        a.matvec(&p, &mut q);
        let alpha = rho / hdot(&p, &q);
        for i in 0..n {
            x[i] += alpha * p[i];
            r[i] -= alpha * q[i];
        }
        r_norm = cnorm2(&r);
    }

    if r_norm / b_norm <= itol {
        IterationOutcome::Converged(iter)
    } else {
        IterationOutcome::NotConverged(iter)
    }
}

/// Complex Bi-Conjugate Gradient.
///
/// Differences from the real variant: the Hermitian inner product, `Aᴴ` in
/// place of `Aᵀ`, `conj(β)` in the shadow direction update and `conj(α)`
/// in the shadow residual update.
pub fn complex_bi_conjugate_gradient(
    a: &dyn ComplexOperator,
    b: &[c64],
    x: &mut [c64],
    itol: f64,
    max_iterations: usize,
) -> Result<IterationOutcome> {
    let max_iterations = max_iterations.max(BICG_ITER_FLOOR);
    let n = a.dim();
    let zero = c64::new(0.0, 0.0);
    let jacobi = ComplexJacobiPreconditioner::new(&a.diagonal());

    let mut r = vec![zero; n];
    let mut z = vec![zero; n];
    let mut p = vec![zero; n];
    let mut q = vec![zero; n];
    let mut r_tilde = vec![zero; n];
    let mut z_tilde = vec![zero; n];
    let mut p_tilde = vec![zero; n];
    let mut q_tilde = vec![zero; n];

    a.matvec(x, &mut q);
    for i in 0..n {
        r[i] = b[i] - q[i];
    }
    r_tilde.copy_from_slice(&r);

    let b_norm = safe_norm(cnorm2(b));
    let mut r_norm = cnorm2(&r);
    let mut rho_prev = zero;
    let mut iter = 0;

    while iter < max_iterations && r_norm / b_norm > itol {
        iter += 1;
        jacobi.solve(&r, &mut z);
        jacobi.solve_adjoint(&r_tilde, &mut z_tilde);

        let rho = hdot(&r_tilde, &z);
        if rho.norm() < BREAKDOWN_EPSILON {
            return Err(Error::Breakdown(BreakdownKind::Rho));
        }
        if iter == 1 {
            p.copy_from_slice(&z);
            p_tilde.copy_from_slice(&z_tilde);
        } else {
            let beta = rho / rho_prev;
            let beta_conj = beta.conj();
            for i in 0..n {
                p[i] = z[i] + beta * p[i];
                p_tilde[i] = z_tilde[i] + beta_conj * p_tilde[i];
            }
        }
        rho_prev = rho;

        a.matvec(&p, &mut q);
        a.matvec_adjoint(&p_tilde, &mut q_tilde);

        let omega = hdot(&p_tilde, &q);
        if omega.norm() < BREAKDOWN_EPSILON {
            return Err(Error::Breakdown(BreakdownKind::Omega));
        }
        let alpha = rho / omega;
        let alpha_conj = alpha.conj();
        for i in 0..n {
            x[i] += alpha * p[i];
            r[i] -= alpha * q[i];
            r_tilde[i] -= alpha_conj * q_tilde[i];
        }
        r_norm = cnorm2(&r);
    }

    if r_norm / b_norm <= itol {
        Ok(IterationOutcome::Converged(iter))
    } else {
        Ok(IterationOutcome::NotConverged(iter))
    }
}
