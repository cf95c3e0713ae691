use faer::c64;

/// Jacobi (diagonal) preconditioner for real systems.
///
/// `M = diag(A)` with the degenerate-entry rule: a zero diagonal entry is
/// replaced by one, so the preconditioner solve is the identity on that
/// coordinate. MNA matrices hit this on voltage-source and inductor branch
/// rows, which carry no diagonal entry at DC.
pub struct JacobiPreconditioner {
    inv_diag: Vec<f64>,
}

impl JacobiPreconditioner {
    pub fn new(diag: &[f64]) -> Self {
        let inv_diag = diag
            .iter()
            .map(|&d| if d == 0.0 { 1.0 } else { 1.0 / d })
            .collect();
        Self { inv_diag }
    }

    /// Solves `M z = r`.
    pub fn solve(&self, r: &[f64], z: &mut [f64]) {
        for (i, (&ri, &inv)) in r.iter().zip(self.inv_diag.iter()).enumerate() {
            z[i] = ri * inv;
        }
    }
}

/// Jacobi preconditioner for complex systems.
pub struct ComplexJacobiPreconditioner {
    inv_diag: Vec<c64>,
}

impl ComplexJacobiPreconditioner {
    pub fn new(diag: &[c64]) -> Self {
        let one = c64::new(1.0, 0.0);
        let inv_diag = diag
            .iter()
            .map(|&d| if d == c64::new(0.0, 0.0) { one } else { one / d })
            .collect();
        Self { inv_diag }
    }

    /// Solves `M z = r`.
    pub fn solve(&self, r: &[c64], z: &mut [c64]) {
        for (i, (&ri, &inv)) in r.iter().zip(self.inv_diag.iter()).enumerate() {
            z[i] = ri * inv;
        }
    }

    /// Solves `Mᴴ z = r`, which BiCG needs for the shadow residual.
    pub fn solve_adjoint(&self, r: &[c64], z: &mut [c64]) {
        for (i, (&ri, &inv)) in r.iter().zip(self.inv_diag.iter()).enumerate() {
            z[i] = ri * inv.conj();
        }
    }
}
