//! Linear programs in "linprog" form.
//!
//! ```text
//! minimize    cᵀ x
//! subject to  A_eq x  = b_eq
//!             A_ub x <= b_ub
//!             l_i <= x_i <= u_i
//! ```
//!
//! The builders here only assemble matrices; lowering to the solver's conic
//! form happens in `lp::solver`.

use nalgebra::{DMatrix, DVector};

use crate::domain::Objective;
use crate::error::SolveError;

#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    pub c: DVector<f64>,
    pub a_eq: DMatrix<f64>,
    pub b_eq: DVector<f64>,
    pub a_ub: DMatrix<f64>,
    pub b_ub: DVector<f64>,
    /// One `(lower, upper)` per variable; infinite ends are unconstrained.
    pub bounds: Vec<(f64, f64)>,
    /// Leading variables that make up the reported solution. Anything after
    /// them is an auxiliary variable of the formulation.
    pub n_decision: usize,
}

impl LinearProgram {
    pub fn n_vars(&self) -> usize {
        self.c.len()
    }

    /// Build the program for `objective` over the system `A x = b` with every
    /// `x_i ∈ [-bound, bound]` and `Σ x_i <= 0`.
    pub fn for_objective(
        objective: Objective,
        a: &DMatrix<f64>,
        b: &DVector<f64>,
        bound: f64,
    ) -> Result<Self, SolveError> {
        match objective {
            Objective::Sum => Self::min_sum(a, b, bound),
            Objective::Abs => Self::min_abs(a, b, bound),
        }
    }

    /// `min Σ x_i` s.t. `A x = b`, `Σ x_i <= 0`, `|x_i| <= bound`.
    pub fn min_sum(a: &DMatrix<f64>, b: &DVector<f64>, bound: f64) -> Result<Self, SolveError> {
        let (_, n) = check_shape(a, b)?;

        Ok(Self {
            c: DVector::from_element(n, 1.0),
            a_eq: a.clone(),
            b_eq: b.clone(),
            a_ub: DMatrix::from_element(1, n, 1.0),
            b_ub: DVector::from_element(1, 0.0),
            bounds: vec![(-bound, bound); n],
            n_decision: n,
        })
    }

    /// `min Σ |x_i|` under the same constraints as [`LinearProgram::min_sum`].
    ///
    /// Variables are `[x; t]` with `-t_i <= x_i <= t_i`, so at the optimum
    /// `t_i = |x_i|`.
    pub fn min_abs(a: &DMatrix<f64>, b: &DVector<f64>, bound: f64) -> Result<Self, SolveError> {
        let (m, n) = check_shape(a, b)?;

        let mut c = DVector::zeros(2 * n);
        c.rows_mut(n, n).fill(1.0);

        let mut a_eq = DMatrix::zeros(m, 2 * n);
        a_eq.columns_mut(0, n).copy_from(a);

        // Row 0: Σ x_i <= 0. Rows 1..=n: x_i - t_i <= 0. Rows n+1..=2n: -x_i - t_i <= 0.
        let mut a_ub = DMatrix::zeros(1 + 2 * n, 2 * n);
        for i in 0..n {
            a_ub[(0, i)] = 1.0;
            a_ub[(1 + i, i)] = 1.0;
            a_ub[(1 + i, n + i)] = -1.0;
            a_ub[(1 + n + i, i)] = -1.0;
            a_ub[(1 + n + i, n + i)] = -1.0;
        }

        let mut bounds = vec![(-bound, bound); n];
        bounds.extend(std::iter::repeat_n((0.0, bound), n));

        Ok(Self {
            c,
            a_eq,
            b_eq: b.clone(),
            a_ub,
            b_ub: DVector::zeros(1 + 2 * n),
            bounds,
            n_decision: n,
        })
    }
}

fn check_shape(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<(usize, usize), SolveError> {
    let (m, n) = a.shape();
    if m == 0 || n == 0 {
        return Err(SolveError::EmptySystem { rows: m, cols: n });
    }
    if b.len() != m {
        return Err(SolveError::DimensionMismatch { rows: m, len: b.len() });
    }
    Ok((m, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_sum_layout() {
        let a = DMatrix::from_row_slice(2, 3, &[1.0, 0.0, 2.0, 0.0, 1.0, 1.0]);
        let b = DVector::from_row_slice(&[1.0, 2.0]);
        let lp = LinearProgram::min_sum(&a, &b, 10.0).unwrap();

        assert_eq!(lp.n_vars(), 3);
        assert_eq!(lp.n_decision, 3);
        assert!(lp.c.iter().all(|&v| v == 1.0));
        assert_eq!(lp.a_eq, a);
        assert_eq!(lp.a_ub.shape(), (1, 3));
        assert_eq!(lp.b_ub[0], 0.0);
        assert_eq!(lp.bounds, vec![(-10.0, 10.0); 3]);
    }

    #[test]
    fn min_abs_layout() {
        let a = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
        let b = DVector::from_row_slice(&[-4.0]);
        let lp = LinearProgram::min_abs(&a, &b, 10.0).unwrap();

        assert_eq!(lp.n_vars(), 4);
        assert_eq!(lp.n_decision, 2);
        assert_eq!(lp.c.as_slice(), &[0.0, 0.0, 1.0, 1.0]);
        assert_eq!(lp.a_eq, DMatrix::from_row_slice(1, 4, &[1.0, 2.0, 0.0, 0.0]));
        assert_eq!(lp.a_ub.shape(), (5, 4));
        // x_1 - t_1 <= 0
        assert_eq!(lp.a_ub.row(2).iter().copied().collect::<Vec<_>>(), vec![0.0, 1.0, 0.0, -1.0]);
        assert_eq!(lp.bounds[2], (0.0, 10.0));
    }

    #[test]
    fn rejects_mismatched_rhs() {
        let a = DMatrix::from_row_slice(1, 2, &[1.0, 1.0]);
        let b = DVector::from_row_slice(&[0.0, 1.0]);
        assert_eq!(
            LinearProgram::min_sum(&a, &b, 10.0),
            Err(SolveError::DimensionMismatch { rows: 1, len: 2 })
        );
    }
}
