//! Interior-point solve of a [`LinearProgram`] with Clarabel.
//!
//! Clarabel solves conic programs of the form
//!
//! ```text
//! minimize    ½ xᵀ P x + qᵀ x
//! subject to  A x + s = b,  s ∈ K
//! ```
//!
//! An LP is the special case `P = 0`, with `K = {0}ᵐ × ℝ₊ᵏ`: equality rows go
//! to the zero cone, inequality and bound rows to the nonnegative cone.
//!
//! Only a `Solved` status yields a vector. Everything else, including the
//! "almost" statuses, is reported as a `SolveError`.

use clarabel::algebra::CscMatrix;
use clarabel::solver::{DefaultSettings, DefaultSolver, IPSolver, SolverStatus, SupportedConeT};
use nalgebra::{DMatrix, DVector};

use crate::domain::{LpOptions, LpSolution};
use crate::error::SolveError;
use crate::lp::program::LinearProgram;

/// Components this close outside a bound are moved onto it.
///
/// Interior-point iterates satisfy the constraints only to the solver's
/// feasibility tolerance.
const BOUND_SNAP_TOL: f64 = 1e-6;

/// The program lowered to Clarabel's `A x + s = b` form, still dense.
#[derive(Debug, Clone)]
pub struct ConicForm {
    pub q: Vec<f64>,
    pub a: DMatrix<f64>,
    pub b: Vec<f64>,
    pub zero_rows: usize,
    pub nonneg_rows: usize,
}

impl ConicForm {
    pub fn from_program(lp: &LinearProgram) -> Self {
        let n = lp.n_vars();
        let bound_rows: Vec<(usize, f64, f64)> = lp
            .bounds
            .iter()
            .enumerate()
            .flat_map(|(i, &(lower, upper))| {
                let upper_row = upper.is_finite().then_some((i, 1.0, upper));
                let lower_row = lower.is_finite().then_some((i, -1.0, -lower));
                upper_row.into_iter().chain(lower_row)
            })
            .collect();

        let zero_rows = lp.a_eq.nrows();
        let nonneg_rows = lp.a_ub.nrows() + bound_rows.len();

        let mut a = DMatrix::zeros(zero_rows + nonneg_rows, n);
        let mut b = Vec::with_capacity(zero_rows + nonneg_rows);

        a.rows_mut(0, zero_rows).copy_from(&lp.a_eq);
        b.extend(lp.b_eq.iter().copied());

        a.rows_mut(zero_rows, lp.a_ub.nrows()).copy_from(&lp.a_ub);
        b.extend(lp.b_ub.iter().copied());

        let offset = zero_rows + lp.a_ub.nrows();
        for (k, &(var, sign, rhs)) in bound_rows.iter().enumerate() {
            a[(offset + k, var)] = sign;
            b.push(rhs);
        }

        Self {
            q: lp.c.iter().copied().collect(),
            a,
            b,
            zero_rows,
            nonneg_rows,
        }
    }

    fn cones(&self) -> Vec<SupportedConeT<f64>> {
        let mut cones = Vec::with_capacity(2);
        if self.zero_rows > 0 {
            cones.push(SupportedConeT::ZeroConeT(self.zero_rows));
        }
        if self.nonneg_rows > 0 {
            cones.push(SupportedConeT::NonnegativeConeT(self.nonneg_rows));
        }
        cones
    }
}

/// Compressed-sparse-column copy of a dense matrix, dropping exact zeros.
pub fn to_csc(m: &DMatrix<f64>) -> CscMatrix<f64> {
    let (nrows, ncols) = m.shape();
    let mut colptr = Vec::with_capacity(ncols + 1);
    let mut rowval = Vec::new();
    let mut nzval = Vec::new();

    colptr.push(0);
    for j in 0..ncols {
        for (i, &v) in m.column(j).iter().enumerate() {
            if v != 0.0 {
                rowval.push(i);
                nzval.push(v);
            }
        }
        colptr.push(rowval.len());
    }

    CscMatrix::new(nrows, ncols, colptr, rowval, nzval)
}

/// Solve `lp` and return its decision variables.
pub fn solve_program(lp: &LinearProgram, options: &LpOptions) -> Result<LpSolution, SolveError> {
    let n = lp.n_vars();
    let conic = ConicForm::from_program(lp);

    let p = CscMatrix::new(n, n, vec![0; n + 1], vec![], vec![]);
    let a = to_csc(&conic.a);
    let cones = conic.cones();

    let settings = DefaultSettings {
        max_iter: options.max_iter,
        presolve_enable: options.presolve,
        verbose: false,
        ..DefaultSettings::default()
    };

    log::debug!(
        "LP: {} vars, {} equality rows, {} inequality rows, max_iter={}, presolve={}",
        n,
        conic.zero_rows,
        conic.nonneg_rows,
        options.max_iter,
        options.presolve
    );

    let mut solver = DefaultSolver::new(&p, &conic.q, &a, &conic.b, &cones, settings);
    solver.solve();

    let solution = &solver.solution;
    log::info!(
        "LP finished: status={:?} iterations={} objective={}",
        solution.status,
        solution.iterations,
        solution.obj_val
    );

    match solution.status {
        SolverStatus::Solved => {}
        SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
            return Err(SolveError::Infeasible);
        }
        SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
            return Err(SolveError::Unbounded);
        }
        SolverStatus::MaxIterations => return Err(SolveError::IterationLimit(options.max_iter)),
        other => return Err(SolveError::NotSolved(format!("{other:?}"))),
    }

    let mut x = DVector::from_column_slice(&solution.x[..n]);
    snap_to_bounds(&mut x, &lp.bounds)?;

    Ok(LpSolution {
        x: x.rows(0, lp.n_decision).into_owned(),
        objective_value: solution.obj_val,
        iterations: solution.iterations,
        status: format!("{:?}", solution.status),
    })
}

/// Project near-bound components onto their bound; fail on a real violation.
fn snap_to_bounds(x: &mut DVector<f64>, bounds: &[(f64, f64)]) -> Result<(), SolveError> {
    for (index, (value, &(lower, upper))) in x.iter_mut().zip(bounds).enumerate() {
        if !value.is_finite() {
            return Err(SolveError::NonFinite);
        }
        let violation = if *value < lower {
            lower - *value
        } else if *value > upper {
            *value - upper
        } else {
            continue;
        };

        if violation > BOUND_SNAP_TOL * (1.0 + lower.abs().max(upper.abs())) {
            return Err(SolveError::BoundViolation {
                index,
                value: *value,
                lower,
                upper,
            });
        }
        log::debug!("snapping x[{index}] = {value} onto [{lower}, {upper}]");
        *value = (*value).clamp(lower, upper);
    }
    Ok(())
}
