//! Bounded linear programs over a loaded system.
//!
//! - `program`: assembling `c`, `A_eq`, `A_ub`, bounds for each objective
//! - `solver`: lowering to conic form and solving with Clarabel

pub mod program;
pub mod solver;

use nalgebra::{DMatrix, DVector};

pub use program::LinearProgram;
pub use solver::solve_program;

use crate::domain::{LpOptions, LpSolution};
use crate::error::SolveError;

/// Solve `A x = b` under `Σ x_i <= 0` and `|x_i| <= options.bound`,
/// minimizing `options.objective`.
pub fn solve_bounded(a: &DMatrix<f64>, b: &DVector<f64>, options: &LpOptions) -> Result<LpSolution, SolveError> {
    let lp = LinearProgram::for_objective(options.objective, a, b, options.bound)?;
    solve_program(&lp, options)
}
