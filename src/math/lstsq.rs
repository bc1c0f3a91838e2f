//! Minimum-norm least squares.
//!
//! ```text
//! minimize ‖A x - b‖₂, and among all minimizers the one with smallest ‖x‖₂
//! ```
//!
//! Implementation choices:
//! - Thin SVD (`A = U Σ Vᵀ`) rather than normal equations, so conditioning is
//!   that of `A`, not `AᵀA`.
//! - Singular values at or below `rcond · σ_max` are treated as exact zeros.
//!   Zeroing them in the pseudo-inverse is what makes the result the
//!   minimum-norm minimizer for rank-deficient, wide, or tall `A`.
//! - Default `rcond = ε · max(m, n)`, the usual LAPACK-style cutoff.

use nalgebra::{DMatrix, DVector};

use crate::domain::LeastSquaresSolution;
use crate::error::SolveError;

/// Solve `A x ≈ b` in the least-squares sense with the minimum-norm tie-break.
///
/// `rcond` is relative to the largest singular value; `None` selects the
/// default cutoff.
pub fn solve_least_squares(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    rcond: Option<f64>,
) -> Result<LeastSquaresSolution, SolveError> {
    let (m, n) = a.shape();
    if m == 0 || n == 0 {
        return Err(SolveError::EmptySystem { rows: m, cols: n });
    }
    if b.len() != m {
        return Err(SolveError::DimensionMismatch { rows: m, len: b.len() });
    }

    let svd = a.clone().svd(true, true);

    let sigma_max = svd.singular_values.max();
    let rcond = rcond.unwrap_or(f64::EPSILON * m.max(n) as f64);
    let cutoff = (rcond * sigma_max).max(0.0);
    if !cutoff.is_finite() {
        return Err(SolveError::NonFinite);
    }

    let x = svd.solve(b, cutoff).map_err(SolveError::Decomposition)?;
    if !x.iter().all(|v| v.is_finite()) {
        return Err(SolveError::NonFinite);
    }

    let rank = svd.singular_values.iter().filter(|&&s| s > cutoff).count();
    let residual_norm = (a * &x - b).norm();

    Ok(LeastSquaresSolution {
        x,
        rank,
        residual_norm,
        cutoff,
    })
}
