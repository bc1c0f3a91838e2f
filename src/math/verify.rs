//! Solution self-check.

use nalgebra::{DMatrix, DVector};

use crate::domain::Tolerance;

/// True iff every entry of `A·x` is within `atol + rtol·|b_i|` of `b_i`.
///
/// NaN anywhere makes the check fail, as does a shape mismatch.
pub fn all_close(a: &DMatrix<f64>, x: &DVector<f64>, b: &DVector<f64>, tol: Tolerance) -> bool {
    if a.ncols() != x.len() || a.nrows() != b.len() {
        return false;
    }

    let ax = a * x;
    ax.iter()
        .zip(b.iter())
        .all(|(&lhs, &rhs)| (lhs - rhs).abs() <= tol.atol + tol.rtol * rhs.abs())
}
