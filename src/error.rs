//! Error types.
//!
//! `AppError` is what the binary sees: a message plus the process exit code.
//! `SolveError` is what the numerical layer returns; it converts into an
//! `AppError` with [`EXIT_SOLVER`].

use thiserror::Error;

/// Bad input file, missing column, unreadable path.
pub const EXIT_INPUT: u8 = 2;
/// Solver did not produce a usable vector.
pub const EXIT_SOLVER: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failures of the least-squares and LP solvers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("system has no rows or no unknowns ({rows}x{cols})")]
    EmptySystem { rows: usize, cols: usize },

    #[error("dimension mismatch: A has {rows} rows but b has {len} entries")]
    DimensionMismatch { rows: usize, len: usize },

    #[error("singular value decomposition failed: {0}")]
    Decomposition(&'static str),

    #[error("solution contains non-finite values")]
    NonFinite,

    #[error("linear program is infeasible within the given constraints and bounds")]
    Infeasible,

    #[error("linear program is unbounded")]
    Unbounded,

    #[error("linear program did not converge within {0} iterations")]
    IterationLimit(u32),

    #[error("linear program solver stopped without a solution (status: {0})")]
    NotSolved(String),

    #[error("component x[{index}] = {value} violates bounds [{lower}, {upper}]")]
    BoundViolation {
        index: usize,
        value: f64,
        lower: f64,
        upper: f64,
    },
}

impl From<SolveError> for AppError {
    fn from(err: SolveError) -> Self {
        AppError::new(EXIT_SOLVER, format!("Solver failure: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solve_error_maps_to_solver_exit_code() {
        let err: AppError = SolveError::Infeasible.into();
        assert_eq!(err.exit_code(), EXIT_SOLVER);
        assert!(err.to_string().contains("infeasible"));
    }
}
