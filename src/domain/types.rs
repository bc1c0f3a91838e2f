//! Shared domain types.
//!
//! Matrices stay in `nalgebra` types end to end; only the export layer turns
//! them into plain `Vec<f64>` for serialization.

use std::path::PathBuf;

use clap::ValueEnum;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Name of the right-hand-side column in the input CSV.
pub const DEFAULT_TARGET_COLUMN: &str = "equals";

/// Default input file, relative to the working directory.
pub const DEFAULT_CSV_PATH: &str = "out.csv";

/// A loaded system `A·x = b`.
///
/// Column order of `a` follows the file and defines the order of the solution
/// components.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    pub a: DMatrix<f64>,
    pub b: DVector<f64>,
    /// Predictor column names (every header except the target), in file order.
    pub columns: Vec<String>,
}

impl LinearSystem {
    pub fn rows(&self) -> usize {
        self.a.nrows()
    }

    pub fn unknowns(&self) -> usize {
        self.a.ncols()
    }
}

/// "All-close" tolerance pair: `|Ax_i - b_i| <= atol + rtol * |b_i|`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub rtol: f64,
    pub atol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            rtol: 1e-5,
            atol: 1e-8,
        }
    }
}

/// Objective of the LP pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    /// Minimize the algebraic sum `Σ x_i`.
    #[default]
    Sum,
    /// Minimize the absolute sum `Σ |x_i|` (auxiliary-variable formulation).
    Abs,
}

/// Options for the bounded LP solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LpOptions {
    /// Symmetric box: every `x_i ∈ [-bound, bound]`.
    pub bound: f64,
    pub max_iter: u32,
    pub presolve: bool,
    pub objective: Objective,
}

impl Default for LpOptions {
    fn default() -> Self {
        Self {
            bound: 10.0,
            max_iter: 1000,
            presolve: false,
            objective: Objective::Sum,
        }
    }
}

/// Output of the least-squares solver.
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquaresSolution {
    pub x: DVector<f64>,
    /// Number of singular values above the cutoff.
    pub rank: usize,
    /// `‖A·x - b‖₂`.
    pub residual_norm: f64,
    /// Absolute singular-value cutoff that was applied.
    pub cutoff: f64,
}

/// Output of the LP solver. Only constructed for a converged solve.
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    pub x: DVector<f64>,
    pub objective_value: f64,
    pub iterations: u32,
    pub status: String,
}

/// Resolved settings for `eqsolve lstsq`.
#[derive(Debug, Clone)]
pub struct LstsqConfig {
    pub csv_path: PathBuf,
    pub target: String,
    pub tolerance: Tolerance,
    /// Relative singular-value cutoff; `None` means `eps * max(m, n)`.
    pub rcond: Option<f64>,
    pub export: Option<PathBuf>,
}

/// Resolved settings for `eqsolve l1`.
#[derive(Debug, Clone)]
pub struct L1Config {
    pub csv_path: PathBuf,
    pub target: String,
    pub lp: LpOptions,
    /// Print column names next to the indices.
    pub names: bool,
    pub export: Option<PathBuf>,
}

/// Portable JSON representation of a run's result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionReport {
    pub tool: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub method: String,
    pub source: PathBuf,
    pub rows: usize,
    pub columns: Vec<String>,
    pub x: Vec<f64>,
    /// `lstsq`: verification outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual_norm: Option<f64>,
    /// `l1`: solver status and objective.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective_value: Option<f64>,
}
