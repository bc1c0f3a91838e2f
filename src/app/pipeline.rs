//! The two solve pipelines, free of any printing.
//!
//! load -> solve -> (verify)
//!
//! Each has a file-based entry point and an `*_on_system` variant taking a
//! pre-loaded `LinearSystem`, so the numerics are testable without fixtures.

use std::path::Path;

use chrono::Utc;

use crate::domain::{
    L1Config, LeastSquaresSolution, LinearSystem, LpOptions, LpSolution, LstsqConfig, SolutionReport, Tolerance,
};
use crate::error::AppError;
use crate::io::ingest::load_system;
use crate::math::{all_close, solve_least_squares};

/// Outputs of one `eqsolve lstsq` run.
#[derive(Debug, Clone)]
pub struct LstsqRun {
    pub system: LinearSystem,
    pub solution: LeastSquaresSolution,
    pub verified: bool,
}

/// Outputs of one `eqsolve l1` run.
#[derive(Debug, Clone)]
pub struct L1Run {
    pub system: LinearSystem,
    pub solution: LpSolution,
}

pub fn run_lstsq(config: &LstsqConfig) -> Result<LstsqRun, AppError> {
    let system = load_logged(&config.csv_path, &config.target)?;
    lstsq_on_system(system, config.tolerance, config.rcond)
}

pub fn lstsq_on_system(system: LinearSystem, tolerance: Tolerance, rcond: Option<f64>) -> Result<LstsqRun, AppError> {
    let solution = solve_least_squares(&system.a, &system.b, rcond)?;
    log::info!(
        "least squares: rank={} of {} | residual_norm={:.6e} | cutoff={:.3e}",
        solution.rank,
        system.unknowns(),
        solution.residual_norm,
        solution.cutoff
    );

    let verified = all_close(&system.a, &solution.x, &system.b, tolerance);
    if !verified {
        log::warn!(
            "A·x differs from b beyond rtol={} atol={} (residual norm {:.6e})",
            tolerance.rtol,
            tolerance.atol,
            solution.residual_norm
        );
    }

    Ok(LstsqRun {
        system,
        solution,
        verified,
    })
}

pub fn run_l1(config: &L1Config) -> Result<L1Run, AppError> {
    let system = load_logged(&config.csv_path, &config.target)?;
    l1_on_system(system, &config.lp)
}

pub fn l1_on_system(system: LinearSystem, options: &LpOptions) -> Result<L1Run, AppError> {
    let solution = crate::lp::solve_bounded(&system.a, &system.b, options)?;
    Ok(L1Run { system, solution })
}

impl LstsqRun {
    pub fn to_report(&self, source: &Path) -> SolutionReport {
        SolutionReport {
            verified: Some(self.verified),
            rank: Some(self.solution.rank),
            residual_norm: Some(self.solution.residual_norm),
            ..base_report("lstsq", source, &self.system, self.solution.x.iter().copied().collect())
        }
    }
}

impl L1Run {
    pub fn to_report(&self, source: &Path, options: &LpOptions) -> SolutionReport {
        let method = match options.objective {
            crate::domain::Objective::Sum => "l1",
            crate::domain::Objective::Abs => "l1-abs",
        };
        SolutionReport {
            status: Some(self.solution.status.clone()),
            objective_value: Some(self.solution.objective_value),
            ..base_report(method, source, &self.system, self.solution.x.iter().copied().collect())
        }
    }
}

fn base_report(method: &str, source: &Path, system: &LinearSystem, x: Vec<f64>) -> SolutionReport {
    SolutionReport {
        tool: "eqsolve".to_string(),
        generated_at: Utc::now(),
        method: method.to_string(),
        source: source.to_path_buf(),
        rows: system.rows(),
        columns: system.columns.clone(),
        x,
        verified: None,
        rank: None,
        residual_norm: None,
        status: None,
        objective_value: None,
    }
}

fn load_logged(path: &Path, target: &str) -> Result<LinearSystem, AppError> {
    let system = load_system(path, target)?;
    log::info!(
        "loaded '{}': {} equations x {} unknowns (target `{target}`)",
        path.display(),
        system.rows(),
        system.unknowns()
    );
    Ok(system)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EXIT_SOLVER;
    use crate::io::ingest::read_system;

    #[test]
    fn lstsq_pipeline_verifies_consistent_system() {
        let system = read_system("x,y,equals\n1,1,3\n1,-1,1\n".as_bytes(), "equals").unwrap();
        let run = lstsq_on_system(system, Tolerance::default(), None).unwrap();
        assert!(run.verified);
        assert!((run.solution.x[0] - 2.0).abs() < 1e-10);
        assert!((run.solution.x[1] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn lstsq_pipeline_reports_inconsistent_system_as_unverified() {
        let system = read_system("x,equals\n1,1\n1,2\n".as_bytes(), "equals").unwrap();
        let run = lstsq_on_system(system, Tolerance::default(), None).unwrap();
        assert!(!run.verified);

        let report = run.to_report(Path::new("out.csv"));
        assert_eq!(report.method, "lstsq");
        assert_eq!(report.verified, Some(false));
        assert_eq!(report.columns, vec!["x"]);
    }

    #[test]
    fn l1_pipeline_surfaces_infeasibility_as_solver_error() {
        let system = read_system("a,b,equals\n1,0,3\n0,1,3\n".as_bytes(), "equals").unwrap();
        let err = l1_on_system(system, &LpOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_SOLVER);
    }

    #[test]
    fn l1_pipeline_solves_within_bounds() {
        let system = read_system("a,b,equals\n1,1,0\n".as_bytes(), "equals").unwrap();
        let options = LpOptions::default();
        let run = l1_on_system(system, &options).unwrap();
        assert!((run.solution.x[0] + run.solution.x[1]).abs() < 1e-6);

        let report = run.to_report(Path::new("out.csv"), &options);
        assert_eq!(report.method, "l1");
        assert_eq!(report.x.len(), 2);
        assert_eq!(report.status.as_deref(), Some("Solved"));
    }
}
