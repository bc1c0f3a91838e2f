//! Command-line parsing.
//!
//! Argument parsing and command dispatch stay separate from the solver code:
//! this module only describes the flags, `app` turns them into configs.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{DEFAULT_CSV_PATH, DEFAULT_TARGET_COLUMN, Objective};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "eqsolve", version, about = "Solve A·x = b from a CSV of coefficients")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Minimum-norm least-squares solve, then print whether A·x ≈ b (True/False).
    Lstsq(LstsqArgs),
    /// Bounded LP minimizing Σx subject to A·x = b and Σx <= 0; prints "<index>, <value>".
    L1(L1Args),
}

/// Options shared by both pipelines.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Coefficient CSV with a header row.
    #[arg(long, env = "EQSOLVE_CSV", default_value = DEFAULT_CSV_PATH)]
    pub csv: PathBuf,

    /// Right-hand-side column; every other column is a coefficient.
    #[arg(long, default_value = DEFAULT_TARGET_COLUMN)]
    pub target: String,

    /// Write the solution as JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Increase log verbosity on stderr (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Args, Clone)]
pub struct LstsqArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Relative tolerance of the A·x ≈ b check.
    #[arg(long, default_value_t = 1e-5)]
    pub rtol: f64,

    /// Absolute tolerance of the A·x ≈ b check.
    #[arg(long, default_value_t = 1e-8)]
    pub atol: f64,

    /// Singular values below rcond·σ_max are treated as zero
    /// (default: machine epsilon × max(rows, columns)).
    #[arg(long)]
    pub rcond: Option<f64>,
}

#[derive(Debug, Args, Clone)]
pub struct L1Args {
    #[command(flatten)]
    pub input: InputArgs,

    /// Every component is constrained to [-bound, bound].
    #[arg(long, default_value_t = 10.0)]
    pub bound: f64,

    /// Interior-point iteration cap.
    #[arg(long, default_value_t = 1000)]
    pub max_iter: u32,

    /// Enable the solver's presolve step.
    #[arg(long)]
    pub presolve: bool,

    /// Objective to minimize: the plain sum Σx, or the absolute sum Σ|x|.
    #[arg(long, value_enum, default_value_t = Objective::Sum)]
    pub objective: Objective,

    /// Print column names next to indices.
    #[arg(long)]
    pub names: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn l1_defaults() {
        let cli = Cli::parse_from(["eqsolve", "l1", "--csv", "sys.csv"]);
        let Command::L1(args) = cli.command else {
            panic!("expected l1");
        };
        assert_eq!(args.input.csv, PathBuf::from("sys.csv"));
        assert_eq!(args.input.target, "equals");
        assert_eq!(args.bound, 10.0);
        assert_eq!(args.max_iter, 1000);
        assert!(!args.presolve);
        assert_eq!(args.objective, Objective::Sum);
    }

    #[test]
    fn lstsq_tolerances() {
        let cli = Cli::parse_from(["eqsolve", "lstsq", "--csv", "a.csv", "--rtol", "1e-3", "-vv"]);
        let Command::Lstsq(args) = cli.command else {
            panic!("expected lstsq");
        };
        assert_eq!(args.rtol, 1e-3);
        assert_eq!(args.atol, 1e-8);
        assert_eq!(args.rcond, None);
        assert_eq!(args.input.verbose, 2);
    }
}
