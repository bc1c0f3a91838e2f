//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging on stderr
//! - runs the selected pipeline
//! - prints the result and writes the optional export

use clap::Parser;

use crate::cli::{Command, InputArgs, L1Args, LstsqArgs};
use crate::domain::{L1Config, LpOptions, LstsqConfig, Tolerance};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `eqsolve` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is the normal case.
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Lstsq(args) => {
            init_logging(&args.input);
            handle_lstsq(&lstsq_config_from_args(&args))
        }
        Command::L1(args) => {
            init_logging(&args.input);
            handle_l1(&l1_config_from_args(&args))
        }
    }
}

fn handle_lstsq(config: &LstsqConfig) -> Result<(), AppError> {
    let run = pipeline::run_lstsq(config)?;

    println!("{}", crate::report::format_verification(run.verified));

    if let Some(path) = &config.export {
        crate::io::export::write_report_json(path, &run.to_report(&config.csv_path))?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn handle_l1(config: &L1Config) -> Result<(), AppError> {
    let run = pipeline::run_l1(config)?;

    let names = config.names.then_some(run.system.columns.as_slice());
    print!("{}", crate::report::format_coefficients(&run.solution.x, names));

    if let Some(path) = &config.export {
        crate::io::export::write_report_json(path, &run.to_report(&config.csv_path, &config.lp))?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

pub fn lstsq_config_from_args(args: &LstsqArgs) -> LstsqConfig {
    LstsqConfig {
        csv_path: args.input.csv.clone(),
        target: args.input.target.clone(),
        tolerance: Tolerance {
            rtol: args.rtol,
            atol: args.atol,
        },
        rcond: args.rcond,
        export: args.input.export.clone(),
    }
}

pub fn l1_config_from_args(args: &L1Args) -> L1Config {
    L1Config {
        csv_path: args.input.csv.clone(),
        target: args.input.target.clone(),
        lp: LpOptions {
            bound: args.bound,
            max_iter: args.max_iter,
            presolve: args.presolve,
            objective: args.objective,
        },
        names: args.names,
        export: args.input.export.clone(),
    }
}

/// `warn` by default, raised by `-v`; `RUST_LOG` wins when set.
fn init_logging(input: &InputArgs) {
    let level = match input.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l1_config_carries_solver_options() {
        let cli = crate::cli::Cli::parse_from([
            "eqsolve", "l1", "--csv", "s.csv", "--bound", "5", "--max-iter", "50", "--objective", "abs", "--names",
        ]);
        let Command::L1(args) = cli.command else {
            panic!("expected l1");
        };
        let config = l1_config_from_args(&args);
        assert_eq!(config.lp.bound, 5.0);
        assert_eq!(config.lp.max_iter, 50);
        assert_eq!(config.lp.objective, crate::domain::Objective::Abs);
        assert!(config.names);
        assert!(config.export.is_none());
    }

    #[test]
    fn lstsq_config_defaults_match_allclose() {
        let cli = crate::cli::Cli::parse_from(["eqsolve", "lstsq", "--csv", "s.csv"]);
        let Command::Lstsq(args) = cli.command else {
            panic!("expected lstsq");
        };
        let config = lstsq_config_from_args(&args);
        assert_eq!(config.tolerance, Tolerance::default());
        assert_eq!(config.target, "equals");
    }
}
