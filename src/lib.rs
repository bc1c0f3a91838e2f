//! `eqsolve` library crate.
//!
//! The binary (`eqsolve`) is a thin wrapper around this library so that:
//!
//! - the solvers are testable without spawning processes or writing files
//! - each pipeline stage (load, solve, report) can be called on its own

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod lp;
pub mod math;
pub mod report;
