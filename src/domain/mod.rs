//! Domain types used throughout the pipelines.
//!
//! This module defines:
//!
//! - the loaded system (`LinearSystem`)
//! - solver options (`Tolerance`, `LpOptions`, `Objective`)
//! - solver outputs (`LeastSquaresSolution`, `LpSolution`, `SolutionReport`)
//! - per-command configs (`LstsqConfig`, `L1Config`)

pub mod types;

pub use types::*;
