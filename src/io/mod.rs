//! Input/output helpers.
//!
//! - CSV ingest into `A`/`b` (`ingest`)
//! - solution export to JSON (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
