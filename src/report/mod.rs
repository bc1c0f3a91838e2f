//! Reporting: what each pipeline prints to stdout.

pub mod format;

pub use format::*;
