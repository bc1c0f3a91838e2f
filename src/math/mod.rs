//! Dense linear algebra: minimum-norm least squares and the all-close check.

pub mod lstsq;
pub mod verify;

pub use lstsq::*;
pub use verify::*;
