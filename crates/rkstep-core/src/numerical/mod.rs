//! Numerical utilities: finiteness checks and convergence analysis.

pub mod convergence;
pub mod stability;

pub use convergence::*;
pub use stability::*;
