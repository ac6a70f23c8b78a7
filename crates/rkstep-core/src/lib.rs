//! Core traits and types for fixed-step ODE integration.
//!
//! This crate provides the building blocks shared by every stepper in the
//! workspace: the scalar trait, validated time grids, the derivative
//! function interface, trajectories, and the [`Integrator`] trait whose
//! provided `integrate` method folds a single step over a grid.
//!
//! # Key Concepts
//!
//! - **Derivative function**: the right-hand side f(x, t) of dx/dt = f(x, t)
//! - **Time grid**: strictly increasing time points; the step size is taken
//!   from the first two
//! - **Trajectory**: one approximate state per grid point, starting at x0
//!
//! # Modules
//!
//! - [`derivative`]: Derivative function trait and adapters
//! - [`error`]: Error types for grids, solving and analysis
//! - [`grid`]: Time grids and `linspace`
//! - [`integrator`]: One-step method trait and the shared grid fold
//! - [`numerical`]: Finiteness checks and convergence analysis
//! - [`trajectory`]: Integration output
//! - [`types`]: Scalar trait and constants

pub mod core;
pub mod integrator;
pub mod numerical;
pub mod utils;

pub use crate::core::{derivative, error, grid, trajectory, types};

#[cfg(any(test, feature = "test-utils"))]
pub use crate::utils::test_problems;

pub use crate::core::error::{AnalysisError, GridError, SolveError};
pub use crate::integrator::Integrator;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use rkstep_core::prelude::*;
///
/// let grid = linspace(0.0, 1.0, 11).unwrap();
/// assert_eq!(grid.len(), 11);
/// ```
pub mod prelude {
    pub use crate::core::derivative::{
        ConstantDerivative, CountingDerivative, CubicSine, Derivative, Fallible,
    };
    pub use crate::core::error::{
        AnalysisError, AnalysisResult, GridError, GridResult, SolveError,
    };
    pub use crate::core::grid::{linspace, TimeGrid, MAX_GRID_POINTS};
    pub use crate::core::trajectory::Trajectory;
    pub use crate::core::types::{constants, Scalar};
    pub use crate::integrator::Integrator;
    pub use crate::numerical::{
        all_finite, endpoint_error, first_non_finite, fit_order, max_abs_error, observed_order,
        observed_orders, strided_max_error, OrderFit,
    };
}
