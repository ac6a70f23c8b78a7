//! # rkstep
//!
//! Fixed-step explicit integrators for scalar ordinary differential
//! equations dx/dt = f(x, t), with drivers that compare methods side by
//! side and measure their order of accuracy.
//!
//! ## Features
//!
//! - **Steppers**: forward Euler, midpoint RK2 and classical RK4 over any
//!   strictly increasing time grid
//! - **Validation**: [`solve`] rejects empty, non-finite and non-increasing
//!   grids before the first evaluation
//! - **Comparison runs**: every method at several resolutions, streamed to
//!   a [`PlotSink`](output::PlotSink)
//! - **Convergence studies**: errors under step doubling, observed orders
//!   and a least-squares order fit
//!
//! ## Quick Start
//!
//! ```rust
//! use rkstep::prelude::*;
//!
//! // dx/dt = -x³ + sin t on 20 points over [0, 10]
//! let grid = linspace(0.0, 10.0, 20).unwrap();
//! let trajectory: Trajectory<f64> = rk4(&CubicSine, 0.0, &grid).unwrap();
//!
//! assert_eq!(trajectory.len(), 20);
//! assert!((trajectory[1] - 0.13506).abs() < 1e-4);
//! ```
//!
//! ## Crate Organization
//!
//! - [`rkstep_core`]: scalar trait, grids, derivative functions, the
//!   integrator fold and error analysis
//! - [`rkstep_methods`]: the three steppers and the [`Method`] selector
//! - this crate: validated entry points, study drivers and plot sinks

pub use rkstep_core;
pub use rkstep_methods;

pub mod config;
pub mod error;
pub mod output;
pub mod solve;
pub mod study;

pub use config::{ComparisonConfig, ConvergenceConfig};
pub use error::{ConfigError, StudyError};
pub use output::{CsvSink, PlotSink, RecordingSink};
pub use solve::{solve, solve_uniform};
pub use study::{
    convergence_study, convergence_study_against, run_comparison, ComparisonReport,
    ConvergenceReport, MethodConvergence,
};

#[cfg(feature = "parallel")]
pub use study::par_convergence_study;

pub use rkstep_core::{
    derivative::Derivative,
    error::{AnalysisError, GridError, SolveError},
    grid::{linspace, TimeGrid},
    trajectory::Trajectory,
    types::Scalar,
};
pub use rkstep_methods::{euler, rk2, rk4, Method, UnknownMethod};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{ComparisonConfig, ConvergenceConfig};
    pub use crate::error::{ConfigError, StudyError};
    pub use crate::output::{CsvSink, PlotSink, RecordingSink};
    pub use crate::solve::{solve, solve_uniform};
    pub use crate::study::{
        convergence_study, convergence_study_against, run_comparison, ComparisonReport,
        ConvergenceLevel, ConvergenceReport, MethodConvergence, ReferenceKind,
    };

    #[cfg(feature = "parallel")]
    pub use crate::study::par_convergence_study;

    pub use rkstep_core::prelude::*;
    pub use rkstep_methods::{euler, rk2, rk4, ClassicalRk4, Euler, Method, Midpoint};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
