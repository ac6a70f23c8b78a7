//! rkstep methods - fixed-step explicit integrators for scalar ODEs.
//!
//! This crate provides the concrete steppers built on the
//! [`Integrator`](rkstep_core::Integrator) trait from `rkstep-core`.
//!
//! # Available Methods
//!
//! - **Euler**: forward Euler, first order, one evaluation per step
//! - **RK2**: explicit midpoint Runge-Kutta, second order, two evaluations
//! - **RK4**: classical Runge-Kutta, fourth order, four evaluations
//!
//! Each method is defined once, as the `step` of its integrator type. The
//! free functions [`euler`], [`rk2`] and [`rk4`] and the [`Method`] enum all
//! go through that single definition.
//!
//! # Examples
//!
//! ```rust
//! use rkstep_core::grid::linspace;
//! use rkstep_methods::{euler, rk2, rk4, Method};
//!
//! let f = |x: f64, t: f64| -x.powi(3) + t.sin();
//! let grid = linspace(0.0, 10.0, 20).unwrap();
//!
//! let coarse = euler(&f, 0.0, &grid).unwrap();
//! let better = rk2(&f, 0.0, &grid).unwrap();
//! let best = rk4(&f, 0.0, &grid).unwrap();
//! assert_eq!(coarse.len(), grid.len());
//! assert_eq!(better.initial(), Some(0.0));
//! assert_eq!(best, Method::Rk4.integrate(&f, 0.0, &grid).unwrap());
//! ```

pub mod euler;
pub mod method;
pub mod midpoint;
pub mod rk4;

pub use euler::{euler, Euler};
pub use method::{Method, UnknownMethod};
pub use midpoint::{rk2, Midpoint};
pub use rk4::{rk4, ClassicalRk4};

pub use rkstep_core::integrator::Integrator;
