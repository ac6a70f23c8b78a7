//! Forward Euler method.
//!
//! ```text
//! x_{i+1} = x_i + h·f(x_i, t_i)
//! ```
//!
//! One derivative evaluation per step, global error O(h).

use rkstep_core::{
    derivative::Derivative, grid::TimeGrid, integrator::Integrator, trajectory::Trajectory,
    types::Scalar,
};

/// Forward Euler integrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euler;

impl Euler {
    /// Creates a new Euler integrator.
    pub fn new() -> Self {
        Self
    }
}

impl<T: Scalar> Integrator<T> for Euler {
    fn name(&self) -> &str {
        "Euler"
    }

    fn order(&self) -> u32 {
        1
    }

    fn stages(&self) -> usize {
        1
    }

    #[inline]
    fn step<D>(&self, f: &D, state: T, time: T, h: T) -> Result<T, D::Error>
    where
        D: Derivative<T>,
    {
        Ok(state + h * f.evaluate(state, time)?)
    }
}

/// Integrates `f` from `initial` over `grid` with the forward Euler method.
///
/// # Example
///
/// ```
/// use rkstep_core::grid::linspace;
/// use rkstep_methods::euler;
///
/// let grid = linspace(0.0, 1.0, 5).unwrap();
/// let trajectory = euler(&|_x: f64, _t: f64| 2.0, 1.0, &grid).unwrap();
/// assert_eq!(trajectory.last(), Some(3.0));
/// ```
pub fn euler<T, D>(f: &D, initial: T, grid: &TimeGrid<T>) -> Result<Trajectory<T>, D::Error>
where
    T: Scalar,
    D: Derivative<T>,
{
    Euler.integrate(f, initial, grid)
}
