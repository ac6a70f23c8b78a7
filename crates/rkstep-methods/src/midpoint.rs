//! Explicit midpoint method (second-order Runge-Kutta).
//!
//! ```text
//! k1 = h·f(x_i, t_i)
//! k2 = h·f(x_i + k1/2, t_i + h/2)
//! x_{i+1} = x_i + k2
//! ```
//!
//! The first stage estimates the state half a step ahead; the slope at that
//! midpoint is then used for the full step. Two derivative evaluations per
//! step, global error O(h²).

use rkstep_core::{
    derivative::Derivative, grid::TimeGrid, integrator::Integrator, trajectory::Trajectory,
    types::Scalar,
};

/// Midpoint Runge-Kutta integrator (RK2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Midpoint;

impl Midpoint {
    /// Creates a new midpoint integrator.
    pub fn new() -> Self {
        Self
    }
}

impl<T: Scalar> Integrator<T> for Midpoint {
    fn name(&self) -> &str {
        "RK2 (midpoint)"
    }

    fn order(&self) -> u32 {
        2
    }

    fn stages(&self) -> usize {
        2
    }

    #[inline]
    fn step<D>(&self, f: &D, state: T, time: T, h: T) -> Result<T, D::Error>
    where
        D: Derivative<T>,
    {
        let k1 = h * f.evaluate(state, time)?;
        let k2 = h * f.evaluate(state + k1.half(), time + h.half())?;
        Ok(state + k2)
    }
}

/// Integrates `f` from `initial` over `grid` with the midpoint method.
pub fn rk2<T, D>(f: &D, initial: T, grid: &TimeGrid<T>) -> Result<Trajectory<T>, D::Error>
where
    T: Scalar,
    D: Derivative<T>,
{
    Midpoint.integrate(f, initial, grid)
}
