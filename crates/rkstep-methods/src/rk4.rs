//! Classical fourth-order Runge-Kutta method.
//!
//! ```text
//! k1 = h·f(x_i,        t_i)
//! k2 = h·f(x_i + k1/2, t_i + h/2)
//! k3 = h·f(x_i + k2/2, t_i + h/2)
//! k4 = h·f(x_i + k3,   t_i + h)
//! x_{i+1} = x_i + (k1 + 2k2 + 2k3 + k4)/6
//! ```
//!
//! Four derivative evaluations per step, global error O(h⁴). Among the
//! methods of this crate it is the reference-accuracy one: convergence of
//! Euler and the midpoint method is measured against RK4 on a fine grid.

use rkstep_core::{
    derivative::Derivative, grid::TimeGrid, integrator::Integrator, trajectory::Trajectory,
    types::{constants, Scalar},
};

/// Classical Runge-Kutta integrator (RK4).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassicalRk4;

impl ClassicalRk4 {
    /// Creates a new RK4 integrator.
    pub fn new() -> Self {
        Self
    }
}

impl<T: Scalar> Integrator<T> for ClassicalRk4 {
    fn name(&self) -> &str {
        "RK4"
    }

    fn order(&self) -> u32 {
        4
    }

    fn stages(&self) -> usize {
        4
    }

    #[inline]
    fn step<D>(&self, f: &D, state: T, time: T, h: T) -> Result<T, D::Error>
    where
        D: Derivative<T>,
    {
        let mid = time + h.half();

        let k1 = h * f.evaluate(state, time)?;
        let k2 = h * f.evaluate(state + k1.half(), mid)?;
        let k3 = h * f.evaluate(state + k2.half(), mid)?;
        let k4 = h * f.evaluate(state + k3, time + h)?;

        let two = constants::two::<T>();
        Ok(state + (k1 + two * k2 + two * k3 + k4) / constants::six::<T>())
    }
}

/// Integrates `f` from `initial` over `grid` with the classical RK4 method.
///
/// # Example
///
/// ```
/// use rkstep_core::derivative::CubicSine;
/// use rkstep_core::grid::linspace;
/// use rkstep_methods::rk4;
///
/// let grid = linspace(0.0, 10.0, 20).unwrap();
/// let trajectory: rkstep_core::trajectory::Trajectory<f64> = rk4(&CubicSine, 0.0, &grid).unwrap();
/// assert_eq!(trajectory.len(), 20);
/// assert!((trajectory[1] - 0.1351).abs() < 5e-5);
/// ```
pub fn rk4<T, D>(f: &D, initial: T, grid: &TimeGrid<T>) -> Result<Trajectory<T>, D::Error>
where
    T: Scalar,
    D: Derivative<T>,
{
    ClassicalRk4.integrate(f, initial, grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rkstep_core::derivative::{CountingDerivative, CubicSine};
    use rkstep_core::grid::linspace;
    use rkstep_core::test_problems::ExponentialDecay;

    #[test]
    fn test_cubic_sine_reference_trace() {
        let grid = linspace(0.0, 10.0, 20).unwrap();
        let trajectory = rk4(&CubicSine, 0.0, &grid).unwrap();
        assert_eq!(trajectory.len(), 20);
        assert_eq!(trajectory[0], 0.0);
        assert_relative_eq!(trajectory[1], 0.135_059_367_795_899_72, epsilon = 1e-12);
        assert_relative_eq!(trajectory[2], 0.484_875_858_877_776_3, epsilon = 1e-12);
        assert_relative_eq!(trajectory.last().unwrap(), 0.430_146_338_950_121_66, epsilon = 1e-10);
    }

    #[test]
    fn test_exact_for_cubic_time_slope() {
        // Simpson's rule is exact for cubics, and RK4 reduces to it when f ignores x.
        let grid = linspace(0.0, 1.0, 5).unwrap();
        let f = |_x: f64, t: f64| 4.0 * t * t * t;
        let trajectory = rk4(&f, 0.0, &grid).unwrap();
        for (x, t) in trajectory.iter().zip(grid.iter()) {
            assert_relative_eq!(*x, t.powi(4), epsilon = 1e-14);
        }
    }

    #[test]
    fn test_exponential_decay_accuracy() {
        let problem = ExponentialDecay::new(1.0);
        let grid = linspace(0.0, 1.0, 11).unwrap();
        let trajectory: Trajectory<f64> = rk4(&problem, 1.0, &grid).unwrap();
        let exact = problem.exact(1.0, 0.0, 1.0);
        // Local error per step is about h^5/120, ten steps.
        assert!((trajectory.last().unwrap() - exact).abs() < 1e-6);
    }

    #[test]
    fn test_four_evaluations_per_step() {
        let grid = linspace(0.0, 1.0, 11).unwrap();
        let f = CountingDerivative::new(|x: f64, _t: f64| -x);
        rk4(&f, 1.0, &grid).unwrap();
        assert_eq!(f.count(), 40);
    }
}
