//! Fixed-step integrator framework.
//!
//! An explicit one-step method is fully described by its increment
//! function: given the state `x` at time `t` and the step size `h`, it
//! returns the state at `t + h`. The [`Integrator`] trait captures that
//! single step, and [`Integrator::integrate`] folds it over a time grid.
//!
//! # Fold contract
//!
//! For a grid `t[0..N]` and initial value `x0`:
//!
//! - `h = t[1] - t[0]` is derived once and reused for every step
//! - `x[0] = x0`
//! - `x[i+1] = step(f, x[i], t[i], h)` for `i = 0..N-1`
//!
//! A single-point grid returns `[x0]` without evaluating `f`. The first
//! derivative error aborts the fold and is returned unchanged; no partial
//! trajectory is produced. NaN or infinite values are not inspected and
//! propagate through the remaining steps.
//!
//! On a grid whose spacing is irregular, `t[i]` is still read positionally
//! while `h` stays at the first spacing.

use crate::{derivative::Derivative, grid::TimeGrid, trajectory::Trajectory, types::Scalar};
use log::debug;
use std::fmt::Debug;

/// Explicit one-step integration method.
///
/// Implementors define [`step`](Integrator::step); the grid fold is shared.
pub trait Integrator<T>: Debug
where
    T: Scalar,
{
    /// Human-readable name of the method, used for logging and reports.
    fn name(&self) -> &str;

    /// Global order of accuracy p (error behaves as O(h^p)).
    fn order(&self) -> u32;

    /// Number of derivative evaluations per step.
    fn stages(&self) -> usize;

    /// Advances the state by one step of size `h` from `(state, time)`.
    ///
    /// # Errors
    ///
    /// Returns the derivative function's error unchanged.
    fn step<D>(&self, f: &D, state: T, time: T, h: T) -> Result<T, D::Error>
    where
        D: Derivative<T>;

    /// Integrates from `initial` over every point of `grid`.
    ///
    /// The returned trajectory has exactly `grid.len()` values and starts
    /// with `initial`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the derivative function.
    fn integrate<D>(&self, f: &D, initial: T, grid: &TimeGrid<T>) -> Result<Trajectory<T>, D::Error>
    where
        D: Derivative<T>,
    {
        let times = grid.as_slice();
        let mut values = Vec::with_capacity(times.len());
        values.push(initial);

        let Some(h) = grid.step_size() else {
            return Ok(Trajectory::from_values(values));
        };

        debug!(
            "{}: integrating {} steps with h = {}",
            self.name(),
            grid.steps(),
            h
        );

        let mut state = initial;
        for &time in &times[..times.len() - 1] {
            state = self.step(f, state, time, h)?;
            values.push(state);
        }

        Ok(Trajectory::from_values(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivative::{ConstantDerivative, CountingDerivative, Fallible};
    use crate::grid::linspace;
    use pretty_assertions::assert_eq;

    /// Forward step that only advances time, x(t) = x0 + (t - t0).
    #[derive(Debug)]
    struct UnitDrift;

    impl Integrator<f64> for UnitDrift {
        fn name(&self) -> &str {
            "Unit drift"
        }

        fn order(&self) -> u32 {
            1
        }

        fn stages(&self) -> usize {
            1
        }

        fn step<D>(&self, f: &D, state: f64, time: f64, h: f64) -> Result<f64, D::Error>
        where
            D: Derivative<f64>,
        {
            f.evaluate(state, time)?;
            Ok(state + h)
        }
    }

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("blow-up at t = {0}")]
    struct BlowUp(f64);

    #[test]
    fn test_fold_length_and_initial_value() {
        let grid = TimeGrid::new(vec![0.0, 0.5, 1.0, 1.5]).unwrap();
        let trajectory = UnitDrift
            .integrate(&ConstantDerivative(0.0), 3.0, &grid)
            .unwrap();
        assert_eq!(trajectory.into_vec(), vec![3.0, 3.5, 4.0, 4.5]);
    }

    #[test]
    fn test_single_point_skips_evaluation() {
        let grid = linspace(0.0, 0.0, 1).unwrap();
        let f = CountingDerivative::new(ConstantDerivative(1.0));
        let trajectory = UnitDrift.integrate(&f, 7.0, &grid).unwrap();
        assert_eq!(trajectory.into_vec(), vec![7.0]);
        assert_eq!(f.count(), 0);
    }

    #[test]
    fn test_step_size_comes_from_first_two_points() {
        let grid = TimeGrid::new(vec![0.0, 0.1, 0.5, 2.0]).unwrap();
        let times = std::cell::RefCell::new(Vec::new());
        let f = |_x: f64, t: f64| {
            times.borrow_mut().push(t);
            0.0
        };
        let trajectory = UnitDrift.integrate(&f, 0.0, &grid).unwrap();

        assert_eq!(times.into_inner(), vec![0.0, 0.1, 0.5]);
        let values = trajectory.into_vec();
        assert!((values[3] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_derivative_error_aborts_fold() {
        let grid = linspace(0.0, 1.0, 11).unwrap();
        let f = Fallible(|_x: f64, t: f64| if t > 0.45 { Err(BlowUp(t)) } else { Ok(1.0) });
        let err = UnitDrift.integrate(&f, 0.0, &grid).unwrap_err();
        assert_eq!(err, BlowUp(0.5));
    }
}
