//! Validating entry points over raw time slices.
//!
//! The steppers themselves take a [`TimeGrid`], which can only be built from
//! a valid sequence. These helpers accept a plain slice, reject invalid
//! grids with [`SolveError::InvalidGrid`] before any evaluation, and report
//! derivative failures as [`SolveError::Derivative`].

use rkstep_core::{
    derivative::Derivative, error::SolveError, grid::TimeGrid, trajectory::Trajectory,
    types::Scalar,
};
use rkstep_methods::Method;

/// Integrates `f` from `initial` over `times` with `method`.
///
/// The grid must be non-empty, finite and strictly increasing. Uniform
/// spacing is assumed but not checked: the step size comes from the first
/// two points. Use [`solve_uniform`] to reject irregular grids.
///
/// # Example
///
/// ```
/// use rkstep::{solve, Method};
///
/// let times = [0.0, 0.5, 1.0];
/// let trajectory = solve(Method::Euler, &|_x: f64, _t: f64| 1.0, 0.0, &times).unwrap();
/// assert_eq!(trajectory.into_vec(), vec![0.0, 0.5, 1.0]);
///
/// assert!(solve(Method::Rk4, &|x: f64, _t: f64| x, 1.0, &[]).is_err());
/// ```
pub fn solve<T, D>(
    method: Method,
    f: &D,
    initial: T,
    times: &[T],
) -> Result<Trajectory<T>, SolveError<D::Error>>
where
    T: Scalar,
    D: Derivative<T>,
{
    let grid = TimeGrid::from_slice(times)?;
    method
        .integrate(f, initial, &grid)
        .map_err(SolveError::Derivative)
}

/// Like [`solve`], but also rejects grids whose spacing departs from the
/// first step by more than `T::UNIFORMITY_TOLERANCE` (relative).
pub fn solve_uniform<T, D>(
    method: Method,
    f: &D,
    initial: T,
    times: &[T],
) -> Result<Trajectory<T>, SolveError<D::Error>>
where
    T: Scalar,
    D: Derivative<T>,
{
    let grid = TimeGrid::new_uniform(times.to_vec(), T::UNIFORMITY_TOLERANCE)?;
    method
        .integrate(f, initial, &grid)
        .map_err(SolveError::Derivative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rkstep_core::derivative::{CountingDerivative, CubicSine, Fallible};
    use rkstep_core::error::GridError;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("overflow")]
    struct Overflow;

    #[test]
    fn test_rejects_invalid_grids_before_evaluating() {
        let f = CountingDerivative::new(CubicSine);
        for times in [vec![], vec![0.0, 0.0], vec![1.0, 0.5], vec![0.0, f64::NAN]] {
            let err = solve(Method::Rk4, &f, 0.0, &times).unwrap_err();
            assert!(matches!(err, SolveError::InvalidGrid(_)), "{:?}", times);
        }
        assert_eq!(f.count(), 0);
    }

    #[test]
    fn test_single_point() {
        let trajectory = solve(Method::Rk2, &CubicSine, 4.0, &[1.0]).unwrap();
        assert_eq!(trajectory.into_vec(), vec![4.0]);
    }

    #[test]
    fn test_derivative_error() {
        let f = Fallible(|_x: f64, _t: f64| Err::<f64, _>(Overflow));
        let err = solve(Method::Euler, &f, 0.0, &[0.0, 1.0]).unwrap_err();
        assert_eq!(err.into_derivative_error(), Some(Overflow));
    }

    #[test]
    fn test_irregular_grid_behaviour() {
        let times = [0.0, 0.1, 0.3, 0.4];
        let f = |_x: f64, _t: f64| 1.0;

        // Step size is taken from the first two points only.
        let trajectory = solve(Method::Euler, &f, 0.0, &times).unwrap();
        assert!((trajectory.last().unwrap() - 0.3).abs() < 1e-12);

        let err = solve_uniform(Method::Euler, &f, 0.0, &times).unwrap_err();
        assert!(matches!(
            err.grid_error(),
            Some(GridError::NonUniform { index: 1, .. })
        ));
    }
}
