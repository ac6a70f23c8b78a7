//! Invariants shared by every stepper.
//!
//! These tests run the three methods side by side over random grids and
//! initial values and check the properties that hold regardless of order.

use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rkstep_core::{
    derivative::{ConstantDerivative, CountingDerivative, CubicSine},
    grid::{linspace, TimeGrid},
};
use rkstep_methods::Method;

fn grid_strategy() -> impl Strategy<Value = TimeGrid<f64>> {
    (-50.0f64..50.0, 0.01f64..20.0, 1usize..200)
        .prop_map(|(start, span, count)| linspace(start, start + span, count).unwrap())
}

proptest! {
    #[test]
    fn prop_initial_value_and_length(
        grid in grid_strategy(),
        initial in -10.0f64..10.0,
    ) {
        for method in Method::ALL {
            let trajectory = method.integrate(&CubicSine, initial, &grid).unwrap();
            prop_assert_eq!(trajectory.len(), grid.len());
            prop_assert_eq!(trajectory[0], initial);
        }
    }

    #[test]
    fn prop_zero_derivative_keeps_state(
        grid in grid_strategy(),
        initial in -1e6f64..1e6,
    ) {
        let zero = |_x: f64, _t: f64| 0.0;
        for method in Method::ALL {
            let trajectory = method.integrate(&zero, initial, &grid).unwrap();
            prop_assert!(trajectory.iter().all(|&x| x == initial));
        }
    }

    #[test]
    fn prop_constant_derivative_is_exact_and_shared(
        grid in grid_strategy(),
        initial in -10.0f64..10.0,
        slope in -5.0f64..5.0,
    ) {
        let f = ConstantDerivative(slope);
        let euler = Method::Euler.integrate(&f, initial, &grid).unwrap();
        let rk2 = Method::Rk2.integrate(&f, initial, &grid).unwrap();
        let rk4 = Method::Rk4.integrate(&f, initial, &grid).unwrap();

        let h = grid.step_size().unwrap_or(0.0);
        for i in 0..grid.len() {
            let exact = initial + slope * h * i as f64;
            let tolerance = 1e-9 * (1.0 + exact.abs());
            prop_assert!((euler[i] - exact).abs() <= tolerance);
            prop_assert!((rk2[i] - exact).abs() <= tolerance);
            prop_assert!((rk4[i] - exact).abs() <= tolerance);
            // k-terms are all equal, so the three recurrences agree up to rounding
            prop_assert!((euler[i] - rk2[i]).abs() <= tolerance);
            prop_assert!((euler[i] - rk4[i]).abs() <= tolerance);
        }
    }
}

#[test]
fn test_constant_derivative_matches_grid_times() {
    let grid = linspace(0.0, 10.0, 20).unwrap();
    let f = ConstantDerivative(0.75);
    for method in Method::ALL {
        let trajectory = method.integrate(&f, 2.0, &grid).unwrap();
        for (x, t) in trajectory.iter().zip(grid.iter()) {
            assert_relative_eq!(*x, 2.0 + 0.75 * t, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_single_point_grid_never_evaluates() {
    let grid = TimeGrid::new(vec![3.0]).unwrap();
    for method in Method::ALL {
        let f = CountingDerivative::new(CubicSine);
        let trajectory = method.integrate(&f, 1.25, &grid).unwrap();
        assert_eq!(trajectory.into_vec(), vec![1.25]);
        assert_eq!(f.count(), 0);
    }
}

#[test]
fn test_evaluation_counts() {
    let grid = linspace(0.0, 1.0, 33).unwrap();
    for method in Method::ALL {
        let f = CountingDerivative::new(CubicSine);
        method.integrate(&f, 0.0, &grid).unwrap();
        assert_eq!(f.count(), method.stages() * 32, "{}", method);
    }
}

#[test]
fn test_cubic_sine_scenario() {
    let grid = linspace(0.0, 10.0, 20).unwrap();
    for method in Method::ALL {
        let trajectory = method.integrate(&CubicSine, 0.0, &grid).unwrap();
        assert_eq!(trajectory.len(), 20);
        assert_eq!(trajectory[0], 0.0);
        assert!(trajectory.is_finite());
    }
    let rk4: rkstep_core::trajectory::Trajectory<f64> = Method::Rk4.integrate(&CubicSine, 0.0, &grid).unwrap();
    assert!((rk4[1] - 0.1351).abs() < 5e-5);
}

#[test]
fn test_grid_is_not_mutated() {
    let grid = linspace(0.0, 10.0, 20).unwrap();
    let before = grid.clone();
    for method in Method::ALL {
        method.integrate(&CubicSine, 0.0, &grid).unwrap();
    }
    assert_eq!(grid, before);
}

#[test]
fn test_f32_support() {
    let grid = linspace(0.0f32, 1.0, 11).unwrap();
    let f = |x: f32, _t: f32| -x;
    let trajectory = Method::Rk4.integrate(&f, 1.0f32, &grid).unwrap();
    assert!((trajectory.last().unwrap() - (-1.0f32).exp()).abs() < 1e-5);
}
