//! Time grids for fixed-step integration.
//!
//! A [`TimeGrid`] is a non-empty, finite, strictly increasing sequence of
//! time points. The steppers derive the step size once from the first two
//! points and use it for every step, so the grid is expected to be uniform.
//! Uniformity is not enforced by [`TimeGrid::new`]; use
//! [`TimeGrid::new_uniform`] to reject irregular grids up front.

use crate::{
    error::{GridError, GridResult},
    types::Scalar,
};
use std::ops::Index;

/// Largest point count [`linspace`] will allocate.
pub const MAX_GRID_POINTS: usize = 1 << 27;

/// Validated time grid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeGrid<T: Scalar> {
    points: Vec<T>,
}

impl<T: Scalar> TimeGrid<T> {
    /// Builds a grid from its points.
    ///
    /// # Errors
    ///
    /// - [`GridError::Empty`] if `points` is empty
    /// - [`GridError::NonFinite`] if a point is NaN or infinite
    /// - [`GridError::NotIncreasing`] if a point does not exceed its predecessor
    pub fn new(points: Vec<T>) -> GridResult<Self> {
        if points.is_empty() {
            return Err(GridError::Empty);
        }
        if let Some(index) = points.iter().position(|t| !t.is_finite()) {
            return Err(GridError::non_finite(index));
        }
        if let Some(index) = points.windows(2).position(|w| w[1] <= w[0]) {
            return Err(GridError::not_increasing(index + 1));
        }
        Ok(Self { points })
    }

    /// Builds a grid and additionally checks that every step matches the
    /// first one within `tolerance` (relative to the first step).
    pub fn new_uniform(points: Vec<T>, tolerance: T) -> GridResult<Self> {
        let grid = Self::new(points)?;
        grid.check_uniform(tolerance)?;
        Ok(grid)
    }

    /// Builds a grid from a slice, copying the points.
    pub fn from_slice(points: &[T]) -> GridResult<Self> {
        Self::new(points.to_vec())
    }

    /// Evenly spaced grid of `count` points from `start` to `end` inclusive.
    ///
    /// `count == 1` yields the single point `start`.
    ///
    /// # Errors
    ///
    /// - [`GridError::InvalidCount`] if `count` is zero or exceeds
    ///   [`MAX_GRID_POINTS`]
    /// - [`GridError::InvalidInterval`] if the bounds are not finite, or if
    ///   `count > 1` and `start >= end`
    pub fn linspace(start: T, end: T, count: usize) -> GridResult<Self> {
        if count == 0 || count > MAX_GRID_POINTS {
            return Err(GridError::InvalidCount { count });
        }
        if !start.is_finite() || !end.is_finite() || (count > 1 && start >= end) {
            return Err(GridError::invalid_interval(
                Scalar::to_f64(start),
                Scalar::to_f64(end),
            ));
        }
        if count == 1 {
            return Ok(Self {
                points: vec![start],
            });
        }

        let step = (end - start) / <T as Scalar>::from_usize(count - 1);
        let mut points: Vec<T> = (0..count)
            .map(|i| start + <T as Scalar>::from_usize(i) * step)
            .collect();
        // Pin the endpoint so rounding never overshoots the interval.
        points[count - 1] = end;

        Self::new(points)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a grid holds at least one point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First time point.
    pub fn start(&self) -> T {
        self.points[0]
    }

    /// Last time point.
    pub fn end(&self) -> T {
        self.points[self.points.len() - 1]
    }

    /// Step size `h = t[1] - t[0]`, or `None` for a single-point grid.
    pub fn step_size(&self) -> Option<T> {
        match self.points.as_slice() {
            [t0, t1, ..] => Some(*t1 - *t0),
            _ => None,
        }
    }

    /// Number of steps (`len() - 1`).
    pub fn steps(&self) -> usize {
        self.points.len() - 1
    }

    /// Grid points as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.points
    }

    /// Iterates over the grid points.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.points.iter()
    }

    /// Consumes the grid and returns its points.
    pub fn into_vec(self) -> Vec<T> {
        self.points
    }

    /// Returns true if every step matches the first one within `tolerance`.
    pub fn is_uniform(&self, tolerance: T) -> bool {
        self.check_uniform(tolerance).is_ok()
    }

    fn check_uniform(&self, tolerance: T) -> GridResult<()> {
        let Some(h) = self.step_size() else {
            return Ok(());
        };
        let bound = tolerance * h.abs();
        for (i, w) in self.points.windows(2).enumerate().skip(1) {
            let step = w[1] - w[0];
            if (step - h).abs() > bound {
                return Err(GridError::non_uniform(
                    i,
                    Scalar::to_f64(h),
                    Scalar::to_f64(step),
                ));
            }
        }
        Ok(())
    }
}

impl<T: Scalar> Index<usize> for TimeGrid<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.points[index]
    }
}

impl<T: Scalar> AsRef<[T]> for TimeGrid<T> {
    fn as_ref(&self) -> &[T] {
        &self.points
    }
}

impl<T: Scalar> TryFrom<Vec<T>> for TimeGrid<T> {
    type Error = GridError;

    fn try_from(points: Vec<T>) -> GridResult<Self> {
        Self::new(points)
    }
}

/// Evenly spaced grid of `count` points from `start` to `end` inclusive.
///
/// Shorthand for [`TimeGrid::linspace`].
pub fn linspace<T: Scalar>(start: T, end: T, count: usize) -> GridResult<TimeGrid<T>> {
    TimeGrid::linspace(start, end, count)
}
