//! State trajectories produced by the steppers.

use crate::types::Scalar;
use approx::{AbsDiffEq, RelativeEq};
use std::ops::Index;

/// Approximate solution values aligned one-to-one with a time grid.
///
/// `values[0]` is always the initial condition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory<T: Scalar> {
    values: Vec<T>,
}

impl<T: Scalar> Trajectory<T> {
    /// Wraps computed values.
    pub fn from_values(values: Vec<T>) -> Self {
        Self { values }
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the trajectory holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The initial value, if any.
    pub fn initial(&self) -> Option<T> {
        self.values.first().copied()
    }

    /// The value at the last grid point, if any.
    pub fn last(&self) -> Option<T> {
        self.values.last().copied()
    }

    /// Values as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Iterates over the values.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.values.iter()
    }

    /// Consumes the trajectory and returns its values.
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    /// Returns true if every value is finite.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Index of the first NaN or infinite value.
    pub fn first_non_finite(&self) -> Option<usize> {
        crate::numerical::stability::first_non_finite(&self.values)
    }
}

impl<T: Scalar> Index<usize> for Trajectory<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}

impl<T: Scalar> AsRef<[T]> for Trajectory<T> {
    fn as_ref(&self) -> &[T] {
        &self.values
    }
}

impl<T: Scalar> From<Trajectory<T>> for Vec<T> {
    fn from(trajectory: Trajectory<T>) -> Self {
        trajectory.values
    }
}

impl<T: Scalar> IntoIterator for Trajectory<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<T> AbsDiffEq for Trajectory<T>
where
    T: Scalar + AbsDiffEq<Epsilon = T>,
{
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T> RelativeEq for Trajectory<T>
where
    T: Scalar + RelativeEq<Epsilon = T>,
{
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
