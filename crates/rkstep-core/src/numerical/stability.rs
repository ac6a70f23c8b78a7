//! Finiteness checks for trajectories.
//!
//! The steppers never inspect their output: a NaN or infinite value
//! produced by the derivative function propagates through every later
//! step. These helpers let callers detect divergence after the fact.

use crate::types::Scalar;

/// Index of the first NaN or infinite value in `values`.
pub fn first_non_finite<T: Scalar>(values: &[T]) -> Option<usize> {
    values.iter().position(|v| !v.is_finite())
}

/// Returns true if every value is finite.
pub fn all_finite<T: Scalar>(values: &[T]) -> bool {
    first_non_finite(values).is_none()
}

/// Largest absolute value in `values`; a NaN anywhere yields NaN.
///
/// An empty input yields zero.
pub fn max_abs<T, I>(values: I) -> T
where
    T: Scalar,
    I: IntoIterator<Item = T>,
{
    values.into_iter().fold(T::zero(), |acc, v| {
        if v.is_nan() || acc.is_nan() {
            T::nan()
        } else {
            acc.max(v.abs())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_non_finite() {
        assert_eq!(first_non_finite(&[0.0, 1.0, 2.0]), None);
        assert_eq!(first_non_finite(&[0.0, f64::NAN, 2.0]), Some(1));
        assert_eq!(first_non_finite(&[f32::NEG_INFINITY]), Some(0));
        assert!(all_finite::<f64>(&[]));
    }

    #[test]
    fn test_max_abs() {
        assert_eq!(max_abs([1.0, -3.0, 2.0]), 3.0);
        assert_eq!(max_abs(Vec::<f64>::new()), 0.0);
        assert!(max_abs([1.0, f64::NAN, 2.0]).is_nan());
        assert!(max_abs([f64::NAN, 5.0]).is_nan());
        assert_eq!(max_abs([1.0f32, f32::NEG_INFINITY]), f32::INFINITY);
    }
}
