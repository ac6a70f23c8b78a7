//! Global error measurement and order-of-accuracy estimation.
//!
//! A method of order p has global error e(h) ≈ C·hᵖ. Halving the step size
//! therefore divides the error by 2ᵖ, and the order can be recovered from
//! two runs as
//!
//! ```text
//! p ≈ ln(e(h) / e(h/r)) / ln(r)
//! ```
//!
//! or from several runs by a least-squares fit of ln e against ln h.

use crate::{
    error::{AnalysisError, AnalysisResult},
    numerical::stability::max_abs,
    types::Scalar,
};
use num_traits::Float;

/// Result of a least-squares order fit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderFit<T> {
    /// Estimated order of accuracy (slope of ln e against ln h)
    pub order: T,
    /// R-squared value for the linear fit
    pub r_squared: T,
}

/// Maximum pointwise difference between two aligned sequences.
///
/// A NaN on either side makes the result NaN.
///
/// # Errors
///
/// Returns [`AnalysisError::LengthMismatch`] if the lengths differ.
pub fn max_abs_error<T: Scalar>(approx: &[T], reference: &[T]) -> AnalysisResult<T> {
    if approx.len() != reference.len() {
        return Err(AnalysisError::length_mismatch(reference.len(), approx.len()));
    }
    Ok(max_abs(approx.iter().zip(reference).map(|(a, r)| *a - *r)))
}

/// Maximum difference between `approx` and every `stride`-th value of a
/// finer `reference`.
///
/// If `approx` was computed with n steps and `reference` with n·stride steps
/// over the same interval, `approx[i]` and `reference[i·stride]` share a
/// time point. A NaN at any shared point makes the result NaN.
///
/// # Errors
///
/// Returns [`AnalysisError::LengthMismatch`] unless
/// `reference.len() == (approx.len() - 1) * stride + 1`.
pub fn strided_max_error<T: Scalar>(
    approx: &[T],
    reference: &[T],
    stride: usize,
) -> AnalysisResult<T> {
    if approx.is_empty() || stride == 0 {
        return Err(AnalysisError::InsufficientData {
            needed: 1,
            actual: 0,
        });
    }
    let expected = (approx.len() - 1) * stride + 1;
    if reference.len() != expected {
        return Err(AnalysisError::length_mismatch(expected, reference.len()));
    }
    Ok(max_abs(
        approx
            .iter()
            .zip(reference.iter().step_by(stride))
            .map(|(a, r)| *a - *r),
    ))
}

/// Absolute difference between the last value of `approx` and `exact`.
///
/// # Errors
///
/// Returns [`AnalysisError::InsufficientData`] if `approx` is empty.
pub fn endpoint_error<T: Scalar>(approx: &[T], exact: T) -> AnalysisResult<T> {
    approx
        .last()
        .map(|last| (*last - exact).abs())
        .ok_or(AnalysisError::InsufficientData {
            needed: 1,
            actual: 0,
        })
}

/// Order observed between two runs whose step sizes differ by `ratio`.
///
/// `coarse_error` belongs to the larger step.
pub fn observed_order<T: Scalar>(coarse_error: T, fine_error: T, ratio: T) -> T {
    Float::ln(coarse_error / fine_error) / Float::ln(ratio)
}

/// Orders observed between consecutive errors of a refinement sequence.
///
/// Returns one value fewer than `errors`.
pub fn observed_orders<T: Scalar>(errors: &[T], ratio: T) -> Vec<T> {
    errors
        .windows(2)
        .map(|w| observed_order(w[0], w[1], ratio))
        .collect()
}

/// Fits ln e = p·ln h + c by least squares and returns p.
///
/// # Errors
///
/// - [`AnalysisError::LengthMismatch`] if the slices differ in length
/// - [`AnalysisError::InsufficientData`] with fewer than two samples
/// - [`AnalysisError::NonPositive`] if a step size or error is not a
///   positive finite number
pub fn fit_order<T: Scalar>(step_sizes: &[T], errors: &[T]) -> AnalysisResult<OrderFit<T>> {
    if step_sizes.len() != errors.len() {
        return Err(AnalysisError::length_mismatch(step_sizes.len(), errors.len()));
    }
    if step_sizes.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            needed: 2,
            actual: step_sizes.len(),
        });
    }
    for (index, value) in step_sizes.iter().chain(errors).enumerate() {
        if !(value.is_finite() && *value > T::zero()) {
            return Err(AnalysisError::NonPositive {
                index: index % step_sizes.len(),
                value: Scalar::to_f64(*value),
            });
        }
    }

    let n = <T as Scalar>::from_usize(step_sizes.len());

    let log_h: Vec<T> = step_sizes.iter().map(|h| Float::ln(*h)).collect();
    let log_e: Vec<T> = errors.iter().map(|e| Float::ln(*e)).collect();

    let mean_log_h = log_h.iter().fold(T::zero(), |acc, &x| acc + x) / n;
    let mean_log_e = log_e.iter().fold(T::zero(), |acc, &x| acc + x) / n;

    let mut num = T::zero();
    let mut den = T::zero();
    for (&lh, &le) in log_h.iter().zip(&log_e) {
        let dh = lh - mean_log_h;
        num = num + dh * (le - mean_log_e);
        den = den + dh * dh;
    }

    let order = if den > T::EPSILON { num / den } else { T::zero() };

    let mut ss_tot = T::zero();
    let mut ss_res = T::zero();
    for (&lh, &le) in log_h.iter().zip(&log_e) {
        let predicted = mean_log_e + order * (lh - mean_log_h);
        ss_res = ss_res + (le - predicted) * (le - predicted);
        ss_tot = ss_tot + (le - mean_log_e) * (le - mean_log_e);
    }

    let r_squared = if ss_tot > T::EPSILON {
        T::one() - ss_res / ss_tot
    } else {
        T::zero()
    };

    Ok(OrderFit { order, r_squared })
}
