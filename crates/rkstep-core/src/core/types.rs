//! Scalar types and numerical constants for ODE integration.
//!
//! Every stepper in the workspace is generic over [`Scalar`], which is
//! implemented for `f32` and `f64`.

use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used as state and time (f32 or f64).
///
/// This trait combines the numeric traits needed by the steppers and the
/// grid utilities.
pub trait Scalar:
    Float + FromPrimitive + Display + Debug + Default + Copy + Send + Sync + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Default tolerance for comparing trajectories.
    const DEFAULT_TOLERANCE: Self;

    /// Relative tolerance used when checking grid uniformity.
    const UNIFORMITY_TOLERANCE: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_from_f64` for a non-panicking version.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Try to convert from f64.
    fn try_from_f64(v: f64) -> Option<Self> {
        <Self as FromPrimitive>::from_f64(v)
    }

    /// Convert to f64 (for logging/display).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_to_f64` for a non-panicking version.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).expect("Failed to convert to f64")
    }

    /// Try to convert to f64.
    fn try_to_f64(self) -> Option<f64> {
        num_traits::cast(self)
    }

    /// Convert from usize (for step counts).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_from_usize` for a non-panicking version.
    fn from_usize(v: usize) -> Self {
        <Self as FromPrimitive>::from_usize(v).expect("Failed to convert from usize")
    }

    /// Try to convert from usize.
    fn try_from_usize(v: usize) -> Option<Self> {
        <Self as FromPrimitive>::from_usize(v)
    }

    /// Half of the value, used for mid-step stages.
    fn half(self) -> Self {
        self / (Self::one() + Self::one())
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const DEFAULT_TOLERANCE: Self = 1e-5;
    const UNIFORMITY_TOLERANCE: Self = 1e-4;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const DEFAULT_TOLERANCE: Self = 1e-10;
    const UNIFORMITY_TOLERANCE: Self = 1e-9;
}

/// Numerical constants used across the workspace.
pub mod constants {
    use super::Scalar;

    /// The constant 2 in the target precision.
    pub fn two<T: Scalar>() -> T {
        T::one() + T::one()
    }

    /// The constant 6 in the target precision.
    pub fn six<T: Scalar>() -> T {
        <T as Scalar>::from_f64(6.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(<f64 as Scalar>::from_f64(1.5), 1.5);
        assert_eq!(<f32 as Scalar>::from_f64(1.5), 1.5f32);
        assert_eq!(<f64 as Scalar>::from_usize(20), 20.0);
        assert_eq!(Scalar::to_f64(2.5f32), 2.5);
        assert_eq!(<f64 as Scalar>::try_from_usize(7), Some(7.0));
    }

    #[test]
    fn test_half_and_constants() {
        assert_eq!(Scalar::half(3.0f64), 1.5);
        assert_eq!(constants::two::<f64>(), 2.0);
        assert_eq!(constants::six::<f32>(), 6.0);
    }

    #[test]
    fn test_tolerances_are_ordered() {
        assert!(<f64 as Scalar>::DEFAULT_TOLERANCE < <f32 as Scalar>::DEFAULT_TOLERANCE as f64);
        assert!(<f64 as Scalar>::EPSILON < <f64 as Scalar>::UNIFORMITY_TOLERANCE);
    }
}
