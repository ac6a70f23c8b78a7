//! Derivative function interface.
//!
//! A derivative function is the right-hand side of dx/dt = f(x, t). The
//! steppers may evaluate it several times per step at perturbed points, so
//! implementations must be pure: the same `(state, time)` always yields the
//! same result.
//!
//! Plain closures `Fn(T, T) -> T` implement [`Derivative`] with an
//! infallible error type. Closures that can fail are wrapped in
//! [`Fallible`].

use crate::types::Scalar;
use std::cell::Cell;
use std::convert::Infallible;

/// Right-hand side of a scalar first-order ODE.
pub trait Derivative<T: Scalar> {
    /// Error raised by a failing evaluation.
    type Error: std::error::Error + 'static;

    /// Evaluates f(state, time).
    fn evaluate(&self, state: T, time: T) -> Result<T, Self::Error>;
}

impl<T, F> Derivative<T> for F
where
    T: Scalar,
    F: Fn(T, T) -> T,
{
    type Error = Infallible;

    #[inline]
    fn evaluate(&self, state: T, time: T) -> Result<T, Infallible> {
        Ok(self(state, time))
    }
}

/// Adapter for closures returning `Result<T, E>`.
///
/// # Example
///
/// ```
/// use rkstep_core::derivative::{Derivative, Fallible};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("negative state")]
/// struct Negative;
///
/// let f = Fallible(|x: f64, _t: f64| if x < 0.0 { Err(Negative) } else { Ok(x.sqrt()) });
/// assert_eq!(f.evaluate(4.0, 0.0).unwrap(), 2.0);
/// assert!(f.evaluate(-1.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<T, E, F> Derivative<T> for Fallible<F>
where
    T: Scalar,
    E: std::error::Error + 'static,
    F: Fn(T, T) -> Result<T, E>,
{
    type Error = E;

    #[inline]
    fn evaluate(&self, state: T, time: T) -> Result<T, E> {
        (self.0)(state, time)
    }
}

/// Wrapper that counts evaluations of a derivative function.
///
/// Useful to check how many stage evaluations a method performs.
#[derive(Debug)]
pub struct CountingDerivative<F> {
    /// The underlying derivative function
    pub inner: F,
    count: Cell<usize>,
}

impl<F> CountingDerivative<F> {
    /// Creates a new counting wrapper around a derivative function.
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            count: Cell::new(0),
        }
    }

    /// Returns the number of evaluations so far.
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Resets the counter to zero.
    pub fn reset_count(&self) {
        self.count.set(0);
    }
}

impl<T, F> Derivative<T> for CountingDerivative<F>
where
    T: Scalar,
    F: Derivative<T>,
{
    type Error = F::Error;

    fn evaluate(&self, state: T, time: T) -> Result<T, Self::Error> {
        self.count.set(self.count.get() + 1);
        self.inner.evaluate(state, time)
    }
}

/// A derivative function that ignores its inputs and returns a constant.
///
/// Every method integrates a constant derivative exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantDerivative<T: Scalar>(pub T);

impl<T: Scalar> Derivative<T> for ConstantDerivative<T> {
    type Error = Infallible;

    fn evaluate(&self, _state: T, _time: T) -> Result<T, Infallible> {
        Ok(self.0)
    }
}

/// The cubic-sine test function f(x, t) = -x³ + sin(t).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CubicSine;

impl<T: Scalar> Derivative<T> for CubicSine {
    type Error = Infallible;

    fn evaluate(&self, state: T, time: T) -> Result<T, Infallible> {
        Ok(-(state * state * state) + time.sin())
    }
}
