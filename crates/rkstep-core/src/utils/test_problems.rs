//! Reference problems with known behaviour for tests and benchmarks.

#![cfg(any(test, feature = "test-utils"))]

use crate::{derivative::Derivative, types::Scalar};
use std::convert::Infallible;

/// Exponential decay dx/dt = -λx, with exact solution x0·e^(-λ(t - t0)).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDecay<T: Scalar> {
    /// Decay rate λ
    pub rate: T,
}

impl<T: Scalar> ExponentialDecay<T> {
    /// Creates the problem with decay rate `rate`.
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// Exact solution at `time` for the initial value `initial` at `start`.
    pub fn exact(&self, initial: T, start: T, time: T) -> T {
        initial * (-self.rate * (time - start)).exp()
    }
}

impl<T: Scalar> Derivative<T> for ExponentialDecay<T> {
    type Error = Infallible;

    fn evaluate(&self, state: T, _time: T) -> Result<T, Infallible> {
        Ok(-self.rate * state)
    }
}

/// Time-only derivative dx/dt = cos(t), with exact solution x0 + sin(t) - sin(t0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cosine;

impl Cosine {
    /// Exact solution at `time` for the initial value `initial` at `start`.
    pub fn exact<T: Scalar>(&self, initial: T, start: T, time: T) -> T {
        initial + time.sin() - start.sin()
    }
}

impl<T: Scalar> Derivative<T> for Cosine {
    type Error = Infallible;

    fn evaluate(&self, _state: T, time: T) -> Result<T, Infallible> {
        Ok(time.cos())
    }
}

/// Returns 1 until `threshold`, NaN strictly after it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NanAfter<T: Scalar> {
    /// Last time at which the derivative is finite
    pub threshold: T,
}

impl<T: Scalar> Derivative<T> for NanAfter<T> {
    type Error = Infallible;

    fn evaluate(&self, _state: T, time: T) -> Result<T, Infallible> {
        if time > self.threshold {
            Ok(T::nan())
        } else {
            Ok(T::one())
        }
    }
}
