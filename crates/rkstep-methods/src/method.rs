//! Runtime selection among the available steppers.

use crate::{ClassicalRk4, Euler, Midpoint};
use rkstep_core::{
    derivative::Derivative, grid::TimeGrid, integrator::Integrator, trajectory::Trajectory,
    types::Scalar,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Integration method chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Method {
    /// Forward Euler, first order
    Euler,
    /// Midpoint Runge-Kutta, second order
    Rk2,
    /// Classical Runge-Kutta, fourth order
    Rk4,
}

impl Method {
    /// All methods, from lowest to highest order.
    pub const ALL: [Method; 3] = [Method::Euler, Method::Rk2, Method::Rk4];

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Euler => "Euler",
            Self::Rk2 => "RK2 (midpoint)",
            Self::Rk4 => "RK4",
        }
    }

    /// Short identifier, as accepted by [`FromStr`].
    pub fn id(self) -> &'static str {
        match self {
            Self::Euler => "euler",
            Self::Rk2 => "rk2",
            Self::Rk4 => "rk4",
        }
    }

    /// Global order of accuracy.
    pub fn order(self) -> u32 {
        match self {
            Self::Euler => 1,
            Self::Rk2 => 2,
            Self::Rk4 => 4,
        }
    }

    /// Derivative evaluations per step.
    pub fn stages(self) -> usize {
        match self {
            Self::Euler => 1,
            Self::Rk2 => 2,
            Self::Rk4 => 4,
        }
    }

    /// Integrates `f` from `initial` over `grid` with this method.
    ///
    /// # Errors
    ///
    /// Returns the derivative function's first error unchanged.
    pub fn integrate<T, D>(
        self,
        f: &D,
        initial: T,
        grid: &TimeGrid<T>,
    ) -> Result<Trajectory<T>, D::Error>
    where
        T: Scalar,
        D: Derivative<T>,
    {
        match self {
            Self::Euler => Euler.integrate(f, initial, grid),
            Self::Rk2 => Midpoint.integrate(f, initial, grid),
            Self::Rk4 => ClassicalRk4.integrate(f, initial, grid),
        }
    }

    /// Advances one step of size `h` with this method.
    pub fn step<T, D>(self, f: &D, state: T, time: T, h: T) -> Result<T, D::Error>
    where
        T: Scalar,
        D: Derivative<T>,
    {
        match self {
            Self::Euler => Euler.step(f, state, time, h),
            Self::Rk2 => Midpoint.step(f, state, time, h),
            Self::Rk4 => ClassicalRk4.step(f, state, time, h),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown method identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown integration method '{0}' (expected euler, rk2 or rk4)")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euler" => Ok(Self::Euler),
            "rk2" | "midpoint" => Ok(Self::Rk2),
            "rk4" => Ok(Self::Rk4),
            other => Err(UnknownMethod(other.to_string())),
        }
    }
}
