//! Configuration for the comparison and convergence drivers.

use crate::error::ConfigError;
use rkstep_core::{grid::MAX_GRID_POINTS, types::Scalar};
use rkstep_methods::Method;

/// Settings for a side-by-side comparison run.
///
/// Every method in `methods` is integrated once per entry of `resolutions`
/// (number of grid points over `[start, end]`). Curve `i` of each figure is
/// drawn with `styles[i % styles.len()]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonConfig<T> {
    /// Initial state x0
    pub initial: T,
    /// First grid time
    pub start: T,
    /// Last grid time
    pub end: T,
    /// Grid point counts, one curve each
    pub resolutions: Vec<usize>,
    /// Line styles handed to the plot sink
    pub styles: Vec<String>,
    /// Methods to run, one figure each
    pub methods: Vec<Method>,
}

impl<T: Scalar> Default for ComparisonConfig<T> {
    fn default() -> Self {
        Self {
            initial: T::zero(),
            start: T::zero(),
            end: <T as Scalar>::from_f64(10.0),
            resolutions: vec![20, 100],
            styles: vec!["r".to_string(), "b".to_string()],
            methods: Method::ALL.to_vec(),
        }
    }
}

impl<T: Scalar> ComparisonConfig<T> {
    /// Creates the default comparison: 20 and 100 points on [0, 10], x0 = 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial state.
    pub fn with_initial(mut self, initial: T) -> Self {
        self.initial = initial;
        self
    }

    /// Sets the time interval.
    pub fn with_interval(mut self, start: T, end: T) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Sets the grid point counts.
    pub fn with_resolutions(mut self, resolutions: Vec<usize>) -> Self {
        self.resolutions = resolutions;
        self
    }

    /// Sets the line styles.
    pub fn with_styles<S: Into<String>>(mut self, styles: impl IntoIterator<Item = S>) -> Self {
        self.styles = styles.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the methods to compare.
    pub fn with_methods(mut self, methods: Vec<Method>) -> Self {
        self.methods = methods;
        self
    }

    /// Style of the `index`-th curve in a figure.
    pub fn style(&self, index: usize) -> &str {
        if self.styles.is_empty() {
            ""
        } else {
            &self.styles[index % self.styles.len()]
        }
    }

    /// Checks the configuration before any integration runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_interval(self.start, self.end)?;
        if !self.initial.is_finite() {
            return Err(ConfigError::new(
                "initial state must be finite",
                "initial",
                self.initial,
            ));
        }
        if self.methods.is_empty() {
            return Err(ConfigError::new("at least one method is required", "methods", "[]"));
        }
        if self.resolutions.is_empty() {
            return Err(ConfigError::new(
                "at least one resolution is required",
                "resolutions",
                "[]",
            ));
        }
        for (i, &points) in self.resolutions.iter().enumerate() {
            if points < 2 {
                return Err(ConfigError::new(
                    "must be at least 2",
                    format!("resolutions[{}]", i),
                    points,
                ));
            }
            if points > MAX_GRID_POINTS {
                return Err(ConfigError::new(
                    format!("must not exceed {}", MAX_GRID_POINTS),
                    format!("resolutions[{}]", i),
                    points,
                ));
            }
        }
        Ok(())
    }
}

/// Settings for a convergence study.
///
/// Level `k` (0-based) uses `base_steps * 2^k` steps over `[start, end]`,
/// for `refinements` levels. Without an analytic solution the reference is
/// an RK4 run with `reference_factor` times the finest step count.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceConfig<T> {
    /// Initial state x0
    pub initial: T,
    /// First grid time
    pub start: T,
    /// Last grid time
    pub end: T,
    /// Number of steps at the coarsest level
    pub base_steps: usize,
    /// Number of levels
    pub refinements: usize,
    /// Reference steps per finest-level step
    pub reference_factor: usize,
    /// Methods to study
    pub methods: Vec<Method>,
}

impl<T: Scalar> Default for ConvergenceConfig<T> {
    fn default() -> Self {
        Self {
            initial: T::zero(),
            start: T::zero(),
            end: <T as Scalar>::from_f64(2.0),
            base_steps: 20,
            refinements: 4,
            reference_factor: 16,
            methods: Method::ALL.to_vec(),
        }
    }
}

impl<T: Scalar> ConvergenceConfig<T> {
    /// Creates the default study: 20, 40, 80 and 160 steps on [0, 2], x0 = 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial state.
    pub fn with_initial(mut self, initial: T) -> Self {
        self.initial = initial;
        self
    }

    /// Sets the time interval.
    pub fn with_interval(mut self, start: T, end: T) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Sets the coarsest step count.
    pub fn with_base_steps(mut self, base_steps: usize) -> Self {
        self.base_steps = base_steps;
        self
    }

    /// Sets the number of levels.
    pub fn with_refinements(mut self, refinements: usize) -> Self {
        self.refinements = refinements;
        self
    }

    /// Sets the reference resolution relative to the finest level.
    pub fn with_reference_factor(mut self, reference_factor: usize) -> Self {
        self.reference_factor = reference_factor;
        self
    }

    /// Sets the methods to study.
    pub fn with_methods(mut self, methods: Vec<Method>) -> Self {
        self.methods = methods;
        self
    }

    /// Step counts of every level, coarsest first.
    pub fn step_counts(&self) -> Vec<usize> {
        (0..self.refinements).map(|k| self.base_steps << k).collect()
    }

    /// Step count of the numerical reference.
    pub fn reference_steps(&self) -> usize {
        (self.base_steps << self.refinements.saturating_sub(1)) * self.reference_factor
    }

    /// Checks the configuration before any integration runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_interval(self.start, self.end)?;
        if !self.initial.is_finite() {
            return Err(ConfigError::new(
                "initial state must be finite",
                "initial",
                self.initial,
            ));
        }
        if self.methods.is_empty() {
            return Err(ConfigError::new("at least one method is required", "methods", "[]"));
        }
        if self.base_steps == 0 {
            return Err(ConfigError::new("must be positive", "base_steps", 0));
        }
        if self.base_steps > MAX_REFERENCE_STEPS {
            return Err(ConfigError::new(
                format!("must not exceed {}", MAX_REFERENCE_STEPS),
                "base_steps",
                self.base_steps,
            ));
        }
        if self.refinements < 2 {
            return Err(ConfigError::new(
                "at least two levels are needed to observe an order",
                "refinements",
                self.refinements,
            ));
        }
        if self.reference_factor < 2 {
            return Err(ConfigError::new(
                "reference must be finer than the finest level",
                "reference_factor",
                self.reference_factor,
            ));
        }
        // The reference grid is materialised in full.
        let finest = (1..self.refinements)
            .try_fold(self.base_steps, |steps, _| steps.checked_mul(2))
            .filter(|&steps| steps <= MAX_REFERENCE_STEPS);
        let Some(finest) = finest else {
            return Err(ConfigError::new(
                format!(
                    "finest level of {} base steps exceeds {} steps",
                    self.base_steps, MAX_REFERENCE_STEPS
                ),
                "refinements",
                self.refinements,
            ));
        };
        match finest.checked_mul(self.reference_factor) {
            Some(steps) if steps <= MAX_REFERENCE_STEPS => Ok(()),
            _ => Err(ConfigError::new(
                format!("reference grid exceeds {} steps", MAX_REFERENCE_STEPS),
                "reference_factor",
                self.reference_factor,
            )),
        }
    }
}

/// Largest reference grid a study will allocate.
pub const MAX_REFERENCE_STEPS: usize = 1 << 26;

fn validate_interval<T: Scalar>(start: T, end: T) -> Result<(), ConfigError> {
    if !start.is_finite() {
        return Err(ConfigError::new("must be finite", "start", start));
    }
    if !end.is_finite() {
        return Err(ConfigError::new("must be finite", "end", end));
    }
    if end <= start {
        return Err(ConfigError::new("must be greater than start", "end", end));
    }
    Ok(())
}
