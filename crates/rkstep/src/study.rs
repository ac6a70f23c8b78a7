//! Comparison and convergence drivers.
//!
//! [`run_comparison`] integrates one problem with every configured method at
//! several resolutions and hands each curve to a [`PlotSink`].
//!
//! [`convergence_study`] measures how the global error shrinks as the step
//! count doubles. Level k uses `base_steps * 2^k` steps; every level grid is
//! a subset of the reference grid, so errors are measured exactly at shared
//! time points without interpolation.

use crate::config::{ComparisonConfig, ConvergenceConfig};
use crate::error::StudyError;
use crate::output::PlotSink;
use log::{debug, info, trace, warn};
use rkstep_core::{
    derivative::Derivative,
    error::GridResult,
    grid::{linspace, TimeGrid},
    numerical::{
        endpoint_error, first_non_finite, fit_order, observed_orders, strided_max_error, OrderFit,
    },
    trajectory::Trajectory,
    types::{constants, Scalar},
};
use rkstep_methods::Method;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Allowed shortfall of a fitted order before a warning is logged.
const ORDER_SLACK: f64 = 0.5;

/// One integration of a comparison run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComparisonRun<T: Scalar> {
    /// Method that produced the curve
    pub method: Method,
    /// Style the curve was plotted with
    pub style: String,
    /// Grid the method ran on
    pub grid: TimeGrid<T>,
    /// Computed values, one per grid point
    pub trajectory: Trajectory<T>,
}

impl<T: Scalar> ComparisonRun<T> {
    /// Number of grid points.
    pub fn points(&self) -> usize {
        self.grid.len()
    }
}

/// Every curve produced by [`run_comparison`], in plotting order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComparisonReport<T: Scalar> {
    /// Runs grouped by method, then by resolution
    pub runs: Vec<ComparisonRun<T>>,
}

impl<T: Scalar> ComparisonReport<T> {
    /// The run of `method` on a grid of `points` points.
    pub fn get(&self, method: Method, points: usize) -> Option<&ComparisonRun<T>> {
        self.runs
            .iter()
            .find(|run| run.method == method && run.points() == points)
    }

    /// Runs whose trajectory contains a non-finite value.
    pub fn non_finite(&self) -> impl Iterator<Item = &ComparisonRun<T>> + '_ {
        self.runs.iter().filter(|run| !run.trajectory.is_finite())
    }
}

/// Integrates `f` with every configured method and resolution.
///
/// Each method gets its own figure titled with [`Method::name`]; each
/// resolution adds a curve labelled `N=<points>` drawn with the matching
/// style. Non-finite trajectories are plotted and reported, not rejected.
///
/// # Errors
///
/// - [`StudyError::InvalidConfiguration`] if the configuration is invalid;
///   nothing is integrated or plotted in that case
/// - [`StudyError::Derivative`] with the first error raised by `f`
/// - [`StudyError::Output`] if the sink fails
///
/// # Example
///
/// ```
/// use rkstep::prelude::*;
///
/// let mut sink = RecordingSink::new();
/// let report = run_comparison(&CubicSine, &ComparisonConfig::<f64>::default(), &mut sink).unwrap();
///
/// assert_eq!(sink.figures.len(), 3);
/// assert_eq!(report.runs.len(), 6);
/// assert_eq!(report.get(Method::Rk4, 100).unwrap().trajectory.len(), 100);
/// ```
pub fn run_comparison<T, D, S>(
    f: &D,
    config: &ComparisonConfig<T>,
    sink: &mut S,
) -> Result<ComparisonReport<T>, StudyError<D::Error>>
where
    T: Scalar,
    D: Derivative<T>,
    S: PlotSink<T> + ?Sized,
{
    config.validate()?;

    let grids = config
        .resolutions
        .iter()
        .map(|&points| linspace(config.start, config.end, points))
        .collect::<Result<Vec<_>, _>>()?;

    let mut runs = Vec::with_capacity(config.methods.len() * grids.len());
    for &method in &config.methods {
        sink.begin_figure(method.name())?;
        for (i, grid) in grids.iter().enumerate() {
            let trajectory = method
                .integrate(f, config.initial, grid)
                .map_err(StudyError::Derivative)?;

            if let Some(index) = trajectory.first_non_finite() {
                warn!(
                    "{} with {} points became non-finite at t = {}",
                    method,
                    grid.len(),
                    grid[index]
                );
            }

            let style = config.style(i);
            sink.plot(
                &format!("N={}", grid.len()),
                grid.as_slice(),
                trajectory.as_slice(),
                style,
            )?;
            runs.push(ComparisonRun {
                method,
                style: style.to_string(),
                grid: grid.clone(),
                trajectory,
            });
        }
        sink.show()?;
    }

    info!(
        "Comparison finished: {} methods x {} resolutions",
        config.methods.len(),
        grids.len()
    );
    Ok(ComparisonReport { runs })
}

/// Where the errors of a convergence study are measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferenceKind {
    /// Exact solution supplied by the caller
    Analytic,
    /// Classical RK4 on a finer grid
    Numerical {
        /// Step count of the reference grid
        steps: usize,
    },
}

/// Errors of one method at one step count.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceLevel<T> {
    /// Number of steps
    pub steps: usize,
    /// Step size h = (end - start) / steps
    pub step_size: T,
    /// |x_N - x(end)|
    pub endpoint_error: T,
    /// Largest error over the grid points
    pub max_error: T,
}

/// Convergence behaviour of one method.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodConvergence<T> {
    /// Method under study
    pub method: Method,
    /// Coarsest first
    pub levels: Vec<ConvergenceLevel<T>>,
    /// log2(e_k / e_{k+1}) of consecutive endpoint errors
    pub observed_orders: Vec<T>,
    /// Least-squares fit over all levels; `None` when an error is zero or
    /// non-finite
    pub fit: Option<OrderFit<T>>,
}

impl<T: Scalar> MethodConvergence<T> {
    fn from_levels(method: Method, levels: Vec<ConvergenceLevel<T>>) -> Self {
        let errors: Vec<T> = levels.iter().map(|level| level.endpoint_error).collect();
        let step_sizes: Vec<T> = levels.iter().map(|level| level.step_size).collect();

        let observed_orders = observed_orders(&errors, constants::two());
        let fit = match fit_order(&step_sizes, &errors) {
            Ok(fit) => Some(fit),
            Err(err) => {
                warn!("{}: no order fit ({})", method, err);
                None
            }
        };

        if let Some(fit) = &fit {
            let expected = f64::from(method.order());
            if Scalar::to_f64(fit.order) < expected - ORDER_SLACK {
                warn!(
                    "{}: observed order {:.3} is below the expected {}",
                    method, fit.order, expected
                );
            } else {
                info!(
                    "{}: observed order {:.3} (R² = {:.4})",
                    method, fit.order, fit.r_squared
                );
            }
        }

        Self {
            method,
            levels,
            observed_orders,
            fit,
        }
    }

    /// Endpoint errors, coarsest first.
    pub fn errors(&self) -> Vec<T> {
        self.levels.iter().map(|level| level.endpoint_error).collect()
    }

    /// Maximum grid errors, coarsest first.
    pub fn max_errors(&self) -> Vec<T> {
        self.levels.iter().map(|level| level.max_error).collect()
    }

    /// Whether the fitted order is within `slack` of the method's order.
    pub fn achieves_order(&self, slack: T) -> bool {
        let expected = <T as Scalar>::from_f64(f64::from(self.method.order()));
        self.fit
            .as_ref()
            .map_or(false, |fit| fit.order >= expected - slack)
    }
}

/// Result of a convergence study.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceReport<T> {
    /// What the errors were measured against
    pub reference: ReferenceKind,
    /// One entry per configured method, in configuration order
    pub methods: Vec<MethodConvergence<T>>,
}

impl<T: Scalar> ConvergenceReport<T> {
    /// Results for `method`, if it was studied.
    pub fn get(&self, method: Method) -> Option<&MethodConvergence<T>> {
        self.methods.iter().find(|m| m.method == method)
    }
}

/// Reference values on the finest grid shared by every level.
struct Reference<T> {
    kind: ReferenceKind,
    steps: usize,
    values: Vec<T>,
}

impl<T: Scalar> Reference<T> {
    fn numerical<D: Derivative<T>>(
        f: &D,
        config: &ConvergenceConfig<T>,
    ) -> Result<Self, StudyError<D::Error>> {
        let steps = config.reference_steps();
        debug!("Computing RK4 reference with {} steps", steps);

        let grid = linspace(config.start, config.end, steps + 1)?;
        let values = Method::Rk4
            .integrate(f, config.initial, &grid)
            .map_err(StudyError::Derivative)?
            .into_vec();

        if let Some(index) = first_non_finite(&values) {
            warn!("Reference solution became non-finite at t = {}", grid[index]);
        }
        Ok(Self {
            kind: ReferenceKind::Numerical { steps },
            steps,
            values,
        })
    }

    fn analytic<X: Fn(T) -> T>(exact: &X, config: &ConvergenceConfig<T>) -> GridResult<Self> {
        let steps = config.step_counts().last().copied().unwrap_or(config.base_steps);
        let grid = linspace(config.start, config.end, steps + 1)?;
        Ok(Self {
            kind: ReferenceKind::Analytic,
            steps,
            values: grid.iter().map(|&t| exact(t)).collect(),
        })
    }

    fn endpoint(&self) -> T {
        self.values.last().copied().unwrap_or_else(T::nan)
    }
}

fn measure_level<T, D>(
    method: Method,
    f: &D,
    config: &ConvergenceConfig<T>,
    steps: usize,
    reference: &Reference<T>,
) -> Result<ConvergenceLevel<T>, StudyError<D::Error>>
where
    T: Scalar,
    D: Derivative<T>,
{
    let grid = linspace(config.start, config.end, steps + 1)?;
    let trajectory = method
        .integrate(f, config.initial, &grid)
        .map_err(StudyError::Derivative)?;

    let level = ConvergenceLevel {
        steps,
        step_size: (config.end - config.start) / <T as Scalar>::from_usize(steps),
        endpoint_error: endpoint_error(trajectory.as_slice(), reference.endpoint())?,
        max_error: strided_max_error(
            trajectory.as_slice(),
            &reference.values,
            reference.steps / steps,
        )?,
    };
    trace!(
        "{}: {} steps, endpoint error {:e}, max error {:e}",
        method,
        steps,
        Scalar::to_f64(level.endpoint_error),
        Scalar::to_f64(level.max_error)
    );
    Ok(level)
}

fn study<T, D>(
    f: &D,
    config: &ConvergenceConfig<T>,
    reference: Reference<T>,
) -> Result<ConvergenceReport<T>, StudyError<D::Error>>
where
    T: Scalar,
    D: Derivative<T>,
{
    let step_counts = config.step_counts();
    let mut methods = Vec::with_capacity(config.methods.len());
    for &method in &config.methods {
        let levels = step_counts
            .iter()
            .map(|&steps| measure_level(method, f, config, steps, &reference))
            .collect::<Result<Vec<_>, _>>()?;
        methods.push(MethodConvergence::from_levels(method, levels));
    }
    Ok(ConvergenceReport {
        reference: reference.kind,
        methods,
    })
}

/// Measures the convergence of every configured method against a fine
/// RK4 reference.
///
/// # Errors
///
/// - [`StudyError::InvalidConfiguration`] if the configuration is invalid
/// - [`StudyError::Derivative`] with the first error raised by `f`
///
/// # Example
///
/// ```
/// use rkstep::prelude::*;
///
/// let report = convergence_study(&CubicSine, &ConvergenceConfig::<f64>::default()).unwrap();
/// let euler = report.get(Method::Euler).unwrap();
///
/// assert_eq!(euler.levels.len(), 4);
/// assert!(euler.achieves_order(0.3));
/// ```
pub fn convergence_study<T, D>(
    f: &D,
    config: &ConvergenceConfig<T>,
) -> Result<ConvergenceReport<T>, StudyError<D::Error>>
where
    T: Scalar,
    D: Derivative<T>,
{
    config.validate()?;
    info!(
        "Convergence study: {} levels from {} steps",
        config.refinements, config.base_steps
    );
    let reference = Reference::numerical(f, config)?;
    study(f, config, reference)
}

/// Measures convergence against the exact solution `exact(t)`.
///
/// `exact` must satisfy `exact(config.start) == config.initial`.
pub fn convergence_study_against<T, D, X>(
    f: &D,
    exact: X,
    config: &ConvergenceConfig<T>,
) -> Result<ConvergenceReport<T>, StudyError<D::Error>>
where
    T: Scalar,
    D: Derivative<T>,
    X: Fn(T) -> T,
{
    config.validate()?;
    info!(
        "Convergence study against exact solution: {} levels from {} steps",
        config.refinements, config.base_steps
    );
    let reference = Reference::analytic(&exact, config)?;
    study(f, config, reference)
}

/// Parallel [`convergence_study`]: levels of every method run on the rayon
/// pool.
#[cfg(feature = "parallel")]
pub fn par_convergence_study<T, D>(
    f: &D,
    config: &ConvergenceConfig<T>,
) -> Result<ConvergenceReport<T>, StudyError<D::Error>>
where
    T: Scalar,
    D: Derivative<T> + Sync,
    D::Error: Send,
{
    config.validate()?;
    let reference = Reference::numerical(f, config)?;
    let step_counts = config.step_counts();

    let methods = config
        .methods
        .par_iter()
        .map(|&method| -> Result<_, StudyError<D::Error>> {
            let levels = step_counts
                .par_iter()
                .map(|&steps| measure_level(method, f, config, steps, &reference))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(MethodConvergence::from_levels(method, levels))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ConvergenceReport {
        reference: reference.kind,
        methods,
    })
}
