//! Compares Euler, RK2 and RK4 on dx/dt = -x³ + sin t.
//!
//! Writes every curve of the default comparison (20 and 100 points over
//! [0, 10], x0 = 0) as CSV, then prints a convergence table.
//!
//! ```text
//! cargo run --example cubic_sine                 # CSV to stdout
//! cargo run --example cubic_sine -- curves.csv   # CSV to a file
//! RUST_LOG=debug cargo run --example cubic_sine
//! ```

use rkstep::prelude::*;
use std::error::Error;
use std::io;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let comparison = ComparisonConfig::<f64>::default();
    let report = match std::env::args().nth(1) {
        Some(path) => {
            let mut sink = CsvSink::create(&path)?;
            let report = run_comparison(&CubicSine, &comparison, &mut sink)?;
            eprintln!("Curves written to {}", path);
            report
        }
        None => {
            let mut sink = CsvSink::new(io::stdout().lock())?;
            run_comparison(&CubicSine, &comparison, &mut sink)?
        }
    };

    eprintln!();
    eprintln!("{:<16} {:>8} {:>14}", "method", "points", "x(10)");
    for run in &report.runs {
        eprintln!(
            "{:<16} {:>8} {:>14.8}",
            run.method.name(),
            run.points(),
            run.trajectory.last().unwrap_or(f64::NAN)
        );
    }

    let convergence = ConvergenceConfig::<f64>::default();
    let study = convergence_study(&CubicSine, &convergence)?;

    eprintln!();
    eprintln!(
        "Convergence on [{}, {}] against RK4 with {} steps",
        convergence.start,
        convergence.end,
        convergence.reference_steps()
    );
    for result in &study.methods {
        eprintln!("{} (order {})", result.method, result.method.order());
        eprintln!("  {:>8} {:>14} {:>10}", "steps", "error", "order");
        for (k, level) in result.levels.iter().enumerate() {
            let order = k
                .checked_sub(1)
                .and_then(|i| result.observed_orders.get(i))
                .map(|p| format!("{:.3}", p))
                .unwrap_or_default();
            eprintln!("  {:>8} {:>14.4e} {:>10}", level.steps, level.endpoint_error, order);
        }
        if let Some(fit) = &result.fit {
            eprintln!("  fitted order {:.3}, R² = {:.5}", fit.order, fit.r_squared);
        }
    }

    Ok(())
}
