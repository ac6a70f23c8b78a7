//! End-to-end comparison runs through the CSV sink.

use pretty_assertions::assert_eq;
use rkstep::prelude::*;
use rkstep_core::test_problems::NanAfter;
use std::io;

fn csv_rows(text: &str) -> Vec<Vec<&str>> {
    text.lines().skip(1).map(|line| line.split(',').collect()).collect()
}

#[test]
fn test_default_comparison_to_csv() {
    let mut sink = CsvSink::new(Vec::new()).unwrap();
    run_comparison(&CubicSine, &ComparisonConfig::<f64>::default(), &mut sink).unwrap();
    let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();

    assert_eq!(text.lines().next(), Some(rkstep::output::CSV_HEADER));

    let rows = csv_rows(&text);
    assert_eq!(rows.len(), 3 * (20 + 100));
    assert!(rows.iter().all(|row| row.len() == 5));

    let per_figure = |name: &str| rows.iter().filter(|row| row[0] == name).count();
    assert_eq!(per_figure("Euler"), 120);
    assert_eq!(per_figure("RK2 (midpoint)"), 120);
    assert_eq!(per_figure("RK4"), 120);

    // Curves start at (t0, x0) and end at t = 10
    let first_rk4 = rows.iter().find(|row| row[0] == "RK4").unwrap();
    assert_eq!(first_rk4[1..], ["N=20", "r", "0", "0"]);
    let last = rows.last().unwrap();
    assert_eq!(last[..4], ["RK4", "N=100", "b", "10"]);
}

#[test]
fn test_euler_trace_matches_known_values() {
    let mut sink = RecordingSink::new();
    let config = ComparisonConfig::<f64>::default()
        .with_resolutions(vec![20])
        .with_methods(vec![Method::Euler]);
    let report = run_comparison(&CubicSine, &config, &mut sink).unwrap();

    let expected = [0.0, 0.0, 0.26439534, 0.71189381, 1.04830651, 0.89488942];
    let values = &sink.figures[0].curves[0].values;
    for (value, expected) in values.iter().zip(expected) {
        assert!((value - expected).abs() < 1e-7, "{} vs {}", value, expected);
    }
    assert_eq!(report.get(Method::Euler, 20).unwrap().style, "r");
}

#[test]
fn test_non_finite_runs_are_reported() {
    let config = ComparisonConfig::<f64>::default()
        .with_resolutions(vec![11])
        .with_methods(vec![Method::Rk4]);
    let mut sink = RecordingSink::new();
    let report = run_comparison(&NanAfter { threshold: 2.5 }, &config, &mut sink).unwrap();

    let flagged: Vec<_> = report.non_finite().map(|run| run.method).collect();
    assert_eq!(flagged, vec![Method::Rk4]);
    assert!(sink.figures[0].curves[0].values[10].is_nan());
}

struct FailingSink;

impl PlotSink<f64> for FailingSink {
    fn begin_figure(&mut self, _title: &str) -> io::Result<()> {
        Ok(())
    }

    fn plot(&mut self, _label: &str, _t: &[f64], _x: &[f64], _style: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "display closed"))
    }
}

#[test]
fn test_sink_failure_stops_the_run() {
    let config = ComparisonConfig::<f64>::default();
    let err = run_comparison(&CubicSine, &config, &mut FailingSink).unwrap_err();
    match err {
        StudyError::Output(err) => assert_eq!(err.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_dyn_sink() {
    let mut recording = RecordingSink::new();
    let sink: &mut dyn PlotSink<f64> = &mut recording;
    let config = ComparisonConfig::<f64>::default().with_resolutions(vec![3]);
    run_comparison(&CubicSine, &config, sink).unwrap();
    assert_eq!(recording.figures.len(), 3);
}

#[test]
fn test_f32_comparison() {
    let mut sink = RecordingSink::<f32>::new();
    let config = ComparisonConfig::<f32>::default();
    let report = run_comparison(&CubicSine, &config, &mut sink).unwrap();
    let rk4 = report.get(Method::Rk4, 20).unwrap();
    assert!((rk4.trajectory[1] - 0.135_059_37).abs() < 1e-5);
}
