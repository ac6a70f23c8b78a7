//! Stepper benchmarks.
//!
//! Measures the cost of the three methods on the cubic-sine test function
//! for increasing grid sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rkstep_core::{derivative::CubicSine, grid::linspace, test_problems::ExponentialDecay};
use rkstep_methods::Method;

fn bench_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("cubic_sine");

    for &points in &[20usize, 100, 1_000, 10_000] {
        let grid = linspace(0.0, 10.0, points).unwrap();
        group.throughput(Throughput::Elements(points as u64));

        for method in Method::ALL {
            group.bench_with_input(BenchmarkId::new(method.id(), points), &grid, |b, grid| {
                b.iter(|| {
                    method
                        .integrate(&CubicSine, black_box(0.0), black_box(grid))
                        .unwrap()
                })
            });
        }
    }

    group.finish();
}

fn bench_linear_problem(c: &mut Criterion) {
    let problem = ExponentialDecay::new(0.5);
    let grid = linspace(0.0, 10.0, 1_000).unwrap();

    c.bench_function("exponential_decay_rk4_1000", |b| {
        b.iter(|| {
            Method::Rk4
                .integrate(&problem, black_box(1.0), black_box(&grid))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_methods, bench_linear_problem);
criterion_main!(benches);
