//! Benchmarks for sampling and intersection search.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use curvecross::intersection::{DEFAULT_TOLERANCE, find_intersections};
use curvecross::sampling::{DomainPolicy, SolveSettings, linspace, solve};

fn bench_find_crossings(c: &mut Criterion) {
    let xs = linspace(-10.0, 10.0, 10_000);
    let y1: Vec<f64> = xs.iter().map(|x| x.sin()).collect();
    let y2: Vec<f64> = xs.iter().map(|x| x.cos()).collect();

    c.bench_function("find_crossings_10k", |b| {
        b.iter(|| find_intersections(black_box(&xs), &y1, &y2, DEFAULT_TOLERANCE))
    });
}

fn bench_find_overlap(c: &mut Criterion) {
    let xs = linspace(-10.0, 10.0, 10_000);
    let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();

    c.bench_function("find_overlap_10k", |b| {
        b.iter(|| find_intersections(black_box(&xs), &ys, &ys, DEFAULT_TOLERANCE))
    });
}

fn bench_solve_polynomials(c: &mut Criterion) {
    let settings = SolveSettings::default();

    c.bench_function("solve_polynomials", |b| {
        b.iter(|| {
            solve(
                black_box("5*x^2 + 2*x"),
                black_box("x^2 - 3*x + 1"),
                &settings,
                DomainPolicy::RestrictToValid,
            )
        })
    });
}

fn bench_solve_restricted(c: &mut Criterion) {
    let settings = SolveSettings::default();

    c.bench_function("solve_restricted", |b| {
        b.iter(|| {
            solve(
                black_box("sqrt(x) + log10(x + 11)"),
                black_box("x / 2"),
                &settings,
                DomainPolicy::Unrestricted,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_find_crossings,
    bench_find_overlap,
    bench_solve_polynomials,
    bench_solve_restricted
);
criterion_main!(benches);
