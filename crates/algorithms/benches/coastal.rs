//! Benchmarks for transect generation, correction and evolution statistics

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use geo::LineString;
use shorekit_algorithms::statistics::{shoreline_evolution, EvolutionParams};
use shorekit_algorithms::transects::{
    correct_transects, generate_transects, CorrectionParams, SeaSide, TransectParams,
};
use shorekit_core::{Baseline, BaselineId, DistanceObservation, ShorelineId, TransectId};

/// Wavy coastline of the given length: a gentle sine with small bays
fn create_baseline(length: f64) -> Baseline {
    let coords: LineString<f64> = (0..=(length as usize / 10))
        .map(|i| {
            let x = i as f64 * 10.0;
            (x, 40.0 * (x / 400.0).sin() + 5.0 * (x / 37.0).sin())
        })
        .collect::<Vec<_>>()
        .into();
    Baseline::new(Some(BaselineId(1)), coords)
}

/// 30 years of surveys per transect with a steady trend and some noise
fn create_observations(transects: u32, surveys: usize) -> Vec<DistanceObservation> {
    let first = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
    (1..=transects)
        .flat_map(|t| {
            (0..surveys).map(move |k| DistanceObservation {
                transect_id: TransectId(t),
                shoreline_id: ShorelineId(k as i64),
                date: first + Duration::days(365 * k as i64),
                distance: Some(100.0 - 1.5 * k as f64 + ((t as usize * 7 + k * 13) % 11) as f64 * 0.3),
            })
        })
        .collect()
}

fn params(spacing: f64) -> TransectParams {
    TransectParams {
        spacing,
        sea_side: SeaSide::Left,
        ..Default::default()
    }
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("transects/generate");
    let baseline = [create_baseline(50_000.0)];
    for spacing in [100.0, 25.0, 5.0] {
        group.bench_with_input(BenchmarkId::from_parameter(spacing), &spacing, |b, &s| {
            b.iter(|| generate_transects(black_box(&baseline), &params(s)).unwrap())
        });
    }
    group.finish();
}

fn bench_correct(c: &mut Criterion) {
    let mut group = c.benchmark_group("transects/correct");
    let baseline = [create_baseline(50_000.0)];
    for spacing in [100.0, 25.0, 5.0] {
        let transects = generate_transects(&baseline, &params(spacing)).unwrap().transects;
        group.bench_with_input(
            BenchmarkId::from_parameter(transects.len()),
            &transects,
            |b, t| b.iter(|| correct_transects(black_box(t.clone()), &CorrectionParams::default()).unwrap()),
        );
    }
    group.finish();
}

fn bench_evolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics/evolution");
    for transects in [100, 1_000, 10_000] {
        let observations = create_observations(transects, 30);
        group.bench_with_input(
            BenchmarkId::from_parameter(transects),
            &observations,
            |b, obs| {
                b.iter(|| {
                    shoreline_evolution(black_box(obs), &[], &EvolutionParams::default()).unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_correct, bench_evolution);
criterion_main!(benches);
