use agroscore_rust::data::default_soil_profile;
use agroscore_rust::{AssessmentRequest, CreditScorer, WeatherSample};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn create_request(seed: usize) -> AssessmentRequest {
    let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let conditions = ["clear sky", "light rain", "overcast clouds", "sunny", "mist"];
    let sample = |offset: i64| {
        let idx = (seed + offset as usize) % conditions.len();
        WeatherSample::new(
            start + Duration::days(offset),
            22.0 + (seed % 10) as f64,
            60.0 + idx as f64 * 5.0,
            3.0,
            conditions[idx],
        )
    };

    let mut soil_profile = default_soil_profile();
    for (i, measurements) in soil_profile.values_mut().enumerate() {
        for value in measurements.values_mut() {
            *value *= 1.0 + ((seed + i) % 7) as f64 * 0.05;
        }
    }

    AssessmentRequest {
        soil_profile,
        historical: (0..5).map(sample).collect(),
        current: sample(5),
        forecast: (6..11).map(sample).collect(),
    }
}

fn benchmark_single_assessment(c: &mut Criterion) {
    let scorer = CreditScorer::with_defaults().unwrap();
    let request = create_request(0);

    c.bench_function("assess_single", |b| {
        b.iter(|| scorer.assess(black_box(&request)).unwrap())
    });
}

fn benchmark_batch_assessment(c: &mut Criterion) {
    let scorer = CreditScorer::with_defaults().unwrap();
    let mut group = c.benchmark_group("assess_batch");

    for size in [10, 100, 1000] {
        let requests: Vec<_> = (0..size).map(create_request).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &requests, |b, requests| {
            b.iter(|| scorer.assess_batch(black_box(requests)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_assessment, benchmark_batch_assessment);
criterion_main!(benches);
