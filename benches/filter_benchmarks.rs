//! Benchmarks for filter and pipeline performance

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hand_cursor_control::{
    config::Config,
    filters::{moving_average::MovingAverageFilter, one_euro::OneEuroFilter, Passthrough, ScalarFilter},
    landmarks::{DetectionFrame, HandLandmarks},
    pipeline::{GeometryMode, PointerPipeline},
};

fn benchmark_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");

    // Test data - simulating noisy normalized pointer samples at 60 Hz
    let test_data: Vec<(f64, f64)> = (0..100)
        .map(|i| {
            let t = f64::from(i) * (1000.0 / 60.0);
            let value = 0.5 + 0.2 * (t / 300.0).sin() + 0.01 * rand::random::<f64>();
            (value, t)
        })
        .collect();

    let filter_configs: Vec<(&str, Box<dyn ScalarFilter>)> = vec![
        ("passthrough", Box::new(Passthrough)),
        (
            "one_euro_front",
            Box::new(OneEuroFilter::new(60.0, 0.001, 0.1, 1.0).unwrap()),
        ),
        (
            "one_euro_down",
            Box::new(OneEuroFilter::new(60.0, 0.001, 0.7, 1.0).unwrap()),
        ),
        (
            "moving_average_15",
            Box::new(MovingAverageFilter::new(15).unwrap()),
        ),
    ];

    for (name, mut filter) in filter_configs {
        group.bench_with_input(
            BenchmarkId::new("single_update", name),
            &test_data[0],
            |b, &(value, t)| {
                b.iter(|| black_box(filter.filter(black_box(value), black_box(t))));
            },
        );

        group.bench_with_input(BenchmarkId::new("sequence_100", name), &test_data, |b, data| {
            b.iter(|| {
                filter.reset();
                for &(value, t) in data {
                    black_box(filter.filter(black_box(value), black_box(t)));
                }
            });
        });
    }

    group.finish();
}

fn noisy_hand(i: u32) -> HandLandmarks {
    let jitter = f64::from(i % 7) * 1e-4;
    let points: Vec<[f64; 3]> = (0..21)
        .map(|j| {
            let f = f64::from(j);
            [
                0.3 + 0.015 * f + jitter,
                0.8 - 0.018 * f - jitter,
                -0.002 * f - 0.005,
            ]
        })
        .collect();
    HandLandmarks::from_points(&points).unwrap()
}

fn benchmark_pipeline_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_step");

    for mode in [
        GeometryMode::Normal,
        GeometryMode::TopDown,
        GeometryMode::Front,
        GeometryMode::Down,
    ] {
        let config = Config::for_mode(mode);
        let mut pipeline = PointerPipeline::new(&config).unwrap();

        let frames: Vec<DetectionFrame> = (0..60)
            .map(|i| DetectionFrame::single(noisy_hand(i), f64::from(i) * (1000.0 / 60.0)))
            .collect();

        group.bench_with_input(
            BenchmarkId::new("one_second_of_frames", mode.to_string()),
            &frames,
            |b, frames| {
                b.iter(|| {
                    for frame in frames {
                        black_box(pipeline.process(black_box(frame)));
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_filters, benchmark_pipeline_step);
criterion_main!(benches);
