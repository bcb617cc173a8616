//! # Frame Benchmark
//!
//! Full `AnimationLoop::frame` cost at steady state, per preset.
//!
//! Run with: `cargo bench --package aurora`

// Benchmarks don't need docs
#![allow(missing_docs)]

use std::sync::Arc;
use std::time::Duration;

use aurora::shared::Vec2;
use aurora::{AnimationLoop, EngineOptions, HeadlessSurface, Preset, StaticHostSignals};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const FRAME: Duration = Duration::from_micros(16_667);

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("animation_frame");

    for preset in Preset::ALL {
        let mut engine = AnimationLoop::new(
            HeadlessSurface::new(1920.0, 1080.0),
            Arc::new(StaticHostSignals::desktop()),
            EngineOptions {
                preset,
                start_sampler: false,
                ..EngineOptions::default()
            },
        );
        engine.initialize();
        let sink = engine.pointer_sink();

        // Warm up to a steady particle count
        let mut now = Duration::ZERO;
        for _ in 0..1_200 {
            now += FRAME;
            engine.frame(now);
        }

        group.bench_with_input(BenchmarkId::from_parameter(preset.name()), &preset, |b, _| {
            b.iter(|| {
                now += FRAME;
                if let Some(sink) = &sink {
                    sink.pointer_moved(Vec2::new(960.0, 540.0), now);
                }
                black_box(engine.frame(now))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_frame);
criterion_main!(benches);
