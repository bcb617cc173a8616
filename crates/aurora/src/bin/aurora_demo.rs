//! # AURORA Demo
//!
//! Runs a headless session on simulated 60 FPS time and prints a report.
//!
//! ```bash
//! aurora_demo [preset] [seconds] [--mobile] [--reduced-motion]
//! aurora_demo rich 30
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use aurora::shared::Vec2;
use aurora::{
    preset_from_name, AnimationLoop, EngineOptions, EngineState, HeadlessSurface,
    StaticHostSignals, SurfaceSize,
};

const FRAME: Duration = Duration::from_micros(16_667);

#[allow(clippy::cast_precision_loss)]
fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let preset = preset_from_name(args.first().map_or("balanced", String::as_str));
    let seconds: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(20);
    let mobile = args.iter().any(|a| a == "--mobile");
    let reduced = args.iter().any(|a| a == "--reduced-motion");

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                      AURORA DEMO v0.1.0");
    println!("                         HEADLESS MODE");
    println!("═══════════════════════════════════════════════════════════════════");
    println!();
    println!("Preset:         {}", preset.name());
    println!("Simulated time: {seconds}s @ 60 FPS");
    println!("Device:         {}", if mobile { "mobile" } else { "desktop" });
    println!("Reduced motion: {reduced}");
    println!();

    let host = if mobile {
        StaticHostSignals::mobile()
    } else {
        StaticHostSignals::desktop()
    }
    .with_reduced_motion(reduced);

    let mut engine = AnimationLoop::new(
        HeadlessSurface::new(1280.0, 720.0),
        Arc::new(host),
        EngineOptions {
            preset,
            ..EngineOptions::default()
        },
    );
    engine.on_performance_change(|metrics| {
        println!(
            "  [perf] level={} fps={:.1} active={}",
            metrics.level.name(),
            metrics.fps,
            metrics.active_particles
        );
    });

    let state = engine.initialize();
    println!("Engine state:   {state:?}");
    if state != EngineState::Running {
        println!();
        println!("Nothing to animate. Static fallback in effect.");
        return;
    }

    let sink = engine.pointer_sink();
    let total_frames = seconds * 60;
    let wall = Instant::now();
    let mut timestamp = Duration::ZERO;
    let mut peak = 0_usize;

    for frame in 0..total_frames {
        timestamp += FRAME;

        // The pointer leaves for the last quarter of the run
        let pointer_away_at = total_frames * 3 / 4;
        if let Some(sink) = &sink {
            if frame == pointer_away_at {
                sink.pointer_left();
            } else if frame < pointer_away_at {
                let angle = frame as f32 / 120.0;
                let pointer = Vec2::new(640.0, 360.0) + Vec2::from_angle(angle) * 250.0;
                sink.pointer_moved(pointer, timestamp);
                if frame % 120 == 60 {
                    sink.clicked(pointer, timestamp);
                }
            }
        }

        // A burst of resizes halfway through
        if frame == total_frames / 2 {
            for step in 0..10_u16 {
                let width = 1280.0 - f32::from(step) * 20.0;
                engine.notify_resize(SurfaceSize::new(width, 720.0), timestamp);
            }
        }

        let Some(result) = engine.frame(timestamp) else {
            break;
        };
        peak = peak.max(result.stats.active);
        if result.resized {
            println!(
                "  [resize] bounds now {}x{}",
                result.surface.width, result.surface.height
            );
        }
        if frame % 600 == 599 {
            println!(
                "  t={:>5.1}s active={:>4} fps={:.0}",
                timestamp.as_secs_f32(),
                result.stats.active,
                result.stats.fps()
            );
        }
    }

    let elapsed = wall.elapsed();
    let stats = *engine.stats();
    let metrics = engine.sample_performance();
    engine.stop();

    println!();
    println!("═══════════════════════════════════════════════════════════════════");
    println!("                            REPORT");
    println!("═══════════════════════════════════════════════════════════════════");
    println!("Frames:          {}", stats.frames);
    println!("Spawned:         {}", stats.total_spawned);
    println!("Retired:         {}", stats.total_retired);
    println!("Peak active:     {peak}");
    println!("Pool exhausted:  {} frames", stats.pool_exhaustions);
    println!("Resizes applied: {}", stats.bounds_updates);
    if let Some(metrics) = metrics {
        println!("Level:           {}", metrics.level.name());
    }
    println!(
        "Wall time:       {:.2}ms ({:.2}µs/frame)",
        elapsed.as_secs_f64() * 1000.0,
        elapsed.as_secs_f64() * 1e6 / stats.frames.max(1) as f64
    );
    println!("Final state:     {:?}", engine.state());
}
