//! # Animation Loop
//!
//! Owns one surface and runs at most one session on it at a time.
//!
//! ```text
//!                 initialize()
//! Uninitialized ──────────────► Initializing ──► Running ──stop()──► Stopped
//!                                    │              │                  │
//!          static config / no surface│   reduced    │     initialize() │
//!                                    ▼   motion     ▼                  │
//!                              StaticFallback ◄─────┘   ◄──────────────┘
//! ```
//!
//! Frame N (host calls `frame(timestamp)` from its scheduler):
//!
//! 1. dt from the previous timestamp, clamped to `MAX_FRAME_DELTA_SECS`
//! 2. apply a due debounced resize
//! 3. feed the performance monitor
//! 4. copy the pointer snapshot
//! 5. spawn while the rate accumulator allows and the cap is not reached
//! 6. integrate every active particle with its forces, push element state
//! 7. retire expired particles
//!
//! Steps 5 through 7 are O(active) and allocation-free.

use std::sync::Arc;
use std::time::Duration;

use aurora_core::SlotHandle;
use aurora_rendering::{
    apply_parallax_to_particle, update_particle, FrameStats, ParticlePool, PerformanceMetrics,
    PerformanceMonitor, RenderSurface, SessionStats, Spawner, VisualElement,
};
use aurora_shared::{
    HostSignals, ParticleSystemConfig, Preset, SurfaceSize, Vec2, DEFAULT_SEED,
    MAX_FRAME_DELTA_SECS, RESIZE_DEBOUNCE_MS,
};
use aurora_ui::{MouseTracker, PointerSink, TrackerOptions};

use crate::config::{apply_reduced_motion, resolve, ConfigOverrides};
use crate::debounce::Debouncer;

/// Share of the parallax offset applied as acceleration.
const PARALLAX_WEIGHT: f32 = 0.5;

/// Lifecycle of an [`AnimationLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Created, `initialize` not called yet.
    Uninitialized,
    /// Building a session.
    Initializing,
    /// A session is live and frames are wanted.
    Running,
    /// The session was torn down.
    Stopped,
    /// Nothing dynamic is rendered: reduced motion or no usable surface.
    StaticFallback,
}

/// Session parameters chosen by the host.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Preset to build the snapshot from.
    pub preset: Preset,
    /// Values layered over the preset.
    pub overrides: ConfigOverrides,
    /// Spawner seed.
    pub seed: u64,
    /// Run the performance sampler thread. Off for fully deterministic runs.
    pub start_sampler: bool,
    /// Trailing-edge window for resize notifications.
    pub resize_debounce: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            overrides: ConfigOverrides::default(),
            seed: DEFAULT_SEED,
            start_sampler: true,
            resize_debounce: Duration::from_millis(RESIZE_DEBOUNCE_MS),
        }
    }
}

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameResult {
    /// Per-frame counters.
    pub stats: FrameStats,
    /// A debounced resize was applied at the start of this frame.
    pub resized: bool,
    /// Surface size the frame ran against.
    pub surface: SurfaceSize,
}

type Listener = Arc<dyn Fn(&PerformanceMetrics) + Send + Sync>;

/// Host signals with a session-level reduced-motion override.
struct SessionHost<'a> {
    base: &'a dyn HostSignals,
    reduced_motion: Option<bool>,
}

impl HostSignals for SessionHost<'_> {
    fn is_constrained_device(&self) -> Option<bool> {
        self.base.is_constrained_device()
    }

    fn prefers_reduced_motion(&self) -> Option<bool> {
        self.reduced_motion.or_else(|| self.base.prefers_reduced_motion())
    }

    fn has_pointer(&self) -> Option<bool> {
        self.base.has_pointer()
    }
}

/// Everything that lives exactly as long as one running session.
struct Session<E: VisualElement> {
    pool: ParticlePool<E>,
    monitor: PerformanceMonitor,
    tracker: MouseTracker,
    spawner: Spawner,
    /// Handles of active particles, in spawn order.
    active: Vec<SlotHandle>,
    /// Per-particle force scratch.
    forces: Vec<Vec2>,
    /// Handles retired this frame.
    retired: Vec<SlotHandle>,
    last_timestamp: Option<Duration>,
    frame_number: u64,
}

/// The orchestrator: config, pool, spawner, physics, pointer and monitor
/// wired into a frame callback.
pub struct AnimationLoop<S: RenderSurface> {
    surface: S,
    host: Arc<dyn HostSignals>,
    options: EngineOptions,
    state: EngineState,
    config: Option<ParticleSystemConfig>,
    session: Option<Session<S::Element>>,
    resize: Debouncer<SurfaceSize>,
    listeners: Vec<Listener>,
    reduced_motion: Option<bool>,
    stats: SessionStats,
}

impl<S: RenderSurface> AnimationLoop<S> {
    /// Creates an engine for `surface`. Nothing happens until
    /// [`initialize`](Self::initialize).
    pub fn new(surface: S, host: Arc<dyn HostSignals>, options: EngineOptions) -> Self {
        let resize = Debouncer::new(options.resize_debounce);
        Self {
            surface,
            host,
            options,
            state: EngineState::Uninitialized,
            config: None,
            session: None,
            resize,
            listeners: Vec::new(),
            reduced_motion: None,
            stats: SessionStats::default(),
        }
    }

    /// Resolves the config and starts a session.
    ///
    /// Ends in `Running`, or in `StaticFallback` when the snapshot is
    /// static or the surface is missing. Calling it on a running engine
    /// does nothing.
    pub fn initialize(&mut self) -> EngineState {
        if self.state == EngineState::Running {
            tracing::debug!("initialize on a running engine ignored");
            return self.state;
        }
        self.state = EngineState::Initializing;

        let host = SessionHost {
            base: self.host.as_ref(),
            reduced_motion: self.reduced_motion,
        };
        let mut config = resolve(self.options.preset, &self.options.overrides, &host);

        if config.is_static() {
            tracing::info!(preset = self.options.preset.name(), "static fallback: static snapshot");
            self.config = Some(config);
            self.state = EngineState::StaticFallback;
            return self.state;
        }

        let Some(size) = self.surface.measure().filter(|size| size.is_usable()) else {
            tracing::warn!("static fallback: surface missing or not laid out");
            self.config = Some(config);
            self.state = EngineState::StaticFallback;
            return self.state;
        };
        config.bounds = config.bounds.with_size(size);

        let pool = ParticlePool::new(&mut self.surface, config.max_particles);

        let mut monitor = PerformanceMonitor::new(config.performance);
        for listener in &self.listeners {
            let listener = Arc::clone(listener);
            monitor.on_performance_change(move |metrics| listener(metrics));
        }
        if self.options.start_sampler {
            if let Err(err) = monitor.start() {
                tracing::warn!(error = %err, "running without performance sampling");
            }
        }

        let tracker = MouseTracker::new(TrackerOptions {
            enable_parallax: config.enable_parallax,
            enable_click_effects: config.enable_click_effects,
            click: config.click,
            pointer_supported: host.has_pointer().unwrap_or(false),
        });

        let capacity = pool.capacity();
        self.session = Some(Session {
            pool,
            monitor,
            tracker,
            spawner: Spawner::new(self.options.seed),
            active: Vec::with_capacity(capacity),
            forces: Vec::with_capacity(2),
            retired: Vec::with_capacity(capacity),
            last_timestamp: None,
            frame_number: 0,
        });
        self.resize.cancel();
        self.stats = SessionStats::default();

        tracing::info!(
            preset = config.preset.name(),
            max_particles = config.max_particles,
            spawn_rate = config.spawn_rate,
            width = size.width,
            height = size.height,
            "animation session started"
        );
        self.config = Some(config);
        self.state = EngineState::Running;
        self.state
    }

    /// Runs one frame at host time `timestamp`.
    ///
    /// Returns `None` when no session is running; the host should stop
    /// scheduling frames then.
    pub fn frame(&mut self, timestamp: Duration) -> Option<FrameResult> {
        if self.state != EngineState::Running {
            return None;
        }
        let session = self.session.as_mut()?;
        let config = self.config.as_mut()?;

        let elapsed = session
            .last_timestamp
            .map_or(Duration::ZERO, |previous| timestamp.saturating_sub(previous));
        session.last_timestamp = Some(timestamp);
        let dt = elapsed.as_secs_f32().min(MAX_FRAME_DELTA_SECS);

        let mut resized = false;
        if let Some(size) = self.resize.poll(timestamp) {
            if size.is_usable() {
                config.bounds = config.bounds.with_size(size);
                self.stats.record_bounds_update();
                resized = true;
                tracing::debug!(width = size.width, height = size.height, "bounds updated");
            } else {
                tracing::debug!("unusable resize ignored");
            }
        }

        session.monitor.record_frame(elapsed);
        session.tracker.update(timestamp);

        let mut stats = FrameStats {
            delta_ms: dt * 1000.0,
            ..FrameStats::default()
        };

        // Spawn
        let mut credit = dt;
        while session.spawner.should_spawn_particle(
            session.active.len(),
            config.max_particles,
            config.spawn_rate,
            credit,
        ) {
            credit = 0.0;
            let Some(kind) = session.spawner.select_particle_type(&config.particle_types) else {
                break;
            };
            let template = session.spawner.create_particle(kind, config.bounds);
            if let Some(handle) = session.pool.acquire_with(&template) {
                session.active.push(handle);
                stats.spawned += 1;
            } else {
                stats.pool_exhausted = true;
                break;
            }
        }

        // Integrate
        let bounds = config.bounds;
        for &handle in &session.active {
            let Some(particle) = session.pool.particle_mut(handle) else {
                session.retired.push(handle);
                continue;
            };

            session.forces.clear();
            if config.enable_parallax {
                let offset = session
                    .tracker
                    .parallax_offset(particle.position, config.parallax_strength);
                if offset != Vec2::ZERO {
                    session
                        .forces
                        .push(apply_parallax_to_particle(particle, offset, PARALLAX_WEIGHT));
                }
            }
            if config.enable_click_effects {
                if let Some(impulse) = session.tracker.click_effect(particle.position) {
                    session.forces.push(impulse.force);
                }
            }

            if update_particle(particle, dt, bounds, config.gravity, &session.forces) {
                session.retired.push(handle);
            } else {
                session.pool.update_element(handle);
            }
        }

        // Retire
        if !session.retired.is_empty() {
            for handle in session.retired.drain(..) {
                if session.pool.release(handle) {
                    stats.retired += 1;
                }
            }
            let pool = &session.pool;
            session.active.retain(|&handle| pool.particle(handle).is_some());
        }

        session.frame_number += 1;
        stats.frame_number = session.frame_number;
        stats.active = session.active.len();
        session.monitor.update_active_particles(stats.active);
        self.stats.record(&stats);

        Some(FrameResult {
            stats,
            resized,
            surface: SurfaceSize::new(bounds.width, bounds.height),
        })
    }

    /// Tears the session down. Idempotent; no frame work or performance
    /// callback happens after it returns.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            Self::teardown(session);
            tracing::info!(
                frames = self.stats.frames,
                spawned = self.stats.total_spawned,
                peak_active = self.stats.peak_active,
                "animation session stopped"
            );
        }
        self.resize.cancel();
        if matches!(
            self.state,
            EngineState::Uninitialized | EngineState::Initializing | EngineState::Running
        ) {
            self.state = EngineState::Stopped;
        }
    }

    fn teardown(mut session: Session<S::Element>) {
        session.monitor.cleanup();
        session.tracker.cleanup();
        session.pool.cleanup();
        session.active.clear();
        session.retired.clear();
    }

    /// Stops and starts again with a new snapshot.
    pub fn restart(&mut self, preset: Preset, overrides: ConfigOverrides) -> EngineState {
        self.stop();
        self.options.preset = preset;
        self.options.overrides = overrides;
        self.initialize()
    }

    /// Reports a new surface size. Applied once the debounce window passes
    /// without another notification.
    pub fn notify_resize(&mut self, size: SurfaceSize, timestamp: Duration) {
        self.resize.push(size, timestamp);
    }

    /// Reports a reduced-motion preference change from the host.
    ///
    /// Turning it on ends the running session and enters `StaticFallback`.
    /// Turning it off takes effect on the next `initialize` or `restart`.
    pub fn notify_reduced_motion(&mut self, prefers: bool) {
        self.reduced_motion = Some(prefers);
        if !prefers || self.state == EngineState::StaticFallback {
            return;
        }
        if let Some(session) = self.session.take() {
            Self::teardown(session);
        }
        self.resize.cancel();
        self.config = self.config.take().map(apply_reduced_motion);
        self.state = EngineState::StaticFallback;
        tracing::info!("static fallback: reduced motion requested");
    }

    /// Pointer input handle for the running session.
    ///
    /// `None` when not running or when pointer effects are off. A sink
    /// goes dead when its session ends.
    #[must_use]
    pub fn pointer_sink(&self) -> Option<PointerSink> {
        self.session.as_ref()?.tracker.pointer_sink()
    }

    /// Registers `callback` for performance level changes, for this and
    /// every later session.
    pub fn on_performance_change<F>(&mut self, callback: F)
    where
        F: Fn(&PerformanceMetrics) + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(callback);
        if let Some(session) = &self.session {
            let forwarded = Arc::clone(&listener);
            session
                .monitor
                .on_performance_change(move |metrics| forwarded(metrics));
        }
        self.listeners.push(listener);
    }

    /// Re-evaluates the performance level now.
    pub fn sample_performance(&self) -> Option<PerformanceMetrics> {
        self.session.as_ref().map(|session| session.monitor.sample())
    }

    /// Current performance metrics.
    #[must_use]
    pub fn metrics(&self) -> Option<PerformanceMetrics> {
        self.session.as_ref().map(|session| session.monitor.metrics())
    }

    /// Counters for the current (or last) session.
    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Number of active particles.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.session.as_ref().map_or(0, |session| session.active.len())
    }

    /// Pool slots of the running session.
    #[must_use]
    pub fn pool_capacity(&self) -> Option<usize> {
        self.session.as_ref().map(|session| session.pool.capacity())
    }

    /// The snapshot of the current (or last) session.
    #[must_use]
    pub const fn config(&self) -> Option<&ParticleSystemConfig> {
        self.config.as_ref()
    }

    /// The surface.
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: RenderSurface> Drop for AnimationLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_rendering::HeadlessSurface;
    use aurora_shared::StaticHostSignals;

    fn engine(host: StaticHostSignals) -> AnimationLoop<HeadlessSurface> {
        AnimationLoop::new(
            HeadlessSurface::new(800.0, 600.0),
            Arc::new(host),
            EngineOptions {
                start_sampler: false,
                ..EngineOptions::default()
            },
        )
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_initialize_runs() {
        let mut engine = engine(StaticHostSignals::desktop());
        assert_eq!(engine.state(), EngineState::Uninitialized);
        assert!(engine.frame(ms(0)).is_none());

        assert_eq!(engine.initialize(), EngineState::Running);
        assert_eq!(engine.initialize(), EngineState::Running);

        let config = engine.config().unwrap();
        assert_eq!(config.bounds.width, 800.0);
        assert_eq!(engine.pool_capacity(), Some(config.max_particles * 2));
        assert_eq!(engine.surface().elements_created(), config.max_particles * 2);
    }

    #[test]
    fn test_first_frame_has_zero_dt() {
        let mut engine = engine(StaticHostSignals::desktop());
        engine.initialize();

        let first = engine.frame(ms(5_000)).unwrap();
        assert_eq!(first.stats.delta_ms, 0.0);
        assert_eq!(first.stats.spawned, 0);
        assert_eq!(first.stats.frame_number, 1);

        // A long pause integrates as the clamp
        let second = engine.frame(ms(9_000)).unwrap();
        assert!((second.stats.delta_ms - MAX_FRAME_DELTA_SECS * 1000.0).abs() < 1e-3);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut engine = engine(StaticHostSignals::desktop());
        engine.initialize();
        for i in 0..30 {
            engine.frame(ms(i * 16));
        }

        engine.stop();
        engine.stop();
        assert_eq!(engine.state(), EngineState::Stopped);
        assert!(engine.frame(ms(1_000)).is_none());
        assert_eq!(engine.active_count(), 0);
        assert!(engine.pointer_sink().is_none());
    }

    #[test]
    fn test_reduced_motion_mid_session() {
        let mut engine = engine(StaticHostSignals::desktop());
        engine.initialize();
        let sink = engine.pointer_sink().unwrap();

        engine.notify_reduced_motion(true);
        assert_eq!(engine.state(), EngineState::StaticFallback);
        assert!(engine.config().unwrap().is_static());
        assert!(engine.frame(ms(100)).is_none());
        assert!(sink.is_detached());

        // Still static on restart while the preference holds
        assert_eq!(
            engine.restart(Preset::Rich, ConfigOverrides::default()),
            EngineState::StaticFallback
        );

        engine.notify_reduced_motion(false);
        assert_eq!(
            engine.restart(Preset::Rich, ConfigOverrides::default()),
            EngineState::Running
        );
    }
}
