//! # Performance Monitor
//!
//! Smooths frame times fed by the render loop and, on a timer of its own,
//! turns them into a [`DegradationLevel`].
//!
//! ```text
//!  render loop                      sampler thread
//!  ───────────                      ──────────────
//!  record_frame(dt) ──► [Mutex<MonitorState>] ◄── timeout ──► sample()
//!                                                            │
//!                                        level changed? ──► listeners
//! ```
//!
//! The sampler is joined on `stop`, so no listener runs after it returns.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use aurora_shared::{HostSignals, PerformanceConfig};
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use thiserror::Error;

/// Errors surfaced by the monitor.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// The sampler thread could not be spawned.
    #[error("failed to spawn performance sampler: {0}")]
    SamplerSpawn(#[from] std::io::Error),
}

/// Result type for monitor operations.
pub type MonitorResult<T> = Result<T, MonitorError>;

/// Discrete quality level derived from smoothed frame time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DegradationLevel {
    /// Frame budget met.
    #[default]
    Optimal,
    /// Frame time above the reduced threshold.
    Reduced,
    /// Frame time above the critical threshold.
    Critical,
}

impl DegradationLevel {
    /// Lowercase name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Optimal => "optimal",
            Self::Reduced => "reduced",
            Self::Critical => "critical",
        }
    }

    fn classify(frame_time_ms: f32, config: &PerformanceConfig) -> Self {
        if frame_time_ms >= config.critical_frame_time_ms {
            Self::Critical
        } else if frame_time_ms >= config.reduced_frame_time_ms {
            Self::Reduced
        } else {
            Self::Optimal
        }
    }
}

/// Snapshot of the monitor's view of the session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerformanceMetrics {
    /// Smoothed frames per second, 0 before the first frame.
    pub fps: f32,
    /// Smoothed frame time in milliseconds.
    pub frame_time_ms: f32,
    /// Active particles last reported.
    pub active_particles: usize,
    /// Quality level at the last sample.
    pub level: DegradationLevel,
    /// Frames recorded since the monitor was created.
    pub frames_recorded: u64,
}

/// Identifies a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&PerformanceMetrics) + Send + Sync>;

#[derive(Default)]
struct MonitorState {
    smoothed_ms: Option<f32>,
    active_particles: usize,
    frames_recorded: u64,
    level: DegradationLevel,
}

struct Shared {
    config: PerformanceConfig,
    state: Mutex<MonitorState>,
    listeners: Mutex<Vec<(ListenerId, Listener)>>,
    next_listener: AtomicU64,
}

impl Shared {
    fn metrics(&self) -> PerformanceMetrics {
        let state = self.state.lock();
        let frame_time_ms = state.smoothed_ms.unwrap_or(0.0);
        PerformanceMetrics {
            fps: if frame_time_ms > 0.0 { 1000.0 / frame_time_ms } else { 0.0 },
            frame_time_ms,
            active_particles: state.active_particles,
            level: state.level,
            frames_recorded: state.frames_recorded,
        }
    }

    fn sample(&self) -> PerformanceMetrics {
        let (previous, metrics) = {
            let mut state = self.state.lock();
            let previous = state.level;
            if let Some(ms) = state.smoothed_ms {
                state.level = DegradationLevel::classify(ms, &self.config);
            }
            drop(state);
            (previous, self.metrics())
        };

        if metrics.level != previous {
            tracing::info!(
                from = previous.name(),
                to = metrics.level.name(),
                fps = metrics.fps,
                active = metrics.active_particles,
                "performance level changed"
            );
            // Listeners run outside the lock so they may call back into the monitor
            let listeners: Vec<Listener> = self
                .listeners
                .lock()
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect();
            for listener in listeners {
                listener(&metrics);
            }
        }
        metrics
    }
}

struct Sampler {
    shutdown: Sender<()>,
    handle: JoinHandle<()>,
}

/// Frame-time monitor with an optional background sampler.
pub struct PerformanceMonitor {
    shared: Arc<Shared>,
    sampler: Option<Sampler>,
}

impl PerformanceMonitor {
    /// Creates an idle monitor. Nothing runs until [`start`](Self::start).
    #[must_use]
    pub fn new(mut config: PerformanceConfig) -> Self {
        if !(config.smoothing > 0.0 && config.smoothing <= 1.0) {
            config.smoothing = PerformanceConfig::default().smoothing;
        }
        config.sample_interval_ms = config.sample_interval_ms.max(1);

        Self {
            shared: Arc::new(Shared {
                config,
                state: Mutex::new(MonitorState::default()),
                listeners: Mutex::new(Vec::new()),
                next_listener: AtomicU64::new(0),
            }),
            sampler: None,
        }
    }

    /// Starts the periodic sampler. A second call is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::SamplerSpawn`] if the OS refuses a thread.
    pub fn start(&mut self) -> MonitorResult<()> {
        if self.sampler.is_some() {
            return Ok(());
        }

        let interval = Duration::from_millis(self.shared.config.sample_interval_ms);
        let (shutdown, shutdown_rx) = bounded::<()>(1);
        let shared = Arc::clone(&self.shared);

        let handle = thread::Builder::new()
            .name("aurora-perf-sampler".into())
            .spawn(move || loop {
                match shutdown_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        shared.sample();
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        tracing::debug!(
            interval_ms = self.shared.config.sample_interval_ms,
            "performance sampler started"
        );
        self.sampler = Some(Sampler { shutdown, handle });
        Ok(())
    }

    /// Stops the sampler and waits for it. Idempotent.
    pub fn stop(&mut self) {
        let Some(sampler) = self.sampler.take() else {
            return;
        };
        // A disconnected channel wakes the sampler just as well
        let _ = sampler.shutdown.send(());
        if sampler.handle.join().is_err() {
            tracing::warn!("performance sampler panicked");
        }
        tracing::debug!("performance sampler stopped");
    }

    /// True while the sampler thread runs.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.sampler.is_some()
    }

    /// Feeds one frame's duration. Zero-length frames are ignored.
    pub fn record_frame(&self, delta: Duration) {
        if delta.is_zero() {
            return;
        }
        #[allow(clippy::cast_possible_truncation)]
        let ms = (delta.as_secs_f64() * 1000.0) as f32;
        let alpha = self.shared.config.smoothing;

        let mut state = self.shared.state.lock();
        state.smoothed_ms = Some(match state.smoothed_ms {
            Some(prev) => prev + alpha * (ms - prev),
            None => ms,
        });
        state.frames_recorded += 1;
    }

    /// Reports the active particle count.
    pub fn update_active_particles(&self, count: usize) {
        self.shared.state.lock().active_particles = count;
    }

    /// Re-evaluates the level now, notifying listeners if it changed.
    pub fn sample(&self) -> PerformanceMetrics {
        self.shared.sample()
    }

    /// Current metrics without re-evaluating the level.
    #[must_use]
    pub fn metrics(&self) -> PerformanceMetrics {
        self.shared.metrics()
    }

    /// Registers `callback` to run whenever the level changes.
    pub fn on_performance_change<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&PerformanceMetrics) + Send + Sync + 'static,
    {
        let id = ListenerId(self.shared.next_listener.fetch_add(1, Ordering::Relaxed));
        self.shared.listeners.lock().push((id, Arc::new(callback)));
        id
    }

    /// Unregisters a listener. Returns false if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.shared.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// True if the host reports a constrained (mobile) device.
    #[must_use]
    pub fn is_mobile_device(host: &dyn HostSignals) -> bool {
        host.is_constrained_device().unwrap_or(false)
    }

    /// True if the host reports a reduced-motion preference.
    #[must_use]
    pub fn has_reduced_motion_preference(host: &dyn HostSignals) -> bool {
        host.prefers_reduced_motion().unwrap_or(false)
    }

    /// Stops the sampler and drops every listener. Idempotent.
    pub fn cleanup(&mut self) {
        self.stop();
        self.shared.listeners.lock().clear();
    }
}

impl Drop for PerformanceMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}
