//! # AURORA
//!
//! Decorative ambient particles for a page region: bubbles, sparkles,
//! dust and petals drifting behind content, reacting to the pointer.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          AnimationLoop                           │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  config::resolve ──► ParticleSystemConfig (immutable snapshot)   │
//! │                                                                  │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────────────┐  │
//! │  │ Spawner      │──►│ ParticlePool │──►│ RenderSurface        │  │
//! │  │ physics      │   │ 2 × max      │   │ (DOM, canvas, none)  │  │
//! │  └──────────────┘   └──────────────┘   └──────────────────────┘  │
//! │         ▲                                                        │
//! │  ┌──────┴───────┐   ┌──────────────────────┐                     │
//! │  │ MouseTracker │   │ PerformanceMonitor   │──► listeners        │
//! │  │ PointerSink  │   │ (sampler thread)     │                     │
//! │  └──────────────┘   └──────────────────────┘                     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut engine = AnimationLoop::new(surface, Arc::new(host), EngineOptions::default());
//! if engine.initialize() == EngineState::Running {
//!     while let Some(result) = engine.frame(now()) {
//!         // schedule the next frame
//!     }
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod debounce;
pub mod engine;

pub use aurora_core as core;
pub use aurora_rendering as rendering;
pub use aurora_shared as shared;
pub use aurora_ui as ui;

pub use config::{
    apply_mobile_adjustments, apply_reduced_motion, create_config, preset_from_name, resolve,
    validate, ConfigError, ConfigOverrides, ConfigResult,
};
pub use debounce::Debouncer;
pub use engine::{AnimationLoop, EngineOptions, EngineState, FrameResult};

pub use aurora_rendering::{
    DegradationLevel, HeadlessElement, HeadlessSurface, PerformanceMetrics, RenderSurface,
    VisualElement,
};
pub use aurora_shared::{
    HostSignals, ParticleSystemConfig, Preset, StaticHostSignals, SurfaceSize,
};
pub use aurora_ui::PointerSink;
