//! # AURORA Shared
//!
//! Common types used by every AURORA crate.
//!
//! ## CRITICAL RULE
//!
//! This crate is pure data. It must NEVER depend on:
//! - threads or timers
//! - a rendering surface
//! - any host integration
//!
//! If you need behavior, put it in `aurora_core`, `aurora_ui` or
//! `aurora_rendering`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod constants;
pub mod host;
pub mod math;

pub use config::{
    AccessibilityConfig, Bounds, ClickConfig, ParticleKind, ParticleSystemConfig,
    ParticleTypeConfig, PerformanceConfig, Preset, SpawnRegion, ValueRange,
};
pub use constants::{
    DEFAULT_SEED, MAX_CLICK_EFFECTS, MAX_FRAME_DELTA_SECS, MAX_PARALLAX_OFFSET,
    RESIZE_DEBOUNCE_MS,
};
pub use host::{HostSignals, StaticHostSignals, SurfaceSize};
pub use math::Vec2;
