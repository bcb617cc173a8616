//! # Config Factory
//!
//! Builds the immutable [`ParticleSystemConfig`] snapshot for a session.
//!
//! ```text
//! preset ──► overrides ──► validation ──► mobile? ──► reduced motion?
//! ```
//!
//! Every step is a pure function of its input. The last one wins: a
//! reduced-motion preference always yields a static snapshot.

use std::f32::consts::{FRAC_PI_2, PI};
use std::path::{Path, PathBuf};

use aurora_rendering::PerformanceMonitor;
use aurora_shared::{
    AccessibilityConfig, Bounds, ClickConfig, HostSignals, ParticleKind, ParticleSystemConfig,
    ParticleTypeConfig, PerformanceConfig, Preset, SpawnRegion, ValueRange, Vec2,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Particle ceiling on constrained devices.
pub const MOBILE_MAX_PARTICLES: usize = 30;

/// Spawn rate ceiling on constrained devices, particles per second.
pub const MOBILE_MAX_SPAWN_RATE: f32 = 3.0;

/// Largest accepted `max_particles` from overrides.
pub const MAX_PARTICLES_LIMIT: usize = 1_000;

/// Largest accepted `spawn_rate` from overrides.
pub const MAX_SPAWN_RATE: f32 = 200.0;

/// Longest accepted click effect lifetime, in seconds.
pub const MAX_CLICK_TTL_SECS: f32 = 60.0;

/// Errors raised while loading overrides.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The overrides were not valid TOML for [`ConfigOverrides`].
    #[error("invalid config overrides: {0}")]
    Parse(#[from] toml::de::Error),

    /// The overrides file could not be read.
    #[error("failed to read config overrides from {path}: {source}")]
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for config loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Partial configuration layered over a preset. Every field is optional.
///
/// ```toml
/// max_particles = 40
/// spawn_rate = 4.5
/// enable_click_effects = false
/// gravity = { x = 0.0, y = -12.0 }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    /// Hard cap on active particles
    pub max_particles: Option<usize>,
    /// Particles per second
    pub spawn_rate: Option<f32>,
    /// Replaces the preset's particle types
    pub particle_types: Option<Vec<ParticleTypeConfig>>,
    /// Constant acceleration, pixels/s²
    pub gravity: Option<Vec2>,
    /// Margin outside the surface before retirement
    pub padding: Option<f32>,
    /// Pointer parallax on/off
    pub enable_parallax: Option<bool>,
    /// Parallax steering strength
    pub parallax_strength: Option<f32>,
    /// Click impulses on/off
    pub enable_click_effects: Option<bool>,
    /// Click impulse tuning
    pub click: Option<ClickConfig>,
    /// Performance sampling thresholds
    pub performance: Option<PerformanceConfig>,
    /// Force the static fallback
    pub static_fallback: Option<bool>,
}

impl ConfigOverrides {
    /// Parses overrides from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown keys.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses an overrides file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// True if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Layers the set fields over `config`.
    #[must_use]
    pub fn apply(&self, mut config: ParticleSystemConfig) -> ParticleSystemConfig {
        if let Some(max) = self.max_particles {
            config.max_particles = max;
        }
        if let Some(rate) = self.spawn_rate {
            config.spawn_rate = rate;
        }
        if let Some(types) = &self.particle_types {
            config.particle_types.clone_from(types);
        }
        if let Some(gravity) = self.gravity {
            config.gravity = gravity;
        }
        if let Some(padding) = self.padding {
            config.bounds.padding = padding;
        }
        if let Some(enabled) = self.enable_parallax {
            config.enable_parallax = enabled;
        }
        if let Some(strength) = self.parallax_strength {
            config.parallax_strength = strength;
        }
        if let Some(enabled) = self.enable_click_effects {
            config.enable_click_effects = enabled;
        }
        if let Some(click) = self.click {
            config.click = click;
        }
        if let Some(performance) = self.performance {
            config.performance = performance;
        }
        if let Some(static_fallback) = self.static_fallback {
            config.accessibility.static_fallback = static_fallback;
        }
        config
    }
}

fn bubble() -> ParticleTypeConfig {
    ParticleTypeConfig {
        kind: ParticleKind::Bubble,
        spawn_weight: 3.0,
        spawn_region: SpawnRegion::Bottom,
        size: ValueRange::new(8.0, 28.0),
        speed: ValueRange::new(18.0, 45.0),
        // Upwards, fanned 20° either side
        direction: ValueRange::new(-FRAC_PI_2 - 0.35, -FRAC_PI_2 + 0.35),
        opacity: ValueRange::new(0.25, 0.6),
        color: [0.72, 0.86, 1.0, 1.0],
        lifetime: None,
    }
}

fn sparkle() -> ParticleTypeConfig {
    ParticleTypeConfig {
        kind: ParticleKind::Sparkle,
        spawn_weight: 1.0,
        spawn_region: SpawnRegion::Anywhere,
        size: ValueRange::new(2.0, 5.0),
        speed: ValueRange::new(4.0, 12.0),
        direction: ValueRange::new(-PI, PI),
        opacity: ValueRange::new(0.6, 1.0),
        color: [1.0, 0.95, 0.7, 1.0],
        lifetime: Some(2.5),
    }
}

fn dust() -> ParticleTypeConfig {
    ParticleTypeConfig {
        kind: ParticleKind::Dust,
        spawn_weight: 2.0,
        spawn_region: SpawnRegion::Anywhere,
        size: ValueRange::new(1.5, 4.0),
        speed: ValueRange::new(2.0, 8.0),
        direction: ValueRange::new(-PI, PI),
        opacity: ValueRange::new(0.15, 0.35),
        color: [0.9, 0.9, 0.95, 1.0],
        lifetime: Some(10.0),
    }
}

fn petal() -> ParticleTypeConfig {
    ParticleTypeConfig {
        kind: ParticleKind::Petal,
        spawn_weight: 1.0,
        spawn_region: SpawnRegion::Top,
        size: ValueRange::new(10.0, 18.0),
        speed: ValueRange::new(30.0, 60.0),
        direction: ValueRange::new(FRAC_PI_2 - 0.5, FRAC_PI_2 + 0.5),
        opacity: ValueRange::new(0.5, 0.85),
        color: [1.0, 0.75, 0.82, 1.0],
        lifetime: Some(14.0),
    }
}

/// Returns the complete configuration for `preset`.
#[must_use]
pub fn create_config(preset: Preset) -> ParticleSystemConfig {
    let base = ParticleSystemConfig {
        preset,
        max_particles: 60,
        spawn_rate: 6.0,
        particle_types: vec![bubble(), sparkle(), dust()],
        gravity: Vec2::new(0.0, -6.0),
        bounds: Bounds::default(),
        enable_parallax: true,
        parallax_strength: 0.05,
        enable_click_effects: true,
        click: ClickConfig::default(),
        performance: PerformanceConfig::default(),
        accessibility: AccessibilityConfig::default(),
    };

    match preset {
        Preset::Minimal => ParticleSystemConfig {
            max_particles: 15,
            spawn_rate: 1.5,
            particle_types: vec![bubble(), dust()],
            gravity: Vec2::new(0.0, -3.0),
            enable_parallax: false,
            enable_click_effects: false,
            ..base
        },
        Preset::Balanced => base,
        Preset::Rich => ParticleSystemConfig {
            max_particles: 150,
            spawn_rate: 15.0,
            particle_types: vec![bubble(), sparkle(), dust(), petal()],
            parallax_strength: 0.08,
            click: ClickConfig {
                radius: 200.0,
                ..ClickConfig::default()
            },
            ..base
        },
    }
}

/// Parses a preset name, falling back to [`Preset::Balanced`].
#[must_use]
pub fn preset_from_name(name: &str) -> Preset {
    Preset::from_name(name).unwrap_or_else(|| {
        tracing::warn!(name, fallback = Preset::default().name(), "unknown preset");
        Preset::default()
    })
}

/// Shrinks `config` for constrained devices.
///
/// Caps particle count and spawn rate against fixed ceilings and turns
/// off pointer effects. Applying it twice changes nothing.
#[must_use]
pub fn apply_mobile_adjustments(mut config: ParticleSystemConfig) -> ParticleSystemConfig {
    config.max_particles = config.max_particles.min(MOBILE_MAX_PARTICLES);
    config.spawn_rate = config.spawn_rate.min(MOBILE_MAX_SPAWN_RATE);
    config.enable_parallax = false;
    config.enable_click_effects = false;
    config
}

/// Turns `config` into a static snapshot: nothing spawns, nothing moves.
#[must_use]
pub fn apply_reduced_motion(mut config: ParticleSystemConfig) -> ParticleSystemConfig {
    config.accessibility.static_fallback = true;
    config.spawn_rate = 0.0;
    config.max_particles = 0;
    config.enable_parallax = false;
    config.enable_click_effects = false;
    config
}

fn finite_non_negative(value: f32, field: &'static str, fallback: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::warn!(field, value, fallback, "invalid config value replaced");
        fallback
    }
}

/// Clamps out-of-range values to something the engine can run with.
///
/// Never fails: every fix is logged.
#[must_use]
pub fn validate(mut config: ParticleSystemConfig) -> ParticleSystemConfig {
    if config.max_particles > MAX_PARTICLES_LIMIT {
        tracing::warn!(
            requested = config.max_particles,
            limit = MAX_PARTICLES_LIMIT,
            "max_particles clamped"
        );
        config.max_particles = MAX_PARTICLES_LIMIT;
    }

    config.spawn_rate =
        finite_non_negative(config.spawn_rate, "spawn_rate", 0.0).min(MAX_SPAWN_RATE);
    config.parallax_strength =
        finite_non_negative(config.parallax_strength, "parallax_strength", 0.0);
    config.bounds.padding = finite_non_negative(config.bounds.padding, "padding", 0.0);

    if !config.gravity.is_finite() {
        tracing::warn!("non-finite gravity replaced with zero");
        config.gravity = Vec2::ZERO;
    }

    let click = ClickConfig::default();
    config.click.radius = finite_non_negative(config.click.radius, "click.radius", click.radius);
    config.click.strength =
        finite_non_negative(config.click.strength, "click.strength", click.strength);
    config.click.ttl = finite_non_negative(config.click.ttl, "click.ttl", click.ttl);
    if config.click.ttl > MAX_CLICK_TTL_SECS {
        tracing::warn!(
            requested = config.click.ttl,
            limit = MAX_CLICK_TTL_SECS,
            "click.ttl clamped"
        );
        config.click.ttl = MAX_CLICK_TTL_SECS;
    }

    let perf = PerformanceConfig::default();
    config.performance.reduced_frame_time_ms = finite_non_negative(
        config.performance.reduced_frame_time_ms,
        "performance.reduced_frame_time_ms",
        perf.reduced_frame_time_ms,
    );
    config.performance.critical_frame_time_ms = finite_non_negative(
        config.performance.critical_frame_time_ms,
        "performance.critical_frame_time_ms",
        perf.critical_frame_time_ms,
    )
    .max(config.performance.reduced_frame_time_ms);

    let selectable = config
        .particle_types
        .iter()
        .any(|t| t.spawn_weight.is_finite() && t.spawn_weight > 0.0);
    if !selectable && config.spawn_rate > 0.0 {
        tracing::warn!("no particle type has a positive spawn weight, nothing will spawn");
    }

    config
}

/// Builds the session snapshot: preset, overrides, validation, then host
/// adjustments.
#[must_use]
pub fn resolve(
    preset: Preset,
    overrides: &ConfigOverrides,
    host: &dyn HostSignals,
) -> ParticleSystemConfig {
    let mut config = validate(overrides.apply(create_config(preset)));

    if PerformanceMonitor::is_mobile_device(host) {
        config = apply_mobile_adjustments(config);
    }
    if config.is_static() || PerformanceMonitor::has_reduced_motion_preference(host) {
        config = apply_reduced_motion(config);
    }

    tracing::debug!(
        preset = preset.name(),
        max_particles = config.max_particles,
        spawn_rate = config.spawn_rate,
        static_fallback = config.is_static(),
        "config resolved"
    );
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_shared::StaticHostSignals;

    #[test]
    fn test_presets_are_complete() {
        for preset in Preset::ALL {
            let config = create_config(preset);
            assert_eq!(config.preset, preset);
            assert!(config.max_particles > 0);
            assert!(config.spawn_rate > 0.0);
            assert!(!config.particle_types.is_empty());
            assert!(!config.is_static());
            assert_eq!(config, create_config(preset), "deterministic");
        }
        assert!(
            create_config(Preset::Rich).max_particles > create_config(Preset::Minimal).max_particles
        );
    }

    #[test]
    fn test_unknown_preset_falls_back() {
        assert_eq!(preset_from_name("Rich"), Preset::Rich);
        assert_eq!(preset_from_name("cinematic"), Preset::Balanced);
        assert_eq!(preset_from_name(""), Preset::Balanced);
    }

    #[test]
    fn test_mobile_adjustments_idempotent() {
        let rich = create_config(Preset::Rich);
        let once = apply_mobile_adjustments(rich);
        let twice = apply_mobile_adjustments(once.clone());

        assert_eq!(once, twice);
        assert_eq!(once.max_particles, MOBILE_MAX_PARTICLES);
        assert_eq!(once.spawn_rate, MOBILE_MAX_SPAWN_RATE);
        assert!(!once.enable_parallax);
        assert!(!once.enable_click_effects);

        let minimal = apply_mobile_adjustments(create_config(Preset::Minimal));
        assert_eq!(minimal.max_particles, 15, "already below the ceiling");
    }

    #[test]
    fn test_reduced_motion_overrides_everything() {
        let config = apply_reduced_motion(create_config(Preset::Rich));
        assert!(config.is_static());
        assert_eq!(config.max_particles, 0);
        assert_eq!(config.spawn_rate, 0.0);
    }

    #[test]
    fn test_resolve_order() {
        let overrides = ConfigOverrides {
            max_particles: Some(500),
            ..ConfigOverrides::default()
        };

        let desktop = resolve(Preset::Balanced, &overrides, &StaticHostSignals::desktop());
        assert_eq!(desktop.max_particles, 500);

        let mobile = resolve(Preset::Balanced, &overrides, &StaticHostSignals::mobile());
        assert_eq!(mobile.max_particles, MOBILE_MAX_PARTICLES);

        let reduced = StaticHostSignals::mobile().with_reduced_motion(true);
        assert!(resolve(Preset::Balanced, &overrides, &reduced).is_static());

        // No signals at all behaves like a desktop without preferences
        let unknown = resolve(
            Preset::Balanced,
            &ConfigOverrides::default(),
            &StaticHostSignals::default(),
        );
        assert_eq!(unknown, create_config(Preset::Balanced));
    }

    #[test]
    fn test_overrides_from_toml() {
        let overrides = ConfigOverrides::from_toml_str(
            r#"
            max_particles = 40
            spawn_rate = 4.5
            enable_click_effects = false
            gravity = { x = 0.0, y = -12.0 }
            "#,
        )
        .unwrap();

        assert_eq!(overrides.max_particles, Some(40));
        assert_eq!(overrides.gravity, Some(Vec2::new(0.0, -12.0)));
        assert!(!overrides.is_empty());

        let config = overrides.apply(create_config(Preset::Balanced));
        assert_eq!(config.spawn_rate, 4.5);
        assert!(!config.enable_click_effects);
        assert!(config.enable_parallax);

        assert!(ConfigOverrides::from_toml_str("max_particles = \"many\"").is_err());
        assert!(ConfigOverrides::from_toml_str("warp_speed = 9").is_err());
        assert!(ConfigOverrides::from_toml_str("").unwrap().is_empty());
    }

    #[test]
    fn test_validation_clamps() {
        let overrides = ConfigOverrides {
            max_particles: Some(1_000_000),
            spawn_rate: Some(f32::NAN),
            padding: Some(-10.0),
            gravity: Some(Vec2::new(f32::INFINITY, 0.0)),
            ..ConfigOverrides::default()
        };
        let config = validate(overrides.apply(create_config(Preset::Balanced)));

        assert_eq!(config.max_particles, MAX_PARTICLES_LIMIT);
        assert_eq!(config.spawn_rate, 0.0);
        assert_eq!(config.bounds.padding, 0.0);
        assert_eq!(config.gravity, Vec2::ZERO);
    }

    #[test]
    fn test_extreme_click_ttl_is_clamped() {
        let overrides = ConfigOverrides::from_toml_str(
            "click = { radius = 150.0, strength = 900.0, ttl = 1e30 }",
        )
        .unwrap();
        let config = resolve(Preset::Balanced, &overrides, &StaticHostSignals::desktop());
        assert_eq!(config.click.ttl, MAX_CLICK_TTL_SECS);
    }

    #[test]
    fn test_missing_overrides_file() {
        let err = ConfigOverrides::from_toml_file("/nonexistent/aurora.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
