//! Configuration snapshot data.
//!
//! A [`ParticleSystemConfig`] is built once per session (see the
//! `aurora::config` factory) and is never mutated while the session runs.
//! Changing anything means stop + re-initialize.

use serde::{Deserialize, Serialize};

use crate::host::SurfaceSize;
use crate::math::Vec2;

/// Named, complete default configurations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// A handful of slow particles.
    Minimal,
    /// The default look.
    #[default]
    Balanced,
    /// Dense, every effect enabled.
    Rich,
}

impl Preset {
    /// All presets, in ascending cost.
    pub const ALL: [Self; 3] = [Self::Minimal, Self::Balanced, Self::Rich];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Balanced => "balanced",
            Self::Rich => "rich",
        }
    }

    /// Parses a preset name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
    }
}

/// Visual family of a particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    /// Soft round bubble drifting upwards.
    Bubble,
    /// Small bright short-lived spark.
    Sparkle,
    /// Faint dust mote.
    Dust,
    /// Falling petal.
    Petal,
}

impl ParticleKind {
    /// Lowercase name, used as a style class by renderers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Sparkle => "sparkle",
            Self::Dust => "dust",
            Self::Petal => "petal",
        }
    }
}

/// Where a new particle of a type appears.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnRegion {
    /// Along the bottom edge, just inside the surface.
    #[default]
    Bottom,
    /// Along the top edge, just inside the surface.
    Top,
    /// Anywhere inside the surface.
    Anywhere,
}

/// Closed interval a random parameter is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Lower bound (inclusive)
    pub min: f32,
    /// Upper bound (inclusive)
    pub max: f32,
}

impl ValueRange {
    /// Creates a new range
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A degenerate range that always yields `value`.
    #[must_use]
    pub const fn fixed(value: f32) -> Self {
        Self::new(value, value)
    }

    /// Maps `t` in `[0, 1]` onto the range.
    #[must_use]
    pub fn lerp(self, t: f32) -> f32 {
        self.min + (self.max - self.min) * t.clamp(0.0, 1.0)
    }

    /// Returns the range with non-finite bounds replaced by `fallback`,
    /// bounds ordered, and both clamped to `floor`.
    #[must_use]
    pub fn sanitized(self, floor: f32, fallback: f32) -> Self {
        let fix = |v: f32| if v.is_finite() { v.max(floor) } else { fallback };
        let (a, b) = (fix(self.min), fix(self.max));
        Self::new(a.min(b), a.max(b))
    }
}

/// Visual and physical parameters for one particle type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleTypeConfig {
    /// Type identifier
    pub kind: ParticleKind,
    /// Relative spawn weight (need not sum to 1 across types)
    pub spawn_weight: f32,
    /// Spawn location
    pub spawn_region: SpawnRegion,
    /// Diameter in pixels
    pub size: ValueRange,
    /// Initial speed in pixels/second
    pub speed: ValueRange,
    /// Initial heading in radians (0 = right, π/2 = down)
    pub direction: ValueRange,
    /// Base opacity in `[0, 1]`
    pub opacity: ValueRange,
    /// RGBA color, components in `[0, 1]`
    pub color: [f32; 4],
    /// Lifetime in seconds; `None` lives until it leaves the bounds
    pub lifetime: Option<f32>,
}

/// Active region for particles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Surface width in pixels
    pub width: f32,
    /// Surface height in pixels
    pub height: f32,
    /// Extra margin outside the surface before a particle is retired
    pub padding: f32,
}

impl Bounds {
    /// Creates new bounds
    #[must_use]
    pub const fn new(width: f32, height: f32, padding: f32) -> Self {
        Self { width, height, padding }
    }

    /// Bounds matching a measured surface, keeping `padding`.
    #[must_use]
    pub const fn with_size(self, size: SurfaceSize) -> Self {
        Self::new(size.width, size.height, self.padding)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 50.0)
    }
}

/// Pointer click impulse tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClickConfig {
    /// Radius of influence in pixels
    pub radius: f32,
    /// Peak impulse, pixels/s²
    pub strength: f32,
    /// Time-to-live in seconds
    pub ttl: f32,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            radius: 150.0,
            strength: 900.0,
            ttl: 0.6,
        }
    }
}

/// Performance sampling thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Sampling timer period in milliseconds
    pub sample_interval_ms: u64,
    /// Smoothed frame time (ms) at or above which quality is `Reduced`
    pub reduced_frame_time_ms: f32,
    /// Smoothed frame time (ms) at or above which quality is `Critical`
    pub critical_frame_time_ms: f32,
    /// Weight of the newest frame in the exponential moving average
    pub smoothing: f32,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 1000,
            reduced_frame_time_ms: 22.0, // below ~45 fps
            critical_frame_time_ms: 40.0, // below 25 fps
            smoothing: 0.1,
        }
    }
}

/// Accessibility switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityConfig {
    /// Render nothing dynamic.
    pub static_fallback: bool,
}

/// Complete, immutable configuration for one animation session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleSystemConfig {
    /// Preset this snapshot was built from
    pub preset: Preset,
    /// Hard cap on simultaneously active particles
    pub max_particles: usize,
    /// Target particles created per second
    pub spawn_rate: f32,
    /// Spawnable particle types, in order
    pub particle_types: Vec<ParticleTypeConfig>,
    /// Constant acceleration, pixels/s² (positive y is down)
    pub gravity: Vec2,
    /// Active region
    pub bounds: Bounds,
    /// Steer particles toward the pointer
    pub enable_parallax: bool,
    /// Parallax steering strength per pixel of distance
    pub parallax_strength: f32,
    /// Push particles away from clicks
    pub enable_click_effects: bool,
    /// Click impulse tuning
    pub click: ClickConfig,
    /// Performance sampling thresholds
    pub performance: PerformanceConfig,
    /// Accessibility switches
    pub accessibility: AccessibilityConfig,
}

impl ParticleSystemConfig {
    /// Number of pool slots: twice the particle cap.
    #[must_use]
    pub const fn pool_capacity(&self) -> usize {
        self.max_particles.saturating_mul(2)
    }

    /// True when this snapshot renders nothing dynamic.
    #[must_use]
    pub const fn is_static(&self) -> bool {
        self.accessibility.static_fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(Preset::from_name(preset.name()), Some(preset));
        }
        assert_eq!(Preset::from_name("  RICH "), Some(Preset::Rich));
        assert_eq!(Preset::from_name("cinematic"), None);
    }

    #[test]
    fn test_range_sanitized() {
        let range = ValueRange::new(5.0, f32::NAN).sanitized(0.0, 1.0);
        assert_eq!(range, ValueRange::new(1.0, 5.0));

        let negative = ValueRange::new(-3.0, -1.0).sanitized(0.0, 1.0);
        assert_eq!(negative, ValueRange::fixed(0.0));
    }

    #[test]
    fn test_range_lerp_clamps() {
        let range = ValueRange::new(10.0, 20.0);
        assert_eq!(range.lerp(0.5), 15.0);
        assert_eq!(range.lerp(2.0), 20.0);
    }
}
