//! Host capability signals and surface geometry.
//!
//! The engine never queries the environment directly. Everything it knows
//! about the device and the user's preferences comes through [`HostSignals`],
//! so tests can substitute any combination.

use serde::{Deserialize, Serialize};

/// Measured size of the rendering surface, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl SurfaceSize {
    /// Creates a new surface size
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A surface the engine can draw on: finite and strictly positive.
    #[must_use]
    pub fn is_usable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Capability probes supplied by the host page.
///
/// `None` means the host cannot answer (no media-query support, no user
/// agent hints). Callers treat a missing signal as `false`.
pub trait HostSignals: Send + Sync {
    /// Is this a constrained (mobile / low-power) device?
    fn is_constrained_device(&self) -> Option<bool>;

    /// Has the user asked for reduced motion?
    fn prefers_reduced_motion(&self) -> Option<bool>;

    /// Can the surface receive pointer (mouse) events?
    fn has_pointer(&self) -> Option<bool> {
        Some(true)
    }
}

/// Fixed answers, for tests and headless runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StaticHostSignals {
    /// Answer for [`HostSignals::is_constrained_device`].
    pub constrained_device: Option<bool>,
    /// Answer for [`HostSignals::prefers_reduced_motion`].
    pub reduced_motion: Option<bool>,
    /// Answer for [`HostSignals::has_pointer`].
    pub pointer: Option<bool>,
}

impl StaticHostSignals {
    /// A desktop with a mouse and no accessibility preference.
    #[must_use]
    pub const fn desktop() -> Self {
        Self {
            constrained_device: Some(false),
            reduced_motion: Some(false),
            pointer: Some(true),
        }
    }

    /// A touch-only phone.
    #[must_use]
    pub const fn mobile() -> Self {
        Self {
            constrained_device: Some(true),
            reduced_motion: Some(false),
            pointer: Some(false),
        }
    }

    /// Sets the reduced motion answer.
    #[must_use]
    pub const fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = Some(reduced);
        self
    }
}

impl HostSignals for StaticHostSignals {
    fn is_constrained_device(&self) -> Option<bool> {
        self.constrained_device
    }

    fn prefers_reduced_motion(&self) -> Option<bool> {
        self.reduced_motion
    }

    fn has_pointer(&self) -> Option<bool> {
        self.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_usable() {
        assert!(SurfaceSize::new(800.0, 600.0).is_usable());
        assert!(!SurfaceSize::new(0.0, 600.0).is_usable());
        assert!(!SurfaceSize::new(f32::NAN, 600.0).is_usable());
    }

    #[test]
    fn test_static_signals() {
        let host = StaticHostSignals::desktop().with_reduced_motion(true);
        assert_eq!(host.prefers_reduced_motion(), Some(true));
        assert_eq!(host.is_constrained_device(), Some(false));
        assert_eq!(StaticHostSignals::default().has_pointer(), None);
    }
}
