//! Easing curves for decaying effects and particle fades.
//!
//! Effects are SHARP, not soft: click impulses use exponential curves so
//! most of the push happens in the first few frames.

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Exponential ease-out (snaps to the end value).
    #[default]
    ExponentialOut,
    /// Quadratic ease-out.
    QuadraticOut,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::ExponentialOut => {
                // 1 - 2^(-10t)
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Self::QuadraticOut => t * (2.0 - t),
        }
    }

    /// Strength left after `elapsed` of `duration`: 1 at the start, 0 at the end.
    #[must_use]
    pub fn remaining(self, elapsed: f32, duration: f32) -> f32 {
        if duration <= 0.0 || !duration.is_finite() {
            return 0.0;
        }
        1.0 - self.apply(elapsed / duration)
    }
}

/// Opacity envelope over a particle's life.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifeEnvelope {
    /// Seconds to fade in after spawning.
    pub fade_in: f32,
    /// Trailing fraction of the lifetime spent fading out.
    pub fade_out_fraction: f32,
}

impl Default for LifeEnvelope {
    fn default() -> Self {
        Self {
            fade_in: 0.4,
            fade_out_fraction: 0.25,
        }
    }
}

impl LifeEnvelope {
    /// Opacity multiplier in `[0, 1]` at `age` seconds.
    ///
    /// Particles without a lifetime only fade in.
    #[must_use]
    pub fn factor(self, age: f32, lifetime: Option<f32>) -> f32 {
        let fade_in = if self.fade_in > 0.0 {
            Easing::QuadraticOut.apply(age / self.fade_in)
        } else {
            1.0
        };

        let fade_out = match lifetime {
            Some(life) if life > 0.0 && self.fade_out_fraction > 0.0 => {
                let window = life * self.fade_out_fraction;
                let left = life - age;
                if left >= window {
                    1.0
                } else {
                    Easing::Linear.apply(left / window)
                }
            }
            Some(_) => 0.0,
            None => 1.0,
        };

        fade_in.min(fade_out)
    }
}
