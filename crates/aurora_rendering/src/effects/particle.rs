//! The particle record.

use aurora_core::SlotHandle;
use aurora_shared::{ParticleKind, Vec2};
use aurora_ui::LifeEnvelope;

use crate::surface::ElementState;

/// One animated element and its physical state.
///
/// Owned by the pool slot that issued it. Outside the pool it only exists
/// as a template produced by the spawner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Unique among active particles (monotonic per pool)
    pub id: u64,
    /// Particle type
    pub kind: ParticleKind,
    /// Center, surface coordinates
    pub position: Vec2,
    /// Pixels per second
    pub velocity: Vec2,
    /// Net acceleration applied in the last update, pixels/s²
    pub acceleration: Vec2,
    /// Diameter in pixels
    pub size: f32,
    /// Base opacity in `[0, 1]`
    pub opacity: f32,
    /// RGBA color
    pub color: [f32; 4],
    /// Seconds since spawn
    pub age: f32,
    /// Seconds to live, `None` = until out of bounds
    pub lifetime: Option<f32>,
    /// Set while the particle owns its slot
    pub is_active: bool,
    /// Back-reference to the slot holding the visual element
    pub slot: Option<SlotHandle>,
}

impl Particle {
    /// A cleared, inactive particle of `kind`.
    #[must_use]
    pub const fn new(kind: ParticleKind) -> Self {
        Self {
            id: 0,
            kind,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            size: 0.0,
            opacity: 0.0,
            color: [0.0; 4],
            age: 0.0,
            lifetime: None,
            is_active: false,
            slot: None,
        }
    }

    /// Resets to a cleared, inactive state, keeping only the kind.
    pub fn clear(&mut self) {
        *self = Self::new(self.kind);
    }

    /// Copies the physical and visual state of `template`, keeping this
    /// particle's identity (id, slot, active flag).
    pub fn respawn_from(&mut self, template: &Self) {
        self.kind = template.kind;
        self.position = template.position;
        self.velocity = template.velocity;
        self.acceleration = Vec2::ZERO;
        self.size = template.size;
        self.opacity = template.opacity;
        self.color = template.color;
        self.age = 0.0;
        self.lifetime = template.lifetime;
    }

    /// True once the type-specific lifetime has run out.
    #[must_use]
    pub fn is_lifetime_elapsed(&self) -> bool {
        self.lifetime.is_some_and(|life| self.age >= life)
    }

    /// What the renderer should draw right now.
    #[must_use]
    pub fn element_state(&self, envelope: LifeEnvelope) -> ElementState {
        ElementState {
            position: self.position,
            size: self.size,
            opacity: (self.opacity * envelope.factor(self.age, self.lifetime)).clamp(0.0, 1.0),
            color: self.color,
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_respawn_keeps_identity() {
        let mut particle = Particle::new(ParticleKind::Dust);
        particle.id = 7;
        particle.is_active = true;
        particle.age = 3.0;

        let mut template = Particle::new(ParticleKind::Bubble);
        template.position = Vec2::new(5.0, 6.0);
        template.size = 12.0;
        template.lifetime = Some(2.0);

        particle.respawn_from(&template);
        assert_eq!(particle.id, 7);
        assert!(particle.is_active);
        assert_eq!(particle.kind, ParticleKind::Bubble);
        assert_eq!(particle.position, Vec2::new(5.0, 6.0));
        assert_eq!(particle.age, 0.0);
    }

    #[test]
    fn test_lifetime_elapsed() {
        let mut particle = Particle::new(ParticleKind::Sparkle);
        assert!(!particle.is_lifetime_elapsed());

        particle.lifetime = Some(1.0);
        particle.age = 0.99;
        assert!(!particle.is_lifetime_elapsed());
        particle.age = 1.0;
        assert!(particle.is_lifetime_elapsed());
    }

    #[test]
    fn test_element_state_applies_envelope() {
        let mut particle = Particle::new(ParticleKind::Bubble);
        particle.opacity = 0.8;
        particle.age = 10.0;

        let state = particle.element_state(LifeEnvelope::default());
        assert!((state.opacity - 0.8).abs() < 1e-6);

        particle.age = 0.0;
        assert_eq!(particle.element_state(LifeEnvelope::default()).opacity, 0.0);
    }
}
