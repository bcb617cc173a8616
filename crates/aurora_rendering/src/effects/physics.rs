//! # Particle Physics
//!
//! Pure functions over a single particle. No randomness, no clocks: the
//! same inputs always produce the same outputs.
//!
//! Integration is semi-implicit Euler:
//!
//! ```text
//! a  = gravity + Σ forces
//! v' = v + a·dt
//! p' = p + v'·dt
//! ```

use aurora_shared::{Bounds, Vec2};

use super::Particle;

/// Size at which a particle receives the full parallax weight.
const REFERENCE_SIZE: f32 = 16.0;

/// Depth factor range: small particles read as far away, large as near.
const MIN_DEPTH: f32 = 0.25;
const MAX_DEPTH: f32 = 1.5;

/// Advances `particle` by `dt` seconds.
///
/// `forces` are extra accelerations for this step only (parallax, clicks).
/// A zero, negative or non-finite `dt` leaves position and velocity
/// untouched. Returns true when the particle should be retired.
pub fn update_particle(
    particle: &mut Particle,
    dt: f32,
    bounds: Bounds,
    gravity: Vec2,
    forces: &[Vec2],
) -> bool {
    if dt > 0.0 && dt.is_finite() {
        let acceleration = gravity + forces.iter().copied().sum::<Vec2>();
        if acceleration.is_finite() {
            particle.acceleration = acceleration;
            particle.velocity += acceleration * dt;
            particle.position += particle.velocity * dt;
        }
        particle.age += dt;
    }

    is_particle_expired(particle, bounds)
}

/// True once the particle has left the padded bounds.
///
/// The padding edge itself counts as outside.
#[must_use]
pub fn is_particle_out_of_bounds(particle: &Particle, bounds: Bounds) -> bool {
    let Vec2 { x, y } = particle.position;
    let pad = bounds.padding;

    !particle.position.is_finite()
        || x <= -pad
        || y <= -pad
        || x >= bounds.width + pad
        || y >= bounds.height + pad
}

/// True when the particle should be retired: out of bounds or past its
/// lifetime.
#[must_use]
pub fn is_particle_expired(particle: &Particle, bounds: Bounds) -> bool {
    particle.is_lifetime_elapsed() || is_particle_out_of_bounds(particle, bounds)
}

/// Steering acceleration contributed by the pointer parallax `offset`.
///
/// Larger particles move more, which reads as depth.
#[must_use]
pub fn apply_parallax_to_particle(particle: &Particle, offset: Vec2, weight: f32) -> Vec2 {
    if !weight.is_finite() || !offset.is_finite() {
        return Vec2::ZERO;
    }
    let depth = (particle.size / REFERENCE_SIZE).clamp(MIN_DEPTH, MAX_DEPTH);
    if depth.is_nan() {
        return Vec2::ZERO;
    }
    offset * (weight * depth)
}
