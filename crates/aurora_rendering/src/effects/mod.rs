//! # Particle Effects
//!
//! This module provides:
//! - `Particle` - The plain data of one animated element
//! - `ParticlePool` - Fixed-capacity element/particle slots
//! - `Spawner` - Rate limiting, weighted type selection, initial state
//! - `physics` - Integration, bounds and parallax helpers
//!
//! Performance target: O(active) per frame, zero allocations once running

mod particle;
mod physics;
mod pool;
mod spawner;

pub use particle::Particle;
pub use physics::{
    apply_parallax_to_particle, is_particle_expired, is_particle_out_of_bounds, update_particle,
};
pub use pool::{ParticlePool, PooledSlot};
pub use spawner::Spawner;
