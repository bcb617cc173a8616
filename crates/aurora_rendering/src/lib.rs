//! # AURORA Rendering
//!
//! Everything that happens to a particle between spawn and retirement.
//!
//! ## Features
//!
//! - **Particle pool**: `2 × max_particles` reusable element/particle slots
//! - **Spawner**: rate-limited, weighted, seedable
//! - **Physics**: semi-implicit Euler with gravity and steering forces
//! - **Performance monitor**: background sampling, discrete degradation levels
//! - **Surface seam**: any renderer implementing [`RenderSurface`]
//!
//! ## Frame
//!
//! ```text
//! Spawner ──► ParticlePool::acquire_with ──► physics::update_particle
//!                                                   │
//!                  ParticlePool::release ◄── expired? ──► update_element
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod effects;
pub mod pipeline;
pub mod surface;

pub use effects::{
    apply_parallax_to_particle, is_particle_expired, is_particle_out_of_bounds, update_particle,
    Particle, ParticlePool, PooledSlot, Spawner,
};
pub use pipeline::{
    DegradationLevel, FrameStats, ListenerId, MonitorError, MonitorResult, PerformanceMetrics,
    PerformanceMonitor, SessionStats,
};
pub use surface::{ElementState, HeadlessElement, HeadlessSurface, RenderSurface, VisualElement};
