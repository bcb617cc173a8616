//! # Spawner
//!
//! Decides when a particle appears, which type it is, and where.
//!
//! Rate limiting is an accumulator: every frame adds `spawn_rate × dt` to
//! a carry and each spawn consumes one unit. Over any window the number of
//! spawns tracks `spawn_rate × elapsed` within one particle, regardless of
//! frame rate.

use aurora_shared::{Bounds, ParticleTypeConfig, SpawnRegion, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::Particle;

/// Seedable particle source. One per session.
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: ChaCha8Rng,
    carry: f32,
}

impl Spawner {
    /// Creates a spawner. Equal seeds give equal particle streams.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            carry: 0.0,
        }
    }

    /// Returns true if one more particle should be spawned now.
    ///
    /// `dt` is credited to the accumulator before the check; callers that
    /// loop within one frame pass the frame delta on the first call and
    /// zero afterwards. At or above `max` the answer is always false and
    /// the carry is dropped, so freeing capacity never releases a burst.
    pub fn should_spawn_particle(
        &mut self,
        active: usize,
        max: usize,
        spawn_rate: f32,
        dt: f32,
    ) -> bool {
        if active >= max || !(spawn_rate.is_finite() && spawn_rate > 0.0) {
            self.carry = 0.0;
            return false;
        }

        if dt > 0.0 && dt.is_finite() {
            #[allow(clippy::cast_precision_loss)]
            let ceiling = max as f32;
            self.carry = (self.carry + spawn_rate * dt).min(ceiling);
        }

        if self.carry >= 1.0 {
            self.carry -= 1.0;
            true
        } else {
            false
        }
    }

    /// Picks a type with probability proportional to its spawn weight.
    ///
    /// Weights that are not finite or not positive never win. Returns
    /// `None` when no type is selectable.
    pub fn select_particle_type<'a>(
        &mut self,
        types: &'a [ParticleTypeConfig],
    ) -> Option<&'a ParticleTypeConfig> {
        let usable = |t: &&ParticleTypeConfig| t.spawn_weight.is_finite() && t.spawn_weight > 0.0;

        let total: f32 = types.iter().filter(usable).map(|t| t.spawn_weight).sum();
        if !(total.is_finite() && total > 0.0) {
            return None;
        }

        let mut roll = self.rng.gen::<f32>() * total;
        let mut last = None;
        for candidate in types.iter().filter(usable) {
            if roll < candidate.spawn_weight {
                return Some(candidate);
            }
            roll -= candidate.spawn_weight;
            last = Some(candidate);
        }
        // Float rounding can leave a sliver past the final weight
        last
    }

    /// Builds the initial state of a particle of type `config`.
    ///
    /// The result is a template: it has no id and no slot until the pool
    /// copies it into one.
    pub fn create_particle(&mut self, config: &ParticleTypeConfig, bounds: Bounds) -> Particle {
        let width = bounds.width.max(0.0);
        let height = bounds.height.max(0.0);

        let x = self.rng.gen::<f32>() * width;
        let y = match config.spawn_region {
            SpawnRegion::Bottom => height,
            SpawnRegion::Top => 0.0,
            SpawnRegion::Anywhere => self.rng.gen::<f32>() * height,
        };

        let size = config.size.sanitized(0.0, 1.0);
        let speed = config.speed.sanitized(0.0, 0.0);
        let direction = config.direction.sanitized(f32::MIN, 0.0);
        let opacity = config.opacity.sanitized(0.0, 1.0);

        let heading = direction.lerp(self.rng.gen());
        let velocity = Vec2::from_angle(heading) * speed.lerp(self.rng.gen());

        Particle {
            position: Vec2::new(x, y),
            velocity,
            size: size.lerp(self.rng.gen()),
            opacity: opacity.lerp(self.rng.gen()).min(1.0),
            color: config.color,
            lifetime: config.lifetime.filter(|life| life.is_finite()),
            ..Particle::new(config.kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_shared::{ParticleKind, ValueRange};

    fn kind(kind: ParticleKind, weight: f32) -> ParticleTypeConfig {
        ParticleTypeConfig {
            kind,
            spawn_weight: weight,
            spawn_region: SpawnRegion::Bottom,
            size: ValueRange::new(4.0, 8.0),
            speed: ValueRange::new(10.0, 20.0),
            direction: ValueRange::fixed(-std::f32::consts::FRAC_PI_2),
            opacity: ValueRange::new(0.2, 0.6),
            color: [1.0; 4],
            lifetime: None,
        }
    }

    #[test]
    fn test_never_spawns_at_capacity() {
        let mut spawner = Spawner::new(1);
        for _ in 0..100 {
            assert!(!spawner.should_spawn_particle(10, 10, 1000.0, 0.1));
        }
        // No stored burst once capacity frees up
        assert!(!spawner.should_spawn_particle(9, 10, 1.0, 0.0));
    }

    #[test]
    fn test_rate_tracks_elapsed_time() {
        let mut spawner = Spawner::new(1);
        let dt = 1.0 / 60.0;
        let mut spawned = 0_usize;
        for _ in 0..600 {
            let mut step = dt;
            while spawner.should_spawn_particle(spawned, 1000, 5.0, step) {
                spawned += 1;
                step = 0.0;
            }
        }
        // 10 seconds at 5/s
        assert!((49..=50).contains(&spawned), "spawned {spawned}");
    }

    #[test]
    fn test_zero_rate_never_spawns() {
        let mut spawner = Spawner::new(1);
        assert!(!spawner.should_spawn_particle(0, 10, 0.0, 10.0));
        assert!(!spawner.should_spawn_particle(0, 10, f32::NAN, 10.0));
    }

    #[test]
    fn test_weighted_selection() {
        let types = [kind(ParticleKind::Bubble, 3.0), kind(ParticleKind::Sparkle, 1.0)];
        let mut spawner = Spawner::new(42);

        let bubbles = (0..10_000)
            .filter(|_| spawner.select_particle_type(&types).unwrap().kind == ParticleKind::Bubble)
            .count();
        assert!((7_200..=7_800).contains(&bubbles), "bubbles {bubbles}");
    }

    #[test]
    fn test_unusable_weights_ignored() {
        let types = [
            kind(ParticleKind::Bubble, 0.0),
            kind(ParticleKind::Dust, f32::NAN),
            kind(ParticleKind::Petal, 2.0),
        ];
        let mut spawner = Spawner::new(3);
        for _ in 0..100 {
            assert_eq!(spawner.select_particle_type(&types).unwrap().kind, ParticleKind::Petal);
        }

        assert!(spawner.select_particle_type(&[]).is_none());
        assert!(spawner.select_particle_type(&types[..2]).is_none());
    }

    #[test]
    fn test_create_particle_ranges() {
        let config = kind(ParticleKind::Bubble, 1.0);
        let bounds = Bounds::new(400.0, 300.0, 20.0);
        let mut spawner = Spawner::new(5);

        for _ in 0..200 {
            let particle = spawner.create_particle(&config, bounds);
            assert!((0.0..=400.0).contains(&particle.position.x));
            assert_eq!(particle.position.y, 300.0);
            assert!((4.0..=8.0).contains(&particle.size));
            assert!((0.2..=0.6).contains(&particle.opacity));
            assert!(particle.velocity.y < 0.0, "bubbles rise");
            assert!(!particle.is_active);
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let config = kind(ParticleKind::Dust, 1.0);
        let bounds = Bounds::default();
        let mut a = Spawner::new(9);
        let mut b = Spawner::new(9);
        for _ in 0..20 {
            assert_eq!(a.create_particle(&config, bounds), b.create_particle(&config, bounds));
        }
    }
}
