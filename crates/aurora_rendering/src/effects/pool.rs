//! # Particle Pool
//!
//! Pairs of (visual element, particle) created once per session.
//!
//! Capacity is `2 × max_particles`: a frame can retire and spawn a full
//! cap's worth of particles without ever waiting for slots. The spawner's
//! cap, not the pool, is what bounds the active count.

use aurora_core::{SlotHandle, SlotPool};
use aurora_shared::ParticleKind;
use aurora_ui::LifeEnvelope;

use super::Particle;
use crate::surface::{RenderSurface, VisualElement};

/// One pool slot: a reusable element and the particle it displays.
#[derive(Debug)]
pub struct PooledSlot<E> {
    /// The visual handle, created once from the surface.
    pub element: E,
    /// The particle record; stale/cleared while the slot is idle.
    pub particle: Particle,
}

/// Fixed-capacity reuse pool of element/particle pairs.
pub struct ParticlePool<E: VisualElement> {
    slots: SlotPool<PooledSlot<E>>,
    next_id: u64,
    envelope: LifeEnvelope,
    torn_down: bool,
}

impl<E: VisualElement> ParticlePool<E> {
    /// Creates `2 × max_particles` hidden elements on `surface`.
    ///
    /// This is the only place the pool allocates.
    pub fn new<S>(surface: &mut S, max_particles: usize) -> Self
    where
        S: RenderSurface<Element = E>,
    {
        let capacity = max_particles.saturating_mul(2);
        let slots = SlotPool::from_fn(capacity, |index| {
            let mut element = surface.create_element(index);
            element.hide();
            PooledSlot {
                element,
                particle: Particle::new(ParticleKind::Dust),
            }
        });

        tracing::debug!(capacity, max_particles, "particle pool created");

        Self {
            slots,
            next_id: 1,
            envelope: LifeEnvelope::default(),
            torn_down: false,
        }
    }

    /// Total slots. Fixed for the life of the pool.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Slots currently holding an active particle.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.slots.active_count()
    }

    /// Takes an idle slot and reinitializes its particle as a fresh `kind`.
    ///
    /// Returns `None` when every slot is busy. That is not an error: the
    /// caller skips spawning this frame.
    pub fn acquire(&mut self, kind: ParticleKind) -> Option<SlotHandle> {
        if self.torn_down {
            return None;
        }
        let (handle, slot) = self.slots.acquire()?;

        let id = self.next_id;
        self.next_id += 1;

        slot.particle = Particle {
            id,
            is_active: true,
            slot: Some(handle),
            ..Particle::new(kind)
        };
        Some(handle)
    }

    /// Acquires a slot and copies `template`'s state into it.
    pub fn acquire_with(&mut self, template: &Particle) -> Option<SlotHandle> {
        let handle = self.acquire(template.kind)?;
        if let Some(slot) = self.slots.get_mut(handle) {
            slot.particle.respawn_from(template);
        }
        Some(handle)
    }

    /// Returns a slot to the idle set, clearing its particle and hiding its element.
    ///
    /// Releasing an idle slot is a caller bug: it is logged and ignored,
    /// and `false` is returned.
    pub fn release(&mut self, handle: SlotHandle) -> bool {
        match self.slots.release(handle) {
            Some(slot) => {
                slot.particle.clear();
                slot.element.hide();
                true
            }
            None => {
                tracing::warn!(slot = handle.index(), "release of an idle particle slot ignored");
                false
            }
        }
    }

    /// Pushes the particle's current state into its element.
    pub fn update_element(&mut self, handle: SlotHandle) {
        let envelope = self.envelope;
        if let Some(slot) = self.slots.get_mut(handle) {
            let state = slot.particle.element_state(envelope);
            slot.element.apply(&state);
        }
    }

    /// Active particle in `handle`'s slot.
    #[must_use]
    pub fn particle(&self, handle: SlotHandle) -> Option<&Particle> {
        self.slots.get(handle).map(|slot| &slot.particle)
    }

    /// Active particle in `handle`'s slot, mutably.
    pub fn particle_mut(&mut self, handle: SlotHandle) -> Option<&mut Particle> {
        self.slots.get_mut(handle).map(|slot| &mut slot.particle)
    }

    /// Element of an active slot.
    #[must_use]
    pub fn element(&self, handle: SlotHandle) -> Option<&E> {
        self.slots.get(handle).map(|slot| &slot.element)
    }

    /// Releases every slot and detaches every element. Idempotent.
    pub fn cleanup(&mut self) {
        if self.torn_down {
            return;
        }
        let mut released = 0_usize;
        self.slots.reset(
            |slot| {
                slot.particle.clear();
                slot.element.hide();
                released += 1;
            },
            |slot| slot.element.detach(),
        );
        self.torn_down = true;
        tracing::debug!(released, capacity = self.capacity(), "particle pool torn down");
    }

    /// True after [`cleanup`](Self::cleanup).
    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}
