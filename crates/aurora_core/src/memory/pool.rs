//! # Slot Pool
//!
//! Fixed-capacity arena of reusable slots with an explicit active flag.

/// A pool of pre-constructed, reusable slots.
///
/// Unlike a plain allocator, every slot holds a live `T` for the whole
/// lifetime of the pool: acquiring a slot hands out an existing value to be
/// reinitialized, releasing it marks it idle again. Nothing is constructed
/// or dropped between `from_fn` and the pool's own drop.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. It is owned by one frame loop.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool = SlotPool::from_fn(100, |_| Sprite::default());
///
/// // Acquire - O(1), no heap allocation
/// let (handle, sprite) = pool.acquire()?;
/// sprite.reset();
///
/// // Release - O(1), the sprite stays in its slot
/// pool.release(handle);
/// ```
pub struct SlotPool<T> {
    /// The slot storage. Never resized.
    slots: Box<[T]>,
    /// Active flag per slot.
    active: Box<[bool]>,
    /// Indices of idle slots. Pre-allocated to full capacity.
    free_list: Vec<usize>,
    /// Number of active slots.
    active_count: usize,
}

/// Handle to a slot in a [`SlotPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotHandle {
    /// Index into the pool.
    index: usize,
}

impl SlotHandle {
    /// Returns the slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

impl<T> SlotPool<T> {
    /// Creates a pool of `capacity` slots, building each with `init(index)`.
    ///
    /// All memory is allocated here and nowhere else. A capacity of zero
    /// is valid: every acquire then returns `None`.
    #[must_use]
    pub fn from_fn(capacity: usize, mut init: impl FnMut(usize) -> T) -> Self {
        let slots: Vec<T> = (0..capacity).map(&mut init).collect();

        // Reversed so the lowest index is handed out first
        let free_list: Vec<usize> = (0..capacity).rev().collect();

        Self {
            slots: slots.into_boxed_slice(),
            active: vec![false; capacity].into_boxed_slice(),
            free_list,
            active_count: 0,
        }
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of currently active slots.
    #[inline]
    #[must_use]
    pub const fn active_count(&self) -> usize {
        self.active_count
    }

    /// Returns true if the handle refers to an active slot.
    #[inline]
    #[must_use]
    pub fn is_active(&self, handle: SlotHandle) -> bool {
        self.active.get(handle.index).copied().unwrap_or(false)
    }

    /// Marks an idle slot active and returns it.
    ///
    /// This is a **O(1)** operation with **zero heap allocations**.
    /// Returns `None` when every slot is in use.
    pub fn acquire(&mut self) -> Option<(SlotHandle, &mut T)> {
        let index = self.free_list.pop()?;

        self.active[index] = true;
        self.active_count += 1;

        Some((SlotHandle { index }, &mut self.slots[index]))
    }

    /// Marks an active slot idle and returns it for clearing.
    ///
    /// Returns `None` for an out-of-range handle or a slot that is already
    /// idle; the pool is left untouched in that case.
    pub fn release(&mut self, handle: SlotHandle) -> Option<&mut T> {
        if !self.is_active(handle) {
            return None;
        }

        self.active[handle.index] = false;
        self.active_count -= 1;
        self.free_list.push(handle.index);

        Some(&mut self.slots[handle.index])
    }

    /// Gets an active slot.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: SlotHandle) -> Option<&T> {
        if self.is_active(handle) {
            self.slots.get(handle.index)
        } else {
            None
        }
    }

    /// Gets an active slot mutably.
    #[inline]
    pub fn get_mut(&mut self, handle: SlotHandle) -> Option<&mut T> {
        if self.is_active(handle) {
            self.slots.get_mut(handle.index)
        } else {
            None
        }
    }

    /// Releases every active slot, calling `clear` on each, then visits
    /// every slot (idle ones included) with `visit_all`.
    ///
    /// This is a **zero-heap-allocation** operation - slots are kept.
    pub fn reset(&mut self, mut clear: impl FnMut(&mut T), mut visit_all: impl FnMut(&mut T)) {
        for (slot, active) in self.slots.iter_mut().zip(self.active.iter_mut()) {
            if *active {
                clear(slot);
                *active = false;
            }
            visit_all(slot);
        }
        self.free_list.clear();
        self.free_list.extend((0..self.slots.len()).rev());
        self.active_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_acquire_release() {
        let mut pool: SlotPool<u32> = SlotPool::from_fn(10, |i| i as u32);

        let (h1, value) = pool.acquire().unwrap();
        *value = 42;
        assert_eq!(*pool.get(h1).unwrap(), 42);
        assert_eq!(pool.active_count(), 1);

        let released = pool.release(h1).unwrap();
        assert_eq!(*released, 42);
        assert_eq!(pool.active_count(), 0);
        assert!(pool.get(h1).is_none());
    }

    #[test]
    fn test_pool_full() {
        let mut pool: SlotPool<u8> = SlotPool::from_fn(2, |_| 0);

        assert!(pool.acquire().is_some());
        assert!(pool.acquire().is_some());
        assert!(pool.acquire().is_none());
        assert_eq!(pool.capacity(), 2);
    }

    #[test]
    fn test_pool_zero_capacity() {
        let mut pool: SlotPool<u8> = SlotPool::from_fn(0, |_| 0);
        assert!(pool.acquire().is_none());
    }

    #[test]
    fn test_pool_reuse() {
        let mut pool: SlotPool<u32> = SlotPool::from_fn(1, |_| 0);

        let (h1, _) = pool.acquire().unwrap();
        pool.release(h1);

        let (h2, _) = pool.acquire().unwrap();
        assert_eq!(h1.index, h2.index); // Same slot reused
    }

    #[test]
    fn test_double_release_is_rejected() {
        let mut pool: SlotPool<u32> = SlotPool::from_fn(4, |_| 0);
        let (h, _) = pool.acquire().unwrap();

        assert!(pool.release(h).is_some());
        assert!(pool.release(h).is_none());
        assert_eq!(pool.active_count(), 0);

        // The slot went back on the free list once, not twice
        for _ in 0..4 {
            assert!(pool.acquire().is_some());
        }
        assert!(pool.acquire().is_none());
    }

    #[test]
    fn test_reset_releases_everything() {
        let mut pool: SlotPool<u32> = SlotPool::from_fn(3, |_| 0);
        for _ in 0..3 {
            let (_, value) = pool.acquire().unwrap();
            *value = 7;
        }

        let mut cleared = 0;
        let mut visited = 0;
        pool.reset(
            |v| {
                *v = 0;
                cleared += 1;
            },
            |_| visited += 1,
        );

        assert_eq!(cleared, 3);
        assert_eq!(visited, 3);
        assert_eq!(pool.active_count(), 0);
        for _ in 0..3 {
            assert!(pool.acquire().is_some());
        }
    }
}
