//! Frame statistics.

/// Counters for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Frames run so far in this session, including this one.
    pub frame_number: u64,
    /// Clamped frame delta in milliseconds.
    pub delta_ms: f32,
    /// Particles spawned this frame.
    pub spawned: u32,
    /// Particles retired this frame.
    pub retired: u32,
    /// Active particles after the frame.
    pub active: usize,
    /// A spawn was skipped because every pool slot was busy.
    pub pool_exhausted: bool,
}

impl FrameStats {
    /// Returns FPS calculated from the frame delta.
    #[must_use]
    pub fn fps(&self) -> f32 {
        if self.delta_ms > 0.0 {
            1000.0 / self.delta_ms
        } else {
            0.0
        }
    }
}

/// Counters accumulated over a whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames run.
    pub frames: u64,
    /// Particles ever spawned.
    pub total_spawned: u64,
    /// Particles ever retired.
    pub total_retired: u64,
    /// Highest active count seen after a frame.
    pub peak_active: usize,
    /// Frames in which the pool ran dry.
    pub pool_exhaustions: u64,
    /// Debounced resizes applied.
    pub bounds_updates: u64,
}

impl SessionStats {
    /// Folds one frame into the totals.
    pub fn record(&mut self, frame: &FrameStats) {
        self.frames += 1;
        self.total_spawned += u64::from(frame.spawned);
        self.total_retired += u64::from(frame.retired);
        self.peak_active = self.peak_active.max(frame.active);
        if frame.pool_exhausted {
            self.pool_exhaustions += 1;
        }
    }

    /// Counts an applied resize.
    pub fn record_bounds_update(&mut self) {
        self.bounds_updates += 1;
    }
}
