//! Engine-wide tuning constants.
//!
//! These are shared so the engine, the tracker and the tests agree on the
//! same numbers.

/// Largest frame delta fed to the physics step, in seconds.
///
/// Longer gaps (a backgrounded tab, a debugger pause) integrate as this value.
pub const MAX_FRAME_DELTA_SECS: f32 = 0.1;

/// Trailing-edge debounce window for surface resize notifications.
pub const RESIZE_DEBOUNCE_MS: u64 = 250;

/// Maximum number of simultaneously decaying click effects.
pub const MAX_CLICK_EFFECTS: usize = 8;

/// Upper bound on the parallax steering vector length (pixels/s²).
pub const MAX_PARALLAX_OFFSET: f32 = 120.0;

/// Seed used when the host does not supply one.
pub const DEFAULT_SEED: u64 = 0x00A0_0A0A_2026;
