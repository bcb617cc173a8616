//! Trailing-edge debounce on host timestamps.

use std::time::Duration;

/// Holds back a burst of values until `window` passes without a new one,
/// then releases only the last.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Duration)>,
}

impl<T> Debouncer<T> {
    /// Creates an empty debouncer.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Records `value` seen at `now`, replacing any pending one and
    /// restarting the window.
    pub fn push(&mut self, value: T, now: Duration) {
        self.pending = Some((value, now));
    }

    /// Releases the pending value once the window has elapsed since the
    /// last push.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        let (_, at) = self.pending.as_ref()?;
        if now.saturating_sub(*at) >= self.window {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// True while a value waits for its window.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops any pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
