//! # Latest-Value Snapshot Cell
//!
//! Single shared value with any number of writer handles and one owner.
//!
//! ## Architecture
//!
//! ```text
//!      ┌──────────────┐   update()   ┌──────────────────────┐
//!      │ SnapshotWriter├────────────►│  Mutex<T>            │
//!      │  (clonable)  │              │  + closed flag       │
//!      └──────────────┘              └──────────┬───────────┘
//!                                               │ with()
//!                                        ┌──────┴──────┐
//!                                        │ LatestValue │
//!                                        │   (owner)   │
//!                                        └─────────────┘
//! ```
//!
//! Races between one writer and the frame read are benign: whichever
//! write lands before the read is what the frame sees.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

struct Shared<T> {
    value: Mutex<T>,
    closed: AtomicBool,
}

/// Owner side of a snapshot cell.
///
/// Dropping or [`close`](Self::close)-ing the owner turns every
/// outstanding [`SnapshotWriter`] into a no-op.
pub struct LatestValue<T> {
    shared: Arc<Shared<T>>,
}

/// Writer handle for a [`LatestValue`]. Cheap to clone, `Send` when `T` is.
pub struct SnapshotWriter<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for SnapshotWriter<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> LatestValue<T> {
    /// Creates a new cell holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                value: Mutex::new(value),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Returns a new writer handle.
    #[must_use]
    pub fn writer(&self) -> SnapshotWriter<T> {
        SnapshotWriter {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Runs `f` on the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.value.lock())
    }

    /// Detaches all writers. Idempotent.
    pub fn close(&self) {
        self.shared.closed.store(true, Ordering::Release);
    }
}

impl<T> Drop for LatestValue<T> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<T> SnapshotWriter<T> {
    /// Applies `f` to the shared value.
    ///
    /// Returns false (and does nothing) once the owner is closed.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        if self.is_closed() {
            return false;
        }
        f(&mut self.shared.value.lock());
        true
    }

    /// Replaces the shared value.
    pub fn set(&self, value: T) -> bool {
        self.update(|slot| *slot = value)
    }

    /// Returns true once the owner is closed or dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_latest_write_wins() {
        let cell = LatestValue::new(0_u32);
        let writer = cell.writer();

        for i in 1..=10 {
            assert!(writer.set(i));
        }

        assert_eq!(cell.with(|v| *v), 10);
    }

    #[test]
    fn test_closed_cell_ignores_writers() {
        let cell = LatestValue::new(1_u32);
        let writer = cell.writer();

        cell.close();
        assert!(!writer.set(99));
        assert!(writer.is_closed());
        assert_eq!(cell.with(|v| *v), 1);
    }

    #[test]
    fn test_dropping_owner_closes_writers() {
        let cell = LatestValue::new(String::from("a"));
        let writer = cell.writer();
        drop(cell);
        assert!(!writer.set(String::from("b")));
    }

    #[test]
    fn test_writer_from_another_thread() {
        let cell = LatestValue::new(0_u64);
        let writer = cell.writer();

        let handle = thread::spawn(move || {
            for i in 0..1000 {
                writer.set(i);
            }
        });
        handle.join().unwrap();

        assert_eq!(cell.with(|v| *v), 999);
    }
}
