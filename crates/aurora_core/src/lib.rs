//! # AURORA Core
//!
//! Storage and hand-off primitives for the ambient particle engine:
//! - Fixed-capacity slot pool, allocated once per session
//! - Latest-value snapshot shared between an event writer and the frame loop
//!
//! ## Architecture Rules
//!
//! 1. **No heap allocations in the frame step** - All slots are pre-allocated
//! 2. **Arena + index** - Objects are addressed by slot handles, never by pointer
//! 3. **Latest value wins** - Advisory input is a snapshot, not a queue
//!
//! ## Example
//!
//! ```rust,ignore
//! use aurora_core::SlotPool;
//!
//! let mut pool = SlotPool::from_fn(200, |_| Sprite::default());
//! // All slots pre-allocated, acquire/release never touch the allocator
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod memory;
pub mod sync;

pub use memory::{SlotHandle, SlotPool};
pub use sync::{LatestValue, SnapshotWriter};
