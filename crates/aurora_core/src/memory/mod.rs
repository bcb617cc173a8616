//! # Memory Management
//!
//! Pre-allocated slot storage for per-frame churn.
//!
//! ## Design Philosophy
//!
//! All slots are allocated once at session start. While animating:
//! - No heap allocations
//! - No per-object construction or destruction
//! - Predictable, flat frame cost

mod pool;

pub use pool::{SlotHandle, SlotPool};
