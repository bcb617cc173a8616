//! # AURORA UI
//!
//! Pointer interaction for the ambient particle engine:
//! - Event-driven pointer sampling through a latest-value snapshot
//! - Parallax steering toward the pointer
//! - Radial click impulses with sharp exponential decay
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                   POINTER PIPELINE                      │
//! ├────────────────────────────────────────────────────────┤
//! │  Host events → PointerSink → MouseState snapshot       │
//! │                                   ↓ (once per frame)   │
//! │            MouseTracker::update → parallax / clicks     │
//! └────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod input;

pub use animation::{Easing, LifeEnvelope};
pub use input::{
    ClickEffect, ClickImpulse, MouseState, MouseTracker, PointerSink, TrackerOptions,
};
