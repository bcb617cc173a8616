//! # Hand-off Between Event Sources and the Frame Loop
//!
//! ## The Problem
//!
//! ```text
//! Event source (pointer, host):  WRITE whenever something happens
//! Frame loop:                    READ once per frame
//! ```
//!
//! Individual events do not matter, only the state they leave behind.
//! A queue would make the frame loop replay history it will discard.
//!
//! ## The Solution: A Snapshot Cell
//!
//! ```text
//! Writer:  update snapshot in place (latest value wins)
//! Reader:  copy snapshot at frame start
//! Close:   writers become no-ops, nothing leaks past teardown
//! ```

mod snapshot;

pub use snapshot::{LatestValue, SnapshotWriter};
