//! # Frame Pipeline Diagnostics
//!
//! - `PerformanceMonitor` - Smoothed frame timing on a background sampler
//! - `FrameStats` / `SessionStats` - Per-frame and cumulative counters

mod performance;
mod stats;

pub use performance::{
    DegradationLevel, ListenerId, MonitorError, MonitorResult, PerformanceMetrics,
    PerformanceMonitor,
};
pub use stats::{FrameStats, SessionStats};
