//! Pointer tracking for the particle surface.
//!
//! The host forwards pointer events through a [`PointerSink`] whenever they
//! arrive. The frame loop calls [`MouseTracker::update`] once per frame and
//! then queries parallax and click forces against that frame's copy.
//!
//! All timestamps are offsets from the same session origin the host uses
//! for frame timestamps.

use std::time::Duration;

use aurora_core::{LatestValue, SnapshotWriter};
use aurora_shared::{ClickConfig, Vec2, MAX_CLICK_EFFECTS, MAX_PARALLAX_OFFSET};

use crate::animation::Easing;

/// A click that is still pushing particles around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEffect {
    /// Where the click landed, surface coordinates.
    pub position: Vec2,
    /// When the click landed.
    pub created_at: Duration,
    /// How long the effect lasts.
    pub ttl: Duration,
}

impl ClickEffect {
    /// Time since the click, zero if `now` is earlier.
    #[must_use]
    pub fn age(&self, now: Duration) -> Duration {
        now.saturating_sub(self.created_at)
    }

    /// Returns true once the TTL has elapsed.
    #[must_use]
    pub fn is_expired(&self, now: Duration) -> bool {
        self.age(now) >= self.ttl
    }
}

/// Pointer state as last written by the host.
#[derive(Debug, Default, PartialEq)]
pub struct MouseState {
    /// Pointer position, `None` while the pointer is outside the surface.
    pub position: Option<Vec2>,
    /// Recent pointer velocity, pixels/second.
    pub velocity: Vec2,
    /// Timestamp of the last move event.
    pub last_move_at: Option<Duration>,
    /// Recent clicks, oldest first. Never longer than `MAX_CLICK_EFFECTS`.
    pub clicks: Vec<ClickEffect>,
}

impl Clone for MouseState {
    fn clone(&self) -> Self {
        Self {
            position: self.position,
            velocity: self.velocity,
            last_move_at: self.last_move_at,
            clicks: self.clicks.clone(),
        }
    }

    // Reuses the click buffer: the tracker copies the snapshot every frame.
    fn clone_from(&mut self, source: &Self) {
        self.position = source.position;
        self.velocity = source.velocity;
        self.last_move_at = source.last_move_at;
        self.clicks.clone_from(&source.clicks);
    }
}

/// Radial push on one particle from recent clicks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickImpulse {
    /// Summed force, pixels/s².
    pub force: Vec2,
    /// Time left on the longest-lived contributing click.
    pub ttl: Duration,
}

/// What the tracker listens for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerOptions {
    /// Track the pointer position for parallax.
    pub enable_parallax: bool,
    /// Track clicks for impulses.
    pub enable_click_effects: bool,
    /// Click impulse tuning.
    pub click: ClickConfig,
    /// Whether the host can deliver pointer events at all.
    pub pointer_supported: bool,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            enable_parallax: true,
            enable_click_effects: true,
            click: ClickConfig::default(),
            pointer_supported: true,
        }
    }
}

/// Host-side listener handle. Clone it into every event callback.
///
/// Every method returns false once the tracker has been cleaned up; the
/// event is dropped.
#[derive(Clone)]
pub struct PointerSink {
    writer: SnapshotWriter<MouseState>,
    track_position: bool,
    track_clicks: bool,
    click_ttl: Duration,
}

impl PointerSink {
    /// Pointer moved to `position` at `timestamp`.
    pub fn pointer_moved(&self, position: Vec2, timestamp: Duration) -> bool {
        if !self.track_position || !position.is_finite() {
            return false;
        }
        self.writer.update(|state| {
            state.velocity = match (state.position, state.last_move_at) {
                (Some(previous), Some(at)) if timestamp > at => {
                    (position - previous) * (1.0 / (timestamp - at).as_secs_f32())
                }
                _ => Vec2::ZERO,
            };
            state.position = Some(position);
            state.last_move_at = Some(timestamp);
        })
    }

    /// Pointer clicked (or tapped) at `position`.
    pub fn clicked(&self, position: Vec2, timestamp: Duration) -> bool {
        if !self.track_clicks || !position.is_finite() {
            return false;
        }
        let ttl = self.click_ttl;
        self.writer.update(|state| {
            if state.clicks.len() >= MAX_CLICK_EFFECTS {
                state.clicks.remove(0);
            }
            state.clicks.push(ClickEffect {
                position,
                created_at: timestamp,
                ttl,
            });
        })
    }

    /// Pointer left the surface.
    pub fn pointer_left(&self) -> bool {
        self.writer.update(|state| {
            state.position = None;
            state.velocity = Vec2::ZERO;
            state.last_move_at = None;
        })
    }

    /// Returns true once the tracker behind this sink is gone.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.writer.is_closed()
    }
}

/// Samples pointer input for one surface and turns it into steering forces.
pub struct MouseTracker {
    /// Shared with the host's sinks. `None` when nothing is tracked.
    snapshot: Option<LatestValue<MouseState>>,
    /// This frame's copy of the snapshot.
    frame: MouseState,
    /// Timestamp of the current frame.
    now: Duration,
    options: TrackerOptions,
}

impl MouseTracker {
    /// Creates a tracker.
    ///
    /// Without pointer support, or with both effects disabled, the tracker
    /// is neutral: no sink, no forces, no errors.
    #[must_use]
    pub fn new(options: TrackerOptions) -> Self {
        let wanted = options.enable_parallax || options.enable_click_effects;
        let snapshot = if options.pointer_supported && wanted {
            Some(LatestValue::new(MouseState {
                clicks: Vec::with_capacity(MAX_CLICK_EFFECTS),
                ..MouseState::default()
            }))
        } else {
            tracing::debug!(
                pointer_supported = options.pointer_supported,
                wanted,
                "mouse tracker is neutral"
            );
            None
        };

        Self {
            snapshot,
            frame: MouseState {
                clicks: Vec::with_capacity(MAX_CLICK_EFFECTS),
                ..MouseState::default()
            },
            now: Duration::ZERO,
            options,
        }
    }

    /// Returns a listener handle for the host, or `None` when neutral.
    #[must_use]
    pub fn pointer_sink(&self) -> Option<PointerSink> {
        let cell = self.snapshot.as_ref()?;
        Some(PointerSink {
            writer: cell.writer(),
            track_position: self.options.enable_parallax,
            track_clicks: self.options.enable_click_effects,
            click_ttl: Duration::try_from_secs_f32(self.options.click.ttl)
                .unwrap_or(Duration::ZERO),
        })
    }

    /// True when the tracker produces no forces.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.snapshot.is_none()
    }

    /// Takes this frame's copy of the pointer state and drops expired clicks.
    pub fn update(&mut self, now: Duration) {
        self.now = now;
        if let Some(cell) = &self.snapshot {
            cell.with(|state| self.frame.clone_from(state));
            self.frame.clicks.retain(|click| !click.is_expired(now));
        }
    }

    /// Returns this frame's pointer state.
    #[must_use]
    pub fn state(&self) -> MouseState {
        self.frame.clone()
    }

    /// Steering vector from `position` toward the pointer.
    ///
    /// Proportional to the distance and `strength`, clamped to
    /// `MAX_PARALLAX_OFFSET`. Zero without a pointer.
    #[must_use]
    pub fn parallax_offset(&self, position: Vec2, strength: f32) -> Vec2 {
        if !self.options.enable_parallax {
            return Vec2::ZERO;
        }
        match self.frame.position {
            Some(pointer) => ((pointer - position) * strength).clamp_length(MAX_PARALLAX_OFFSET),
            None => Vec2::ZERO,
        }
    }

    /// Radial impulse away from recent clicks near `position`.
    #[must_use]
    pub fn click_effect(&self, position: Vec2) -> Option<ClickImpulse> {
        if !self.options.enable_click_effects {
            return None;
        }
        let ClickConfig { radius, strength, .. } = self.options.click;
        if radius <= 0.0 {
            return None;
        }

        let mut force = Vec2::ZERO;
        let mut ttl = Duration::ZERO;
        let mut hit = false;

        for click in &self.frame.clicks {
            if click.is_expired(self.now) {
                continue;
            }
            let offset = position - click.position;
            let distance = offset.length();
            if distance >= radius {
                continue;
            }

            let age = click.age(self.now);
            let decay =
                Easing::ExponentialOut.remaining(age.as_secs_f32(), click.ttl.as_secs_f32());
            let falloff = 1.0 - distance / radius;
            force += offset.normalize_or_zero() * (strength * falloff * decay);
            ttl = ttl.max(click.ttl - age);
            hit = true;
        }

        hit.then_some(ClickImpulse { force, ttl })
    }

    /// Detaches every sink and forgets all state. Idempotent.
    pub fn cleanup(&mut self) {
        if let Some(cell) = self.snapshot.take() {
            cell.close();
            tracing::debug!("mouse tracker detached");
        }
        self.frame.position = None;
        self.frame.velocity = Vec2::ZERO;
        self.frame.last_move_at = None;
        self.frame.clicks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_pointer_move_reaches_frame_copy() {
        let mut tracker = MouseTracker::new(TrackerOptions::default());
        let sink = tracker.pointer_sink().unwrap();

        sink.pointer_moved(Vec2::new(10.0, 10.0), ms(0));
        sink.pointer_moved(Vec2::new(20.0, 10.0), ms(100));

        // Not visible until the frame reads the snapshot
        assert_eq!(tracker.state().position, None);

        tracker.update(ms(110));
        let state = tracker.state();
        assert_eq!(state.position, Some(Vec2::new(20.0, 10.0)));
        assert!((state.velocity.x - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_parallax_points_at_pointer() {
        let mut tracker = MouseTracker::new(TrackerOptions::default());
        let sink = tracker.pointer_sink().unwrap();
        sink.pointer_moved(Vec2::new(100.0, 0.0), ms(0));
        tracker.update(ms(16));

        let offset = tracker.parallax_offset(Vec2::new(0.0, 0.0), 0.5);
        assert_eq!(offset, Vec2::new(50.0, 0.0));

        // Far away: clamped
        let far = tracker.parallax_offset(Vec2::new(-10_000.0, 0.0), 0.5);
        assert!((far.length() - MAX_PARALLAX_OFFSET).abs() < 1e-2);
    }

    #[test]
    fn test_click_pushes_outward_then_expires() {
        let options = TrackerOptions {
            click: ClickConfig {
                radius: 100.0,
                strength: 1000.0,
                ttl: 0.5,
            },
            ..TrackerOptions::default()
        };
        let mut tracker = MouseTracker::new(options);
        let sink = tracker.pointer_sink().unwrap();
        sink.clicked(Vec2::new(50.0, 50.0), ms(1000));

        tracker.update(ms(1000));
        let impulse = tracker.click_effect(Vec2::new(60.0, 50.0)).unwrap();
        assert!(impulse.force.x > 0.0, "pushes away from the click");
        assert_eq!(impulse.force.y, 0.0);
        assert_eq!(impulse.ttl, ms(500));

        // Out of range
        assert!(tracker.click_effect(Vec2::new(500.0, 50.0)).is_none());

        tracker.update(ms(1500));
        assert!(tracker.click_effect(Vec2::new(60.0, 50.0)).is_none());
        assert!(tracker.state().clicks.is_empty());
    }

    #[test]
    fn test_click_list_is_bounded() {
        let mut tracker = MouseTracker::new(TrackerOptions::default());
        let sink = tracker.pointer_sink().unwrap();
        for i in 0..(MAX_CLICK_EFFECTS as u64 + 5) {
            sink.clicked(Vec2::new(i as f32, 0.0), ms(i));
        }
        tracker.update(ms(20));
        assert_eq!(tracker.state().clicks.len(), MAX_CLICK_EFFECTS);
    }

    #[test]
    fn test_no_pointer_support_is_neutral() {
        let mut tracker = MouseTracker::new(TrackerOptions {
            pointer_supported: false,
            ..TrackerOptions::default()
        });

        assert!(tracker.is_neutral());
        assert!(tracker.pointer_sink().is_none());
        tracker.update(ms(16));
        assert_eq!(tracker.parallax_offset(Vec2::new(1.0, 1.0), 1.0), Vec2::ZERO);
        assert!(tracker.click_effect(Vec2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_cleanup_detaches_sinks() {
        let mut tracker = MouseTracker::new(TrackerOptions::default());
        let sink = tracker.pointer_sink().unwrap();

        tracker.cleanup();
        tracker.cleanup();

        assert!(sink.is_detached());
        assert!(!sink.pointer_moved(Vec2::new(1.0, 1.0), ms(0)));
        assert!(tracker.pointer_sink().is_none());
    }

    #[test]
    fn test_unrepresentable_click_ttl_is_zero() {
        for ttl in [1e30, f32::INFINITY, f32::NAN, -1.0] {
            let tracker = MouseTracker::new(TrackerOptions {
                click: ClickConfig {
                    ttl,
                    ..ClickConfig::default()
                },
                ..TrackerOptions::default()
            });
            let sink = tracker.pointer_sink().unwrap();
            assert!(sink.clicked(Vec2::new(1.0, 1.0), ms(0)));
        }
    }

    #[test]
    fn test_pointer_left_clears_position() {
        let mut tracker = MouseTracker::new(TrackerOptions::default());
        let sink = tracker.pointer_sink().unwrap();
        sink.pointer_moved(Vec2::new(40.0, 40.0), ms(0));
        assert!(sink.pointer_left());

        tracker.update(ms(16));
        assert_eq!(tracker.state().position, None);
        assert_eq!(tracker.parallax_offset(Vec2::ZERO, 1.0), Vec2::ZERO);
    }

    #[test]
    fn test_disabled_clicks_are_ignored() {
        let mut tracker = MouseTracker::new(TrackerOptions {
            enable_click_effects: false,
            ..TrackerOptions::default()
        });
        let sink = tracker.pointer_sink().unwrap();
        assert!(!sink.clicked(Vec2::new(0.0, 0.0), ms(0)));
        tracker.update(ms(1));
        assert!(tracker.click_effect(Vec2::new(1.0, 0.0)).is_none());
    }
}
