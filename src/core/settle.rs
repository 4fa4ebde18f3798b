//! Settle animation: snaps the thumb onto its slot after a gesture.
//!
//! Interpolates from `0` to `delta` over a fixed duration with a decelerate
//! curve and hands out the increment since the previous frame, so the caller
//! can apply it on top of whatever offset it currently holds.

use std::time::{Duration, Instant};

/// Fixed settle duration.
pub const SETTLE_DURATION: Duration = Duration::from_millis(800);
/// Decelerate interpolator factor.
pub const DECELERATE_FACTOR: f32 = 2.5;

/// `1 - (1 - t)^(2 * factor)`; starts fast, eases into the target.
pub fn decelerate(t: f32, factor: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if factor == 1.0 {
        1.0 - (1.0 - t) * (1.0 - t)
    } else {
        1.0 - (1.0 - t).powf(2.0 * factor)
    }
}

/// Round half up, the way the interpolated position is quantised to pixels.
fn round_half_up(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

#[derive(Debug, Clone)]
pub struct SettleAnimator {
    duration: Duration,
    factor: f32,
    started_at: Option<Instant>,
    delta: i32,
    /// Position handed out by the previous step.
    previous: i32,
    finished: bool,
}

impl SettleAnimator {
    pub fn new() -> Self {
        Self::with_duration(SETTLE_DURATION)
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self {
            duration,
            factor: DECELERATE_FACTOR,
            started_at: None,
            delta: 0,
            previous: 0,
            finished: true,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Total displacement of the running (or last) animation.
    pub fn delta(&self) -> i32 {
        self.delta
    }

    /// Start (or restart) an animation covering `delta` pixels.
    pub fn start(&mut self, delta: i32, now: Instant) {
        self.started_at = Some(now);
        self.delta = delta;
        self.previous = 0;
        self.finished = false;
    }

    /// Stop in place; the remaining displacement is dropped.
    pub fn abort(&mut self) {
        self.finished = true;
        self.started_at = None;
    }

    /// Interpolated position at `now`, in `0..=delta`.
    pub fn position_at(&self, now: Instant) -> i32 {
        let Some(start) = self.started_at else {
            return self.delta;
        };
        let elapsed = now.saturating_duration_since(start);
        if elapsed >= self.duration || self.duration.is_zero() {
            return self.delta;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        round_half_up(self.delta as f32 * decelerate(t, self.factor))
    }

    /// Advance to `now`; returns the increment since the previous step, or
    /// `None` once finished.  The increments of one run sum to `delta`.
    pub fn step(&mut self, now: Instant) -> Option<i32> {
        if self.finished {
            return None;
        }
        let current = self.position_at(now);
        let increment = current - self.previous;
        self.previous = current;
        if current == self.delta
            && self
                .started_at
                .is_some_and(|s| now.saturating_duration_since(s) >= self.duration)
        {
            self.finished = true;
            self.started_at = None;
        }
        Some(increment)
    }
}

impl Default for SettleAnimator {
    fn default() -> Self {
        Self::new()
    }
}
