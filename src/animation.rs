//! # Frame-Driven Animation
//!
//! Time-based value animation for the gauge: an endless phase sweep that
//! scrolls the wave sideways, and a one-shot settle that eases the water
//! level toward a new progress target.
//!
//! Nothing here spawns threads or reads clocks. Callers own time: feed
//! [`Animator::advance`] the delta since the previous frame and apply the
//! returned value.

use std::time::Duration;

/// Default length of one full wave cycle.
pub const DEFAULT_CYCLE_DURATION: Duration = Duration::from_millis(1000);

/// Fixed length of the water level settle animation.
pub const LEVEL_SETTLE_DURATION: Duration = Duration::from_millis(1000);

/// Easing curves applied to normalized animation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (constant rate)
    #[default]
    Linear,
    /// Quadratic ease out (fast start, slow end)
    DecelerateQuad,
}

impl Easing {
    /// Apply the curve to a linear t value [0, 1].
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::DecelerateQuad => {
                // 1 - (1-t)²
                1.0 - (1.0 - t) * (1.0 - t)
            }
        }
    }
}

/// What happens when an animator reaches the end of its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Stop at the final value.
    OneShot,
    /// Wrap back to the start value and keep going.
    LoopRestart,
}

/// Lifecycle state of an [`Animator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Not started yet, or cancelled.
    Idle,
    Running,
    Paused,
    /// Ran to completion (one-shot only).
    Finished,
}

/// Interpolates a scalar between two endpoints over a duration.
///
/// The animator never snaps short of its target: the frame that crosses
/// the end of a one-shot reports exactly `to`.
#[derive(Debug, Clone)]
pub struct Animator {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
    repeat: Repeat,
    state: Playback,
    current: f32,
}

impl Animator {
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing, repeat: Repeat) -> Self {
        Animator {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
            repeat,
            state: Playback::Idle,
            current: from,
        }
    }

    /// Endless linear 0 -> 1 sweep used for the wave phase.
    pub fn phase_sweep(cycle: Duration) -> Self {
        Animator::new(0.0, 1.0, cycle, Easing::Linear, Repeat::LoopRestart)
    }

    /// One-shot decelerating settle used for the water level.
    pub fn level_settle(from: f32, to: f32) -> Self {
        Animator::new(
            from,
            to,
            LEVEL_SETTLE_DURATION,
            Easing::DecelerateQuad,
            Repeat::OneShot,
        )
    }

    /// Start (or restart) from the beginning.
    pub fn start(&mut self) {
        self.elapsed = Duration::ZERO;
        self.current = self.from;
        self.state = Playback::Running;
    }

    /// Stop in place. The driven value keeps whatever the last frame set.
    pub fn cancel(&mut self) {
        self.state = Playback::Idle;
    }

    /// Jump straight to the final value and stop.
    pub fn end(&mut self) {
        self.elapsed = self.duration;
        self.current = self.to;
        self.state = Playback::Finished;
    }

    pub fn pause(&mut self) {
        if self.state == Playback::Running {
            self.state = Playback::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == Playback::Paused {
            self.state = Playback::Running;
        }
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn state(&self) -> Playback {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == Playback::Running
    }

    /// Value as of the most recent frame.
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Endpoint this animator is heading toward.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Advance by `dt` and return the new value, or `None` when the
    /// animator is idle, paused, or already finished.
    pub fn advance(&mut self, dt: Duration) -> Option<f32> {
        if self.state != Playback::Running {
            return None;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.duration.is_zero() {
            match self.repeat {
                Repeat::OneShot => {
                    self.current = self.to;
                    self.state = Playback::Finished;
                }
                Repeat::LoopRestart => self.current = self.from,
            }
            return Some(self.current);
        }
        match self.repeat {
            Repeat::OneShot => {
                if self.elapsed >= self.duration {
                    self.elapsed = self.duration;
                    self.current = self.to;
                    self.state = Playback::Finished;
                } else {
                    let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
                    self.current = self.from + (self.to - self.from) * self.easing.apply(t);
                }
            }
            Repeat::LoopRestart => {
                let wrapped = self.elapsed.as_nanos() % self.duration.as_nanos();
                self.elapsed = Duration::from_nanos(wrapped as u64);
                let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
                self.current = self.from + (self.to - self.from) * self.easing.apply(t);
            }
        }
        Some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::DecelerateQuad] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_decelerate_midpoint() {
        assert!((Easing::DecelerateQuad.apply(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_decelerate_slows_over_time() {
        let first_half = Easing::DecelerateQuad.apply(0.5) - Easing::DecelerateQuad.apply(0.0);
        let second_half = Easing::DecelerateQuad.apply(1.0) - Easing::DecelerateQuad.apply(0.5);
        assert!(first_half > second_half, "gain should shrink toward the end");
    }

    #[test]
    fn test_phase_sweep_wraps() {
        let mut phase = Animator::phase_sweep(Duration::from_millis(1000));
        phase.start();
        let v = phase.advance(Duration::from_millis(1500)).unwrap();
        assert!((v - 0.5).abs() < 1e-6, "1.5 cycles should land at 0.5, got {}", v);
    }

    #[test]
    fn test_level_settle_lands_exactly_on_target() {
        let mut level = Animator::level_settle(0.5, 0.75);
        level.start();
        let mut last = level.value();
        let mut total = Duration::ZERO;
        while total < Duration::from_millis(990) {
            total += Duration::from_millis(33);
            let v = level.advance(Duration::from_millis(33)).unwrap();
            assert!(v >= last, "settle toward a higher target must not dip");
            last = v;
        }
        let v = level.advance(Duration::from_millis(100)).unwrap();
        assert_eq!(v, 0.75);
        assert_eq!(level.state(), Playback::Finished);
        assert_eq!(level.advance(Duration::from_millis(16)), None);
    }

    #[test]
    fn test_pause_freezes_resume_continues() {
        let mut phase = Animator::phase_sweep(Duration::from_millis(1000));
        phase.start();
        phase.advance(Duration::from_millis(250)).unwrap();
        phase.pause();
        assert_eq!(phase.advance(Duration::from_millis(500)), None);
        phase.resume();
        let v = phase.advance(Duration::from_millis(250)).unwrap();
        assert!((v - 0.5).abs() < 1e-6, "paused time must not count, got {}", v);
    }

    #[test]
    fn test_cancel_stops_without_jumping() {
        let mut level = Animator::level_settle(0.0, 1.0);
        level.start();
        let before = level.advance(Duration::from_millis(300)).unwrap();
        level.cancel();
        assert_eq!(level.state(), Playback::Idle);
        assert_eq!(level.advance(Duration::from_millis(300)), None);
        assert_eq!(level.value(), before);
    }

    #[test]
    fn test_end_jumps_to_target() {
        let mut level = Animator::level_settle(0.0, 1.0);
        level.start();
        level.advance(Duration::from_millis(10)).unwrap();
        level.end();
        assert_eq!(level.value(), 1.0);
        assert_eq!(level.state(), Playback::Finished);
    }

    #[test]
    fn test_set_duration_changes_cycle_length() {
        let mut phase = Animator::phase_sweep(Duration::from_millis(1000));
        phase.set_duration(Duration::from_millis(500));
        phase.start();
        let v = phase.advance(Duration::from_millis(250)).unwrap();
        assert!((v - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut level = Animator::new(
            0.0,
            1.0,
            Duration::ZERO,
            Easing::Linear,
            Repeat::OneShot,
        );
        level.start();
        assert_eq!(level.advance(Duration::from_millis(1)), Some(1.0));
        assert_eq!(level.state(), Playback::Finished);
    }
}
