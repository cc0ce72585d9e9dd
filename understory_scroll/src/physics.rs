// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_timing::{Easing, Tween};

/// Tuning for [`ScrollPhysics`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Constant deceleration used by flings, in pixels per second squared.
    pub deceleration: f64,
    /// Curve applied to every animated motion.
    pub easing: Easing,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            deceleration: 4000.0,
            easing: Easing::SCROLL,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Motion {
    from: f64,
    to: f64,
    tween: Tween,
}

/// Deterministic scroll animation driver.
///
/// `ScrollPhysics` holds at most one motion at a time. Starting a new motion
/// replaces the old one, starting from whatever start offset the caller passes.
#[derive(Clone, Debug, Default)]
pub struct ScrollPhysics {
    config: PhysicsConfig,
    offset: f64,
    motion: Option<Motion>,
}

impl ScrollPhysics {
    /// Creates an idle driver at offset zero.
    #[must_use]
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            offset: 0.0,
            motion: None,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Offset as of the last [`ScrollPhysics::advance`] or jump.
    #[must_use]
    pub fn current_offset(&self) -> f64 {
        self.offset
    }

    /// Returns `true` when no motion is in flight.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.motion.is_none()
    }

    /// Offset the motion in flight will settle on.
    #[must_use]
    pub fn target(&self) -> Option<f64> {
        self.motion.map(|m| m.to)
    }

    /// Cancels any motion and moves to `offset` immediately.
    pub fn jump_to(&mut self, offset: f64) {
        self.motion = None;
        if offset.is_finite() {
            self.offset = offset;
        }
    }

    /// Cancels any motion, leaving the offset where the last frame put it.
    ///
    /// Returns that offset.
    pub fn abort(&mut self) -> f64 {
        if self.motion.take().is_some() {
            log::trace!("scroll motion aborted at {}", self.offset);
        }
        self.offset
    }

    /// Animates from `start` to `end` over `duration_ms`, beginning at `now_ms`.
    ///
    /// A zero duration (or `start == end`) jumps straight to `end`.
    pub fn animate_to(&mut self, start: f64, end: f64, duration_ms: u64, now_ms: u64) {
        if !start.is_finite() || !end.is_finite() {
            return;
        }
        self.offset = start;
        if duration_ms == 0 || start == end {
            self.jump_to(end);
            return;
        }
        self.motion = Some(Motion {
            from: start,
            to: end,
            tween: Tween::new(now_ms, duration_ms, self.config.easing),
        });
    }

    /// Flings from `start` with `velocity` (pixels per second, in scroll
    /// direction), settling inside `[min, max]`.
    ///
    /// Returns the offset the fling will settle on.
    pub fn fling(&mut self, start: f64, velocity: f64, min: f64, max: f64, now_ms: u64) -> f64 {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let decel = self.config.deceleration.max(f64::MIN_POSITIVE);
        let speed = if velocity.is_finite() { velocity.abs() } else { 0.0 };

        let distance = speed * speed / (2.0 * decel);
        let natural = if velocity < 0.0 {
            start - distance
        } else {
            start + distance
        };
        let end = natural.clamp(min, max);

        // Time to cover the clamped distance under the same deceleration. A
        // start outside the bounds needs more distance than the velocity
        // provides; fall back to the full stopping time.
        let travelled = (end - start).abs();
        let seconds = if travelled < distance {
            (speed - libm::sqrt(speed * speed - 2.0 * decel * travelled)) / decel
        } else {
            speed / decel
        };
        let duration_ms = to_millis(seconds);
        log::trace!("fling v={velocity} from {start} to {end} over {duration_ms}ms");
        self.animate_to(start, end, duration_ms, now_ms);
        end
    }

    /// Samples the motion at `now_ms` and returns the current offset.
    ///
    /// When the motion finishes the offset lands exactly on its target and the
    /// driver becomes idle.
    pub fn advance(&mut self, now_ms: u64) -> f64 {
        if let Some(motion) = self.motion {
            if motion.tween.is_finished(now_ms) {
                self.offset = motion.to;
                self.motion = None;
            } else {
                let t = motion.tween.progress(now_ms);
                self.offset = motion.from + (motion.to - motion.from) * t;
            }
        }
        self.offset
    }
}

fn to_millis(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Durations are short and non-negative; saturating cast is fine"
    )]
    let ms = libm::round(seconds * 1000.0) as u64;
    ms
}

#[cfg(test)]
mod tests {
    use super::{PhysicsConfig, ScrollPhysics};
    use understory_timing::Easing;

    #[test]
    fn jump_is_instant() {
        let mut p = ScrollPhysics::default();
        p.jump_to(120.0);
        assert!(p.is_finished());
        assert_eq!(p.current_offset(), 120.0);
        assert_eq!(p.advance(10_000), 120.0);
    }

    #[test]
    fn animation_is_monotonic_and_lands_exactly() {
        let mut p = ScrollPhysics::default();
        p.animate_to(0.0, 312.0, 300, 1000);
        assert_eq!(p.target(), Some(312.0));
        let mut last = 0.0;
        for now in (1000..1300).step_by(10) {
            let x = p.advance(now);
            assert!(x >= last, "offset went backwards at {now}");
            assert!(x < 312.0);
            last = x;
        }
        assert_eq!(p.advance(1300), 312.0);
        assert!(p.is_finished());
    }

    #[test]
    fn animation_replays_exactly() {
        let mut a = ScrollPhysics::default();
        let mut b = ScrollPhysics::default();
        a.animate_to(10.0, -200.0, 250, 0);
        b.animate_to(10.0, -200.0, 250, 0);
        for now in [0, 7, 33, 120, 249] {
            assert_eq!(a.advance(now), b.advance(now));
        }
    }

    #[test]
    fn abort_keeps_last_sampled_offset() {
        let mut p = ScrollPhysics::default();
        p.animate_to(0.0, 100.0, 100, 0);
        let mid = p.advance(50);
        assert_eq!(p.abort(), mid);
        assert!(p.is_finished());
        assert_eq!(p.advance(1000), mid);
    }

    #[test]
    fn zero_duration_jumps() {
        let mut p = ScrollPhysics::default();
        p.animate_to(0.0, 50.0, 0, 0);
        assert!(p.is_finished());
        assert_eq!(p.current_offset(), 50.0);
    }

    #[test]
    fn fling_uses_constant_deceleration() {
        let mut p = ScrollPhysics::new(PhysicsConfig {
            deceleration: 1000.0,
            easing: Easing::Linear,
        });
        // v = 1000 px/s, a = 1000 px/s^2: 500px over one second.
        let end = p.fling(0.0, 1000.0, -10_000.0, 10_000.0, 0);
        assert_eq!(end, 500.0);
        assert!(!p.is_finished());
        assert_eq!(p.advance(500), 250.0);
        assert_eq!(p.advance(1000), 500.0);
        assert!(p.is_finished());
    }

    #[test]
    fn fling_clamps_to_bounds_and_shortens() {
        let mut p = ScrollPhysics::new(PhysicsConfig {
            deceleration: 1000.0,
            easing: Easing::Linear,
        });
        let end = p.fling(0.0, -1000.0, -100.0, 0.0, 0);
        assert_eq!(end, -100.0);
        // Covering 100 of the 500 stopping pixels takes ~106ms.
        assert!(!p.is_finished());
        p.advance(104);
        assert!(!p.is_finished());
        assert_eq!(p.advance(106), -100.0);
        assert!(p.is_finished());
    }

    #[test]
    fn fling_with_swapped_bounds_and_zero_velocity() {
        let mut p = ScrollPhysics::default();
        let end = p.fling(500.0, 0.0, 300.0, 0.0, 0);
        assert_eq!(end, 300.0);
        assert_eq!(p.advance(5000), 300.0);
    }
}
