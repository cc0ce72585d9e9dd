// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::SmallVec;

/// Samples older than this, relative to the newest, are dropped.
const WINDOW_MS: u64 = 100;

/// Estimates horizontal pointer velocity over a short trailing window.
///
/// Velocity is the average over the window: the distance between the oldest
/// and newest retained samples divided by the time between them.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: SmallVec<[(u64, f64); 16]>,
    max_velocity: f64,
}

impl VelocityTracker {
    /// Creates an empty tracker whose estimates are capped at `max_velocity`
    /// pixels per second in either direction.
    #[must_use]
    pub fn new(max_velocity: f64) -> Self {
        Self {
            samples: SmallVec::new(),
            max_velocity: max_velocity.abs(),
        }
    }

    /// Records the pointer at `x` at `time_ms`.
    ///
    /// A timestamp earlier than the newest sample restarts the window.
    pub fn add(&mut self, time_ms: u64, x: f64) {
        if !x.is_finite() {
            return;
        }
        if self.samples.last().is_some_and(|(t, _)| *t > time_ms) {
            self.samples.clear();
        }
        self.samples.push((time_ms, x));
        let cutoff = time_ms.saturating_sub(WINDOW_MS);
        self.samples.retain(|(t, _)| *t >= cutoff);
    }

    /// Forgets all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Number of samples in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Velocity in pixels per second; positive when the pointer moves right.
    ///
    /// Returns `0.0` until two samples with distinct timestamps exist.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        let (Some(&(t0, x0)), Some(&(t1, x1))) = (self.samples.first(), self.samples.last())
        else {
            return 0.0;
        };
        if t1 <= t0 {
            return 0.0;
        }
        let dt = (t1 - t0) as f64;
        ((x1 - x0) * 1000.0 / dt).clamp(-self.max_velocity, self.max_velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::VelocityTracker;

    #[test]
    fn steady_motion() {
        let mut v = VelocityTracker::new(8000.0);
        for i in 0..10_u32 {
            v.add(u64::from(i) * 20, f64::from(i) * 5.0);
        }
        // 5px every 20ms.
        assert_eq!(v.velocity(), 250.0);
        assert_eq!(v.len(), 6);
    }

    #[test]
    fn leftward_motion_is_negative_and_capped() {
        let mut v = VelocityTracker::new(1000.0);
        v.add(0, 500.0);
        v.add(10, 300.0);
        assert_eq!(v.velocity(), -1000.0);
    }

    #[test]
    fn single_sample_has_no_velocity() {
        let mut v = VelocityTracker::new(8000.0);
        assert_eq!(v.velocity(), 0.0);
        v.add(5, 10.0);
        v.add(5, 40.0);
        assert_eq!(v.velocity(), 0.0);
    }

    #[test]
    fn stale_samples_fall_out_of_the_window() {
        let mut v = VelocityTracker::new(8000.0);
        v.add(0, 0.0);
        v.add(50, 100.0);
        v.add(400, 100.0);
        // The fast early burst is forgotten after a pause.
        assert_eq!(v.len(), 1);
        assert_eq!(v.velocity(), 0.0);
    }

    #[test]
    fn time_going_backwards_restarts() {
        let mut v = VelocityTracker::new(8000.0);
        v.add(100, 0.0);
        v.add(50, 10.0);
        assert_eq!(v.len(), 1);
        v.clear();
        assert!(v.is_empty());
    }
}
