// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Easing;

/// A fixed-duration animation window.
///
/// A tween knows when it started, how long it lasts, and which [`Easing`] to
/// apply. It carries no values of its own: callers interpolate whatever they
/// animate using [`Tween::progress`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    start_ms: u64,
    duration_ms: u64,
    easing: Easing,
}

impl Tween {
    /// Creates a tween starting at `start_ms` and lasting `duration_ms`.
    ///
    /// A zero duration is valid: the tween is finished from its first sample.
    #[must_use]
    pub fn new(start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            start_ms,
            duration_ms,
            easing,
        }
    }

    /// Returns the start timestamp.
    #[must_use]
    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    /// Returns the duration.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Returns the timestamp at which the tween finishes.
    #[must_use]
    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms)
    }

    /// Returns the easing curve.
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Linear progress in `[0, 1]` at `now_ms`.
    ///
    /// Timestamps before the start clamp to `0.0`.
    #[must_use]
    pub fn fraction(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return if now_ms >= self.start_ms { 1.0 } else { 0.0 };
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        (elapsed as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    /// Eased progress at `now_ms`.
    #[must_use]
    pub fn progress(&self, now_ms: u64) -> f64 {
        self.easing.apply(self.fraction(now_ms))
    }

    /// Returns `true` once `now_ms` reaches the end of the tween.
    #[must_use]
    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms >= self.end_ms()
    }

    /// Returns `true` if `now_ms` lies inside `[start, end)`.
    #[must_use]
    pub fn is_running(&self, now_ms: u64) -> bool {
        now_ms >= self.start_ms && !self.is_finished(now_ms)
    }
}
