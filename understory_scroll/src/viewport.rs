// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Which way a wrap-around travels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WrapDirection {
    /// Past the last section, back to the first one.
    ToHead,
    /// Before the first section, back to the last one.
    ToTail,
}

/// An in-flight wrap-around.
///
/// `anchor_offset` is the scroll offset at the moment the wrap began and
/// `destination_offset` the offset the wrap animation is heading for (outside
/// the strip). Layers that must glide across the seam interpolate between their
/// values at these two offsets using [`WrapTransition::progress`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrapTransition {
    /// Direction of travel.
    pub direction: WrapDirection,
    /// Scroll offset when the wrap began.
    pub anchor_offset: f64,
    /// Scroll offset the wrap animation ends on.
    pub destination_offset: f64,
}

impl WrapTransition {
    /// Fraction of the way from anchor to destination at `offset`, in `[0, 1]`.
    ///
    /// A degenerate transition whose anchor equals its destination reports
    /// `1.0`.
    #[must_use]
    pub fn progress(&self, offset: f64) -> f64 {
        let span = self.destination_offset - self.anchor_offset;
        if span.abs() < f64::EPSILON || !offset.is_finite() {
            return 1.0;
        }
        ((offset - self.anchor_offset) / span).clamp(0.0, 1.0)
    }
}

/// Horizontal scroll state.
///
/// The viewport never clamps: overscroll past either end of the content is a
/// valid transient state during a drag. Owners decide where the offset should
/// settle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    offset: f64,
    previous_offset: f64,
    wrap: Option<WrapTransition>,
}

impl Viewport {
    /// Creates a viewport at offset zero with no wrap in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scroll offset in content coordinates.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Offset before the most recent change.
    #[must_use]
    pub fn previous_offset(&self) -> f64 {
        self.previous_offset
    }

    /// The wrap transition in flight, if any.
    #[must_use]
    pub fn wrap(&self) -> Option<&WrapTransition> {
        self.wrap.as_ref()
    }

    /// Returns `true` while a wrap transition is in flight.
    #[must_use]
    pub fn is_wrapping(&self) -> bool {
        self.wrap.is_some()
    }

    /// Moves to `offset`, returning `true` if the offset changed.
    ///
    /// Non-finite offsets are ignored.
    pub fn set_offset(&mut self, offset: f64) -> bool {
        if !offset.is_finite() || offset == self.offset {
            return false;
        }
        self.previous_offset = self.offset;
        self.offset = offset;
        true
    }

    /// Moves by `delta`, returning `true` if the offset changed.
    pub fn scroll_by(&mut self, delta: f64) -> bool {
        self.set_offset(self.offset + delta)
    }

    /// Starts a wrap transition from the current offset towards `destination`.
    ///
    /// Replaces any wrap already in flight.
    pub fn begin_wrap(&mut self, direction: WrapDirection, destination: f64) -> WrapTransition {
        let wrap = WrapTransition {
            direction,
            anchor_offset: self.offset,
            destination_offset: destination,
        };
        log::debug!(
            "wrap {direction:?} from {} to {destination}",
            wrap.anchor_offset
        );
        self.wrap = Some(wrap);
        wrap
    }

    /// Ends the wrap transition in flight, returning it.
    pub fn end_wrap(&mut self) -> Option<WrapTransition> {
        self.wrap.take()
    }

    /// Snapshot of the viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            offset: self.offset,
            previous_offset: self.previous_offset,
            wrap: self.wrap,
            wrap_progress: self.wrap.map(|w| w.progress(self.offset)),
        }
    }
}

/// Debug snapshot of a [`Viewport`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportDebugInfo {
    /// Current scroll offset.
    pub offset: f64,
    /// Offset before the most recent change.
    pub previous_offset: f64,
    /// Wrap transition in flight.
    pub wrap: Option<WrapTransition>,
    /// Progress of the wrap transition at the current offset.
    pub wrap_progress: Option<f64>,
}
