// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size};

/// Edge a [`MirageClip::Edge`] keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClipEdge {
    /// Keep a strip along the left edge.
    Left,
    /// Keep a strip along the right edge.
    Right,
    /// Keep a strip along the top edge.
    Top,
    /// Keep a strip along the bottom edge.
    Bottom,
}

/// Which part of the source element a mirage shows.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum MirageClip {
    /// The whole element.
    #[default]
    None,
    /// A rectangle in the element's local coordinates.
    Rect(Rect),
    /// A strip `offset` pixels deep along one edge.
    Edge {
        /// Edge to keep.
        edge: ClipEdge,
        /// Depth of the strip; always positive.
        offset: f64,
    },
}

impl MirageClip {
    /// Creates an edge clip, rejecting non-positive offsets.
    pub fn edge(edge: ClipEdge, offset: f64) -> Result<Self, MirageError> {
        if offset.is_finite() && offset > 0.0 {
            Ok(Self::Edge { edge, offset })
        } else {
            Err(MirageError::InvalidClipOffset(offset))
        }
    }

    /// The clipped region of a source of size `source`, in the source's local
    /// coordinates.
    ///
    /// The region never extends past the source bounds.
    #[must_use]
    pub fn clip_rect(&self, source: Size) -> Rect {
        let bounds = source.to_rect();
        match *self {
            Self::None => bounds,
            Self::Rect(rect) => rect.intersect(bounds),
            Self::Edge { edge, offset } => {
                let dx = offset.min(source.width);
                let dy = offset.min(source.height);
                match edge {
                    ClipEdge::Left => Rect::new(0.0, 0.0, dx, source.height),
                    ClipEdge::Right => {
                        Rect::new(source.width - dx, 0.0, source.width, source.height)
                    }
                    ClipEdge::Top => Rect::new(0.0, 0.0, source.width, dy),
                    ClipEdge::Bottom => {
                        Rect::new(0.0, source.height - dy, source.width, source.height)
                    }
                }
            }
        }
    }
}

/// Misuse of a [`Mirage`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum MirageError {
    /// `freeze` was called on a mirage that already holds a snapshot.
    #[error("mirage is already frozen")]
    AlreadyFrozen,
    /// The snapshot was requested from a mirage that holds none.
    #[error("mirage is not frozen")]
    NotFrozen,
    /// The source element has no measured size to capture.
    #[error("mirage source has not been measured")]
    NotMeasured,
    /// An edge clip offset was zero, negative, or not finite.
    #[error("clip offset must be positive, got {0}")]
    InvalidClipOffset(f64),
}

/// A frozen stand-in for a live element.
///
/// A mirage captures a snapshot `S` of its source element `E` so that the
/// copy can be animated while the original is hidden. Its lifecycle is:
///
/// 1. [`Mirage::new`] with the source and a clip policy.
/// 2. [`Mirage::freeze`] once the source is measured. The capture callback
///    produces the snapshot.
/// 3. Draw from [`Mirage::snapshot`] while frozen.
/// 4. [`Mirage::unfreeze`] to hand the snapshot back.
///
/// Freezing twice is rejected and leaves the held snapshot untouched.
/// Reading the snapshot of an unfrozen mirage is an error rather than a read
/// of stale pixels.
#[derive(Clone, Debug)]
pub struct Mirage<E, S> {
    source: E,
    clip: MirageClip,
    clip_rect: Rect,
    layout: Rect,
    snapshot: Option<S>,
}

impl<E, S> Mirage<E, S> {
    /// Creates an unfrozen mirage of `source`.
    #[must_use]
    pub fn new(source: E, clip: MirageClip) -> Self {
        Self {
            source,
            clip,
            clip_rect: Rect::ZERO,
            layout: Rect::ZERO,
            snapshot: None,
        }
    }

    /// The element this mirage copies.
    #[must_use]
    pub fn source(&self) -> &E {
        &self.source
    }

    /// The clip policy.
    #[must_use]
    pub fn clip(&self) -> MirageClip {
        self.clip
    }

    /// Region of the source captured by the last freeze.
    #[must_use]
    pub fn clip_rect(&self) -> Rect {
        self.clip_rect
    }

    /// Size the mirage occupies: the clipped source size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.clip_rect.size()
    }

    /// Returns `true` while a snapshot is held.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Captures the source.
    ///
    /// `source_size` is the source's measured size. `capture` receives the
    /// source and the clip rectangle in the source's local coordinates and
    /// returns the snapshot.
    pub fn freeze(
        &mut self,
        source_size: Size,
        capture: impl FnOnce(&E, Rect) -> S,
    ) -> Result<(), MirageError> {
        if self.snapshot.is_some() {
            log::warn!("refusing to freeze a mirage twice");
            return Err(MirageError::AlreadyFrozen);
        }
        let measured = source_size.width.is_finite()
            && source_size.height.is_finite()
            && source_size.width > 0.0
            && source_size.height > 0.0;
        if !measured {
            log::warn!("cannot freeze a mirage of an unmeasured source ({source_size:?})");
            return Err(MirageError::NotMeasured);
        }
        self.clip_rect = self.clip.clip_rect(source_size);
        self.snapshot = Some(capture(&self.source, self.clip_rect));
        Ok(())
    }

    /// Releases the snapshot, returning it if one was held.
    pub fn unfreeze(&mut self) -> Option<S> {
        self.snapshot.take()
    }

    /// The held snapshot.
    pub fn snapshot(&self) -> Result<&S, MirageError> {
        self.snapshot.as_ref().ok_or(MirageError::NotFrozen)
    }

    /// Where the mirage was last laid out, in its parent's coordinates.
    #[must_use]
    pub fn layout(&self) -> Rect {
        self.layout
    }

    /// Records where the mirage is laid out.
    pub fn set_layout(&mut self, rect: Rect) {
        self.layout = rect;
    }
}
