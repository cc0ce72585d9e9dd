// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// Stable identifier of a section inside a [`crate::SectionIndex`].
///
/// Identifiers are dense declaration-order indices. Sections are never removed
/// or reordered, so an id stays valid for the lifetime of its index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionId(u32);

impl SectionId {
    pub(crate) fn new(idx: usize) -> Self {
        // `SectionIndex::push` asserts the bound.
        Self(u32::try_from(idx).unwrap_or(u32::MAX))
    }

    /// Returns the declaration-order index of this section.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Visibility of a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Drawn, hit-testable, and reachable by navigation.
    #[default]
    Visible,
    /// Keeps its slot in the strip but is not drawn, not under any offset,
    /// and skipped by navigation.
    Hidden,
    /// Takes no space at all.
    Collapsed,
}

impl Visibility {
    /// Returns `true` if a section with this visibility occupies a slot.
    #[must_use]
    pub const fn occupies_space(self) -> bool {
        matches!(self, Self::Visible | Self::Hidden)
    }

    /// Returns `true` for [`Visibility::Visible`].
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// One horizontally stacked panel.
#[derive(Clone, Debug)]
pub struct Section<H> {
    pub(crate) header: H,
    pub(crate) size: Size,
    pub(crate) visibility: Visibility,
    pub(crate) left: f64,
    pub(crate) right: f64,
}

impl<H> Section<H> {
    pub(crate) fn new(header: H) -> Self {
        Self {
            header,
            size: Size::ZERO,
            visibility: Visibility::Visible,
            left: 0.0,
            right: 0.0,
        }
    }

    /// Returns the header payload.
    #[must_use]
    pub fn header(&self) -> &H {
        &self.header
    }

    /// Returns the header payload mutably.
    pub fn header_mut(&mut self) -> &mut H {
        &mut self.header
    }

    /// Returns the measured size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the measured width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.size.width
    }

    /// Returns the measured height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.size.height
    }

    /// Returns the visibility.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Left layout edge in content coordinates.
    ///
    /// For collapsed sections this is the position the section would take if
    /// it were shown; its width contributes nothing.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Right layout edge in content coordinates (exclusive).
    #[must_use]
    pub fn right(&self) -> f64 {
        self.right
    }

    /// Returns `true` if this section is wider than `viewport_width`.
    ///
    /// A section exactly as wide as the viewport is not wide.
    #[must_use]
    pub fn is_wide(&self, viewport_width: f64) -> bool {
        self.size.width > viewport_width
    }
}
