// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::Size;

use crate::section::{Section, SectionId, Visibility};

/// Ordered arena of sections with cached horizontal layout.
///
/// See the crate docs for the layout rule. Every mutation that can change the
/// layout recomputes it before returning, so queries never observe stale edges.
#[derive(Clone, Debug)]
pub struct SectionIndex<H> {
    sections: Vec<Section<H>>,
    margin: f64,
    content_width: f64,
    visible_count: usize,
}

impl<H> SectionIndex<H> {
    /// Creates an empty index with the given inter-section margin.
    ///
    /// Negative or non-finite margins are treated as zero.
    #[must_use]
    pub fn new(margin: f64) -> Self {
        let margin = if margin.is_finite() { margin.max(0.0) } else { 0.0 };
        Self {
            sections: Vec::new(),
            margin,
            content_width: 0.0,
            visible_count: 0,
        }
    }

    /// Appends a section with a zero size and returns its id.
    ///
    /// # Panics
    ///
    /// Panics if the index already holds `u32::MAX` sections.
    pub fn push(&mut self, header: H) -> SectionId {
        assert!(
            u32::try_from(self.sections.len()).is_ok_and(|n| n < u32::MAX),
            "too many sections"
        );
        let id = SectionId::new(self.sections.len());
        self.sections.push(Section::new(header));
        self.relayout();
        id
    }

    /// Returns the inter-section margin.
    #[must_use]
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Returns the number of sections, whatever their visibility.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the index holds no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns the section for `id`.
    #[must_use]
    pub fn get(&self, id: SectionId) -> Option<&Section<H>> {
        self.sections.get(id.index())
    }

    /// Returns the header payload of `id` mutably.
    ///
    /// Only the payload is exposed mutably; sizes and visibility go through the
    /// setters so the layout stays in sync.
    pub fn header_mut(&mut self, id: SectionId) -> Option<&mut H> {
        self.sections.get_mut(id.index()).map(Section::header_mut)
    }

    /// Iterates over all sections in declaration order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (SectionId, &Section<H>)> + '_ {
        self.sections
            .iter()
            .enumerate()
            .map(|(i, s)| (SectionId::new(i), s))
    }

    /// Records a measured size for `id` and relayouts.
    ///
    /// Returns `false` if `id` is unknown or the size did not change.
    pub fn set_measured_size(&mut self, id: SectionId, size: Size) -> bool {
        let Some(section) = self.sections.get_mut(id.index()) else {
            return false;
        };
        let size = Size::new(sanitize(size.width), sanitize(size.height));
        if section.size == size {
            return false;
        }
        section.size = size;
        self.relayout();
        true
    }

    /// Changes the visibility of `id` and relayouts.
    ///
    /// Returns `false` if `id` is unknown or the visibility did not change.
    pub fn set_visibility(&mut self, id: SectionId, visibility: Visibility) -> bool {
        let Some(section) = self.sections.get_mut(id.index()) else {
            return false;
        };
        if section.visibility == visibility {
            return false;
        }
        section.visibility = visibility;
        self.relayout();
        true
    }

    /// Total width of the strip, including the margin after the last slot.
    #[must_use]
    pub fn content_width(&self) -> f64 {
        self.content_width
    }

    /// Number of [`Visibility::Visible`] sections.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Returns `true` if the strip is wider than `viewport_width` and has at
    /// least one visible section.
    #[must_use]
    pub fn is_scrollable(&self, viewport_width: f64) -> bool {
        self.visible_count > 0 && self.content_width > viewport_width
    }

    /// Returns the visible section under content offset `x`.
    ///
    /// A section is under `x` when `x` lies in `[left - margin, right)`. Returns
    /// `None` when no visible section matches, for example when `x` is outside
    /// the strip during a wrap.
    #[must_use]
    pub fn section_under_offset(&self, x: f64) -> Option<SectionId> {
        if self.visible_count == 0 || !x.is_finite() {
            return None;
        }
        let found = self.iter().find(|(_, s)| {
            s.visibility.is_visible() && x >= s.left - self.margin && x < s.right
        });
        if found.is_none() {
            log::trace!("no section under offset {x}");
        }
        found.map(|(id, _)| id)
    }

    /// First visible section in declaration order.
    #[must_use]
    pub fn first_visible(&self) -> Option<SectionId> {
        self.iter()
            .find(|(_, s)| s.visibility.is_visible())
            .map(|(id, _)| id)
    }

    /// Last visible section in declaration order.
    #[must_use]
    pub fn last_visible(&self) -> Option<SectionId> {
        self.iter()
            .rev()
            .find(|(_, s)| s.visibility.is_visible())
            .map(|(id, _)| id)
    }

    /// First section occupying a slot, visible or hidden.
    ///
    /// This is the section that starts the strip at offset `0.0`.
    #[must_use]
    pub fn first_placed(&self) -> Option<SectionId> {
        self.iter()
            .find(|(_, s)| s.visibility.occupies_space())
            .map(|(id, _)| id)
    }

    /// Last section occupying a slot, visible or hidden.
    ///
    /// Its right edge plus one margin is the content width.
    #[must_use]
    pub fn last_placed(&self) -> Option<SectionId> {
        self.iter()
            .rev()
            .find(|(_, s)| s.visibility.occupies_space())
            .map(|(id, _)| id)
    }

    /// Next visible section after `id`, without wrapping.
    #[must_use]
    pub fn next_visible(&self, id: SectionId) -> Option<SectionId> {
        self.iter()
            .skip(id.index() + 1)
            .find(|(_, s)| s.visibility.is_visible())
            .map(|(id, _)| id)
    }

    /// Previous visible section before `id`, without wrapping.
    #[must_use]
    pub fn previous_visible(&self, id: SectionId) -> Option<SectionId> {
        self.sections
            .get(..id.index())?
            .iter()
            .enumerate()
            .rev()
            .find(|(_, s)| s.visibility.is_visible())
            .map(|(i, _)| SectionId::new(i))
    }

    fn relayout(&mut self) {
        let mut cursor = 0.0;
        let mut visible = 0;
        for section in &mut self.sections {
            section.left = cursor;
            if section.visibility.occupies_space() {
                section.right = cursor + section.size.width;
                cursor = section.right + self.margin;
            } else {
                section.right = cursor;
            }
            if section.visibility.is_visible() {
                visible += 1;
            }
        }
        self.content_width = cursor;
        self.visible_count = visible;
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
