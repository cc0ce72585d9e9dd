// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use understory_scroll::{Viewport, WrapDirection, WrapTransition};
use understory_sections::{SectionId, SectionIndex};

use crate::styles::SlidingStyle;

/// Measured widths the engine needs besides the section strip.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerMetrics {
    /// Width of the visible window onto the strip.
    pub viewport_width: f64,
    /// Width of the header layer.
    pub header_width: f64,
    /// Width of the background layer after scaling.
    pub background_width: f64,
}

/// Tuning for [`ParallaxLayoutEngine`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxParams {
    /// How the header and background follow the content.
    pub style: SlidingStyle,
    /// Width of the next section left peeking into the viewport.
    ///
    /// A towed header trails the content by `viewport_width - peeking_width / 2`.
    pub peeking_width: f64,
    /// How far a towed background trails the content.
    pub background_trailing_width: f64,
    /// Gap between the header and its mirage during a wrap.
    pub header_gap: f64,
}

impl Default for ParallaxParams {
    fn default() -> Self {
        Self {
            style: SlidingStyle::default(),
            peeking_width: 48.0,
            background_trailing_width: 210.0,
            header_gap: 20.0,
        }
    }
}

/// Where to draw one section for the current frame, in content coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionPlacement {
    /// The section.
    pub id: SectionId,
    /// Left edge.
    pub left: f64,
    /// Right edge (exclusive).
    pub right: f64,
    /// `true` if the section was moved one content width to cover the seam
    /// of a wrap.
    pub wrapped: bool,
}

/// Output of [`ParallaxLayoutEngine::layout`].
///
/// All positions are in content coordinates. Subtract the viewport offset to
/// get screen positions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerLayout {
    /// Left edge of the background layer.
    pub background_left: f64,
    /// Left edge of the header layer.
    pub header_left: f64,
    /// Left edge of the header mirage, while a wrap is in flight.
    pub header_mirage_left: Option<f64>,
    /// Every section that occupies a slot, in declaration order.
    pub sections: Vec<SectionPlacement>,
}

#[derive(Clone, Copy, Debug)]
enum Layer {
    Header,
    Background,
}

/// Computes parallax layer offsets and section placements.
///
/// The engine is stateless: it reads the section strip and viewport and never
/// mutates either. Calling [`ParallaxLayoutEngine::layout`] twice with the same
/// inputs gives the same output.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParallaxLayoutEngine {
    params: ParallaxParams,
}

impl ParallaxLayoutEngine {
    /// Creates an engine with the given parameters.
    #[must_use]
    pub fn new(params: ParallaxParams) -> Self {
        Self { params }
    }

    /// Returns the parameters.
    #[must_use]
    pub fn params(&self) -> &ParallaxParams {
        &self.params
    }

    /// Header layer offset at scroll offset `x`, ignoring any wrap in flight.
    #[must_use]
    pub fn header_offset_at<H>(
        &self,
        sections: &SectionIndex<H>,
        metrics: &LayerMetrics,
        x: f64,
    ) -> f64 {
        self.plain(Layer::Header, sections, metrics, x)
    }

    /// Background layer offset at scroll offset `x`, ignoring any wrap in
    /// flight.
    #[must_use]
    pub fn background_offset_at<H>(
        &self,
        sections: &SectionIndex<H>,
        metrics: &LayerMetrics,
        x: f64,
    ) -> f64 {
        self.plain(Layer::Background, sections, metrics, x)
    }

    /// Lays out the header, background, and sections for the viewport's
    /// current offset.
    #[must_use]
    pub fn layout<H>(
        &self,
        sections: &SectionIndex<H>,
        viewport: &Viewport,
        metrics: &LayerMetrics,
    ) -> LayerLayout {
        let x = viewport.offset();
        let wrap = viewport.wrap().copied();

        let (header_left, background_left) = match wrap {
            Some(wrap) => (
                self.wrapped(Layer::Header, sections, metrics, &wrap, x),
                self.wrapped(Layer::Background, sections, metrics, &wrap, x),
            ),
            None => (
                self.plain(Layer::Header, sections, metrics, x),
                self.plain(Layer::Background, sections, metrics, x),
            ),
        };

        let header_mirage_left = wrap.map(|w| {
            let step = metrics.header_width + self.params.header_gap;
            match w.direction {
                WrapDirection::ToHead => header_left - step,
                WrapDirection::ToTail => header_left + step,
            }
        });

        LayerLayout {
            background_left,
            header_left,
            header_mirage_left,
            sections: place_sections(sections, wrap.map(|w| w.direction)),
        }
    }

    fn plain<H>(&self, layer: Layer, sections: &SectionIndex<H>, m: &LayerMetrics, x: f64) -> f64 {
        if sections.visible_count() == 0 || !x.is_finite() {
            return 0.0;
        }
        let cw = sections.content_width();
        match self.params.style {
            SlidingStyle::Synced => 0.0,
            SlidingStyle::Bounded => {
                let layer_width = match layer {
                    Layer::Header => m.header_width,
                    Layer::Background => m.background_width,
                };
                let trip = cw - m.viewport_width;
                if trip.abs() < f64::EPSILON {
                    0.0
                } else {
                    x * (cw - layer_width) / trip
                }
            }
            SlidingStyle::Towed => {
                let trailing = match layer {
                    Layer::Header => m.viewport_width - self.params.peeking_width / 2.0,
                    Layer::Background => self.params.background_trailing_width,
                };
                if cw <= 0.0 { 0.0 } else { x * (cw - trailing) / cw }
            }
        }
    }

    fn wrapped<H>(
        &self,
        layer: Layer,
        sections: &SectionIndex<H>,
        m: &LayerMetrics,
        wrap: &WrapTransition,
        x: f64,
    ) -> f64 {
        let cw = sections.content_width();
        let (canonical, shift) = match wrap.direction {
            WrapDirection::ToHead => (0.0, cw),
            WrapDirection::ToTail => {
                let canonical = sections
                    .last_placed()
                    .and_then(|id| sections.get(id))
                    .map_or(0.0, |s| s.left());
                (canonical, -cw)
            }
        };
        let anchor = self.plain(layer, sections, m, wrap.anchor_offset);
        let destination = self.plain(layer, sections, m, canonical) + shift;
        anchor + (destination - anchor) * wrap.progress(x)
    }
}

fn place_sections<H>(
    sections: &SectionIndex<H>,
    wrap: Option<WrapDirection>,
) -> Vec<SectionPlacement> {
    let cw = sections.content_width();
    let moved = match wrap {
        Some(WrapDirection::ToHead) => sections.first_placed().map(|id| (id, cw)),
        Some(WrapDirection::ToTail) => sections.last_placed().map(|id| (id, -cw)),
        None => None,
    };
    sections
        .iter()
        .filter(|(_, s)| s.visibility().occupies_space())
        .map(|(id, s)| {
            let shift = moved.filter(|(m, _)| *m == id).map(|(_, d)| d);
            SectionPlacement {
                id,
                left: s.left() + shift.unwrap_or(0.0),
                right: s.right() + shift.unwrap_or(0.0),
                wrapped: shift.is_some(),
            }
        })
        .collect()
}
