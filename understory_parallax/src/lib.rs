// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_parallax --heading-base-level=0

//! Understory Parallax: layer offsets for a horizontally scrolling strip.
//!
//! A panorama draws three things behind one another: a wide background, a
//! header (usually a large title), and the section strip itself. The strip
//! scrolls with the viewport; the header and background follow it at their own
//! rates according to a [`SlidingStyle`]:
//!
//! - [`SlidingStyle::Bounded`]: `x * (cw - lw) / (cw - vw)`. The layer's far
//!   edge reaches the content's far edge exactly when the viewport does.
//! - [`SlidingStyle::Towed`]: `x * (cw - trailing) / cw`. The layer trails the
//!   content by a fixed width (`vw - peeking / 2` for the header, the
//!   background trailing width for the background).
//! - [`SlidingStyle::Synced`]: `0`. The layer is glued to the content origin.
//!
//! Here `x` is the scroll offset, `cw` the content width, `vw` the viewport
//! width, and `lw` the layer width.
//!
//! [`ParallaxLayoutEngine::layout`] is a pure function of a
//! [`SectionIndex`](understory_sections::SectionIndex), a
//! [`Viewport`](understory_scroll::Viewport), and [`LayerMetrics`]. It never
//! mutates its inputs.
//!
//! ## Wrap-around
//!
//! While the viewport carries a [`WrapTransition`](understory_scroll::WrapTransition),
//! each layer glides linearly, in wrap progress, from the value it had when
//! the wrap began to the value it will have once the viewport jumps back into
//! the strip (shifted by one content width). Screen positions are therefore
//! continuous at both ends of the wrap. The edge section that covers the seam
//! is placed one content width away, and a header mirage fills the gap the
//! header opens.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_parallax::{LayerMetrics, ParallaxLayoutEngine, ParallaxParams, SlidingStyle};
//! use understory_scroll::Viewport;
//! use understory_sections::SectionIndex;
//!
//! let mut sections = SectionIndex::new(12.0);
//! for title in ["news", "photos", "people"] {
//!     let id = sections.push(title);
//!     sections.set_measured_size(id, Size::new(300.0, 400.0));
//! }
//!
//! let engine = ParallaxLayoutEngine::new(ParallaxParams {
//!     style: SlidingStyle::Bounded,
//!     ..ParallaxParams::default()
//! });
//! let metrics = LayerMetrics {
//!     viewport_width: 320.0,
//!     header_width: 600.0,
//!     background_width: 1200.0,
//! };
//!
//! let mut viewport = Viewport::new();
//! viewport.set_offset(616.0);
//! let layout = engine.layout(&sections, &viewport, &metrics);
//!
//! // At the end of the strip the header's right edge meets the content's.
//! assert_eq!(layout.header_left + 600.0, 936.0);
//! assert_eq!(layout.sections.len(), 3);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod engine;
mod styles;

pub use engine::{
    LayerLayout, LayerMetrics, ParallaxLayoutEngine, ParallaxParams, SectionPlacement,
};
pub use styles::{BackgroundScaling, ParseStyleError, SlidingStyle};
