// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_panorama --heading-base-level=0

//! Understory Panorama: a horizontally scrolling canvas of sections.
//!
//! A panorama shows a strip of sections wider than the viewport under a large
//! header and over a background. Dragging scrolls the strip; releasing snaps or
//! flings to a section edge and wraps around past either end. The header and
//! background follow the strip at their own rate per the configured
//! [`SlidingStyle`]. Selecting a section can flip the whole panorama away in
//! three staggered stages.
//!
//! This crate ties the lower layers together:
//!
//! - [`understory_sections`] holds the strip.
//! - [`understory_gesture`] turns pointers into scroll offsets.
//! - [`understory_parallax`] places layers for an offset.
//! - [`understory_flip`] runs flip transitions.
//!
//! The host view system is reached through two traits. [`ViewHost`] measures
//! and captures opaque elements and creates generated headers. [`Canvas`]
//! draws a frame.
//!
//! ## Building
//!
//! [`PanoramaBuilder`] takes a [`PanoramaConfig`], a [`StyleContext`], and
//! the declared children, validates the structure, and returns a
//! [`PanoramaView`]. Malformed structure fails with a [`ConfigError`] and no
//! view is produced.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_panorama::{
//!     Constraint, GeneratedHeader, Node, PanoramaBuilder, PanoramaConfig, SectionBuilder,
//!     StyleContext, ViewHost,
//! };
//!
//! // Elements are just their desired sizes here.
//! struct Host;
//! impl ViewHost for Host {
//!     type Element = Size;
//!     type Snapshot = ();
//!     type Typeface = ();
//!     fn measure(&mut self, e: &Size, w: Constraint, h: Constraint) -> Size {
//!         Size::new(w.resolve(e.width), h.resolve(e.height))
//!     }
//!     fn capture(&mut self, _: &Size, _: Rect) {}
//!     fn create_header(&mut self, _: &GeneratedHeader<Size>, _: &StyleContext<()>) -> Size {
//!         Size::new(200.0, 48.0)
//!     }
//! }
//!
//! let mut host = Host;
//! let mut builder = PanoramaBuilder::new(PanoramaConfig::default(), StyleContext::uniform(()));
//! for _ in 0..3 {
//!     builder = builder.section(SectionBuilder::new().child(Node::new(Size::new(300.0, 300.0))));
//! }
//! let mut view = builder.build(&mut host).unwrap();
//! view.measure(&mut host, Size::new(320.0, 480.0));
//!
//! // Sections are at least the viewport width minus the peeking width.
//! assert_eq!(view.sections().content_width(), 3.0 * (300.0 + 12.0));
//! let second = view.sections().iter().nth(1).unwrap().0;
//! assert!(view.scroll_to_section(second, false, 0));
//! assert_eq!(view.scroll_offset(), 312.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod builder;
mod config;
mod error;
pub mod host;
mod overlay;
mod style;
mod view;

pub use builder::{Node, PanoramaBuilder, SectionBuilder};
pub use config::{HeaderVisibility, PanoramaConfig, PanoramaFlags, PanoramaMetrics};
pub use error::{ConfigError, PanoramaError};
pub use host::{Canvas, Constraint, ViewHost};
pub use style::{
    GeneratedHeader, PANORAMA_TITLE_SIZE, SECTION_TITLE_SIZE, StyleContext, TITLE_PADDING,
    TitleText, Weight,
};
pub use view::{FrameReport, HeaderSlot, PanoramaView, SectionSlot};

pub use understory_gesture::{PointerEvent, PointerEventKind, PointerId};
pub use understory_parallax::{BackgroundScaling, SlidingStyle};
pub use understory_sections::{SectionId, Visibility};
