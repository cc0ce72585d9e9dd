// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sections --heading-base-level=0

//! Understory Sections: ordered horizontal section strips.
//!
//! A panorama lays its sections out left to right, in declaration order, with a
//! fixed margin after each one. This crate owns that strip:
//!
//! - [`Section`]: one panel with a measured size, a [`Visibility`], cached
//!   layout edges, and a caller-defined header payload.
//! - [`SectionIndex`]: the ordered arena of sections addressed by stable
//!   [`SectionId`]s. It recomputes layout edges and the content width eagerly
//!   whenever a measured size or visibility changes, and answers offset queries
//!   such as [`SectionIndex::section_under_offset`].
//!
//! The crate does not know about widgets or scrolling. Hosts measure their
//! section views, feed sizes back with [`SectionIndex::set_measured_size`], and
//! query the strip from their layout and gesture code.
//!
//! ## Layout rule
//!
//! Sections that occupy space ([`Visibility::Visible`] and [`Visibility::Hidden`])
//! are placed starting at `0.0`, each followed by one inter-section margin, so
//! the content width is `Σ(width + margin)`. That makes the content width the
//! period of the strip: drawing the first section again at `content_width` looks
//! exactly like the first section at `0.0`, which is what wrap-around relies on.
//! [`Visibility::Collapsed`] sections take no space at all.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_sections::SectionIndex;
//!
//! let mut index = SectionIndex::new(12.0);
//! let a = index.push("news");
//! let b = index.push("photos");
//! let c = index.push("people");
//! for id in [a, b, c] {
//!     index.set_measured_size(id, Size::new(300.0, 400.0));
//! }
//!
//! assert_eq!(index.content_width(), 936.0);
//! assert_eq!(index.section_under_offset(0.0), Some(a));
//! assert_eq!(index.section_under_offset(305.0), Some(b));
//! assert_eq!(index.section_under_offset(650.0), Some(c));
//! assert_eq!(index.next_visible(a), Some(b));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod index;
mod section;

pub use index::SectionIndex;
pub use section::{Section, SectionId, Visibility};
