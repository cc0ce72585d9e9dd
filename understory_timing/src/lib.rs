// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic animation timing primitives.
//!
//! This crate provides the small, deterministic building blocks that frame-driven
//! UI animations share:
//!
//! - [`Easing`]: closed set of easing curves mapping linear progress in `[0, 1]`
//!   to eased progress.
//! - [`Tween`]: a fixed-duration animation window anchored at a start timestamp.
//! - [`Timeline`]: a queue of cues at fixed offsets from a start timestamp, used to
//!   sequence multi-stage effects without scheduling deferred callbacks.
//!
//! Nothing here reads a clock. Every query takes the current time as a `u64`
//! millisecond timestamp supplied by the host, so the same inputs always produce
//! the same outputs. Tests can replay an animation exactly by feeding a scripted
//! sequence of timestamps.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::{Easing, Timeline, Tween};
//!
//! // A 400ms tween starting at t=1000.
//! let tween = Tween::new(1000, 400, Easing::EaseOutQuad);
//! assert_eq!(tween.progress(1000), 0.0);
//! assert_eq!(tween.progress(1400), 1.0);
//! assert!(tween.is_finished(1400));
//!
//! // Two cues, 150ms and 300ms after the start.
//! let mut timeline = Timeline::new(1000);
//! timeline.push(150, "second");
//! timeline.push(300, "third");
//! let fired: Vec<_> = timeline.poll(1200).collect();
//! assert_eq!(fired, vec![(150, "second")]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod easing;
mod timeline;
mod tween;

pub use easing::Easing;
pub use timeline::Timeline;
pub use tween::Tween;
