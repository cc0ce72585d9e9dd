// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scroll --heading-base-level=0

//! Understory Scroll: headless 1D scroll state and scroll physics.
//!
//! This crate models the horizontal scroll position of a strip of content and
//! the animations that move it:
//!
//! - [`Viewport`]: the current scroll offset, the offset before the last change,
//!   and an optional [`WrapTransition`] describing an in-flight wrap-around.
//! - [`ScrollPhysics`]: instant jumps, eased animations between two offsets,
//!   and velocity-driven flings with a constant-deceleration model.
//!
//! Physics are pull-based. The host calls [`ScrollPhysics::advance`] once per
//! frame with the current timestamp and copies the result into its
//! [`Viewport`]. There are no timers or threads: the offset is a pure function
//! of the timestamps supplied, so tests can replay motion exactly.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_scroll::{ScrollPhysics, Viewport};
//!
//! let mut viewport = Viewport::new();
//! let mut physics = ScrollPhysics::default();
//!
//! // Animate from 0 to 312 over 300ms, starting at t=0.
//! physics.animate_to(0.0, 312.0, 300, 0);
//! for now in (0..=300).step_by(16) {
//!     viewport.set_offset(physics.advance(now));
//! }
//! viewport.set_offset(physics.advance(300));
//! assert!(physics.is_finished());
//! assert_eq!(viewport.offset(), 312.0);
//! ```
//!
//! ## Flings
//!
//! [`ScrollPhysics::fling`] derives its own distance and duration from the
//! release velocity: a constant deceleration `a` stops a velocity `v` after
//! `v² / 2a` pixels and `|v| / a` seconds. The end point is clamped to the
//! caller's bounds, and the motion is eased with the same decay curve as
//! [`ScrollPhysics::animate_to`].
//!
//! This crate is `no_std`.

#![no_std]

mod physics;
mod viewport;

pub use physics::{PhysicsConfig, ScrollPhysics};
pub use viewport::{Viewport, ViewportDebugInfo, WrapDirection, WrapTransition};
