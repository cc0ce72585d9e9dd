// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_flip --heading-base-level=0

//! Understory Flip: page-turn transitions with frozen stand-ins.
//!
//! This crate has three layers:
//!
//! - [`FlipSpec`] and [`FlipFrame`]: the pose of a flipping element at a
//!   given progress (rotation about a vertical axis, depth, and alpha) and its
//!   perspective projection onto the screen.
//! - [`Mirage`]: a snapshot of a live element, with a clip policy and a
//!   freeze/unfreeze lifecycle, so a copy can be animated while the original is
//!   hidden.
//! - [`TransitionAnimator`]: the staged flip-out and flip-in sequences. Three
//!   elements flip 150ms apart; stage poses are a pure function of time and
//!   discrete effects are reported as [`TransitionEvent`]s.
//!
//! Nothing here draws. Hosts capture snapshots through a callback passed to
//! [`Mirage::freeze`] and draw each stage with its [`FlipFrame`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_flip::{Mirage, MirageClip, Stage, TransitionAnimator, TransitionEvent};
//!
//! // Snapshots here are just a label.
//! let mut animator: TransitionAnimator<&str, &str> = TransitionAnimator::new();
//! let title = Mirage::new("photos", MirageClip::None);
//! animator
//!     .flip_out(title, Size::new(180.0, 48.0), 0, |_, _| "pixels")
//!     .unwrap();
//! assert!(animator.live_header_hidden());
//!
//! animator.advance(0);
//! let events = animator.advance(150);
//! assert_eq!(events.as_slice(), [TransitionEvent::Started(Stage::SectionTitle)]);
//!
//! // The content finishes 400ms after it starts at 300ms.
//! animator.advance(700);
//! assert!(!animator.is_active());
//! assert!(!animator.mirage().unwrap().is_frozen());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod flip;
mod mirage;
mod transition;

pub use flip::{CAMERA_DISTANCE, Fade, FlipFrame, FlipSpec};
pub use mirage::{ClipEdge, Mirage, MirageClip, MirageError};
pub use transition::{
    FlipDirection, STAGE_STAGGER_MS, Stage, TransitionAnimator, TransitionError, TransitionEvent,
};
