// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: drag, fling, snap, and wrap for section strips.
//!
//! [`GestureController`] is a small state machine that turns pointer events
//! into scroll offsets for a [`SectionIndex`](understory_sections::SectionIndex):
//!
//! ```text
//! Idle -> Dragging -> (Flinging | SnappingBack | WrappingToHead | WrappingToTail) -> Idle
//! ```
//!
//! - A down on a scrollable strip starts a [`DragSession`] and remembers the
//!   section under the offset as the original section. Any animation in flight
//!   is aborted where it stands.
//! - Once the pointer leaves the touch slop, moves scroll the content by the
//!   inverse of the pointer delta. Overscroll is allowed while dragging.
//! - On release, a fast pointer flings to the next section edge or, past either
//!   end of the strip, wraps around. A slow pointer snaps: standard sections
//!   compare the net drag against a trigger distance; wide sections trap the
//!   offset near their edges.
//! - Wraps animate one step past the end of the strip and then jump to the
//!   equivalent offset at the other end.
//!
//! Losing the tracked pointer while another is down hands tracking over
//! without resetting the drag. Cancel drops the gesture and leaves the offset
//! where it is.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_gesture::{GestureController, GestureState, PointerEvent, PointerId};
//! use understory_sections::SectionIndex;
//!
//! let mut sections = SectionIndex::new(12.0);
//! for _ in 0..3 {
//!     let id = sections.push(());
//!     sections.set_measured_size(id, Size::new(300.0, 400.0));
//! }
//!
//! let mut gestures = GestureController::default();
//! gestures.set_viewport_width(320.0);
//!
//! // A slow drag 250px to the left.
//! let p = PointerId(0);
//! gestures.handle(&PointerEvent::down(p, Point::new(400.0, 80.0), 0), &sections);
//! for step in 1..=50_u32 {
//!     let at = Point::new(400.0 - 5.0 * f64::from(step), 80.0);
//!     gestures.handle(&PointerEvent::moved(p, at, u64::from(step) * 20), &sections);
//! }
//! gestures.handle(&PointerEvent::up(p, Point::new(150.0, 80.0), 1000), &sections);
//! assert_eq!(gestures.state(), GestureState::SnappingBack);
//!
//! // Drive frames until the snap lands on the second section.
//! gestures.advance(1300, &sections);
//! assert_eq!(gestures.state(), GestureState::Idle);
//! assert_eq!(gestures.viewport().offset(), 312.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod controller;
pub mod drag;
mod pointer;
mod velocity;

pub use controller::{GestureConfig, GestureController, GestureState};
pub use drag::DragSession;
pub use pointer::{PointerEvent, PointerEventKind, PointerId};
pub use velocity::VelocityTracker;
