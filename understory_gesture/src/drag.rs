// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session: the pointers of one gesture and how far they have moved.
//!
//! ## Usage
//!
//! 1) Start a session with [`DragSession::new`] when the first pointer goes down.
//! 2) Add further pointers with [`DragSession::add_pointer`].
//! 3) On each move call [`DragSession::update`]; only the active pointer yields a delta.
//! 4) When a pointer goes up call [`DragSession::remove_pointer`]. Losing the
//!    active pointer hands tracking to another one without losing the net drag.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::{DragSession, PointerId};
//!
//! let mut drag = DragSession::new(PointerId(1), Point::new(200.0, 50.0), 0, None, 8000.0);
//! let delta = drag.update(PointerId(1), Point::new(150.0, 50.0), 16).unwrap();
//! assert_eq!(delta.x, -50.0);
//! // Moving left drags the content forward.
//! assert_eq!(drag.drag_distance(), 50.0);
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;
use understory_sections::SectionId;

use crate::pointer::PointerId;
use crate::velocity::VelocityTracker;

/// Tracks one drag gesture from first down to last up.
#[derive(Clone, Debug)]
pub struct DragSession {
    active: PointerId,
    pointers: SmallVec<[(PointerId, Point); 4]>,
    first: Point,
    last: Point,
    original_section: Option<SectionId>,
    velocity: VelocityTracker,
    moving: bool,
}

impl DragSession {
    /// Starts a session for `pointer` going down at `position`.
    ///
    /// `original_section` is the section under the scroll offset at this
    /// moment; releases that do not commit to a new section settle back on it.
    #[must_use]
    pub fn new(
        pointer: PointerId,
        position: Point,
        time_ms: u64,
        original_section: Option<SectionId>,
        max_velocity: f64,
    ) -> Self {
        let mut velocity = VelocityTracker::new(max_velocity);
        velocity.add(time_ms, position.x);
        let mut pointers = SmallVec::new();
        pointers.push((pointer, position));
        Self {
            active: pointer,
            pointers,
            first: position,
            last: position,
            original_section,
            velocity,
            moving: false,
        }
    }

    /// The pointer whose motion drives the drag.
    #[must_use]
    pub fn active_pointer(&self) -> PointerId {
        self.active
    }

    /// Number of pointers currently down.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Positions of all pointers currently down.
    pub fn pointers(&self) -> impl Iterator<Item = (PointerId, Point)> + '_ {
        self.pointers.iter().copied()
    }

    /// Where the drag started, adjusted for any re-anchoring.
    #[must_use]
    pub fn first(&self) -> Point {
        self.first
    }

    /// Last position of the active pointer.
    #[must_use]
    pub fn last(&self) -> Point {
        self.last
    }

    /// Section under the scroll offset when the drag started.
    #[must_use]
    pub fn original_section(&self) -> Option<SectionId> {
        self.original_section
    }

    /// Net horizontal drag in scroll direction.
    ///
    /// Positive when the pointer moved left, which pulls later sections in.
    #[must_use]
    pub fn drag_distance(&self) -> f64 {
        self.first.x - self.last.x
    }

    /// Release velocity in scroll direction, in pixels per second.
    #[must_use]
    pub fn scroll_velocity(&self) -> f64 {
        -self.velocity.velocity()
    }

    /// Returns `true` once the drag has left the touch slop.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Marks the drag as moving content.
    pub fn start_moving(&mut self) {
        self.moving = true;
    }

    /// Adds a pointer that went down during the drag.
    pub fn add_pointer(&mut self, pointer: PointerId, position: Point) {
        match self.pointers.iter_mut().find(|(id, _)| *id == pointer) {
            Some(slot) => slot.1 = position,
            None => self.pointers.push((pointer, position)),
        }
    }

    /// Records that `pointer` moved to `position`.
    ///
    /// Returns the movement since the last update of the active pointer, or
    /// `None` for unknown or non-active pointers.
    pub fn update(&mut self, pointer: PointerId, position: Point, time_ms: u64) -> Option<Vec2> {
        let slot = self.pointers.iter_mut().find(|(id, _)| *id == pointer)?;
        slot.1 = position;
        if pointer != self.active {
            return None;
        }
        let delta = position - self.last;
        self.last = position;
        self.velocity.add(time_ms, position.x);
        Some(delta)
    }

    /// Removes `pointer`, returning `true` if any pointer is still down.
    ///
    /// If the active pointer goes, the next remaining pointer takes over.
    /// `first` is shifted so [`DragSession::drag_distance`] is unchanged, and
    /// the velocity window restarts.
    pub fn remove_pointer(&mut self, pointer: PointerId) -> bool {
        self.pointers.retain(|(id, _)| *id != pointer);
        if pointer == self.active {
            let Some(&(next, position)) = self.pointers.first() else {
                return false;
            };
            let net = self.first - self.last;
            self.active = next;
            self.last = position;
            self.first = position + net;
            self.velocity.clear();
            log::debug!("drag re-anchored from {pointer:?} to {next:?}");
        }
        !self.pointers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::DragSession;
    use crate::PointerId;

    const A: PointerId = PointerId(1);
    const B: PointerId = PointerId(2);

    fn session() -> DragSession {
        DragSession::new(A, Point::new(100.0, 10.0), 0, None, 8000.0)
    }

    #[test]
    fn new_session_is_still() {
        let drag = session();
        assert!(!drag.is_moving());
        assert_eq!(drag.drag_distance(), 0.0);
        assert_eq!(drag.scroll_velocity(), 0.0);
        assert_eq!(drag.pointer_count(), 1);
    }

    #[test]
    fn deltas_come_from_the_active_pointer() {
        let mut drag = session();
        drag.add_pointer(B, Point::new(300.0, 10.0));
        assert_eq!(drag.update(B, Point::new(250.0, 10.0), 10), None);
        assert_eq!(
            drag.update(A, Point::new(90.0, 12.0), 10),
            Some(Vec2::new(-10.0, 2.0))
        );
        assert_eq!(drag.update(PointerId(9), Point::ZERO, 20), None);
        assert_eq!(drag.drag_distance(), 10.0);
    }

    #[test]
    fn leftward_motion_is_forward_velocity() {
        let mut drag = session();
        drag.update(A, Point::new(50.0, 10.0), 50);
        assert_eq!(drag.scroll_velocity(), 1000.0);
    }

    #[test]
    fn losing_active_pointer_reanchors() {
        let mut drag = session();
        drag.add_pointer(B, Point::new(300.0, 10.0));
        drag.update(A, Point::new(40.0, 10.0), 30);
        assert_eq!(drag.drag_distance(), 60.0);

        assert!(drag.remove_pointer(A));
        assert_eq!(drag.active_pointer(), B);
        assert_eq!(drag.last(), Point::new(300.0, 10.0));
        // The net drag survives the hand-over.
        assert_eq!(drag.drag_distance(), 60.0);

        drag.update(B, Point::new(280.0, 10.0), 40);
        assert_eq!(drag.drag_distance(), 80.0);
    }

    #[test]
    fn losing_other_pointer_keeps_anchor() {
        let mut drag = session();
        drag.add_pointer(B, Point::new(300.0, 10.0));
        assert!(drag.remove_pointer(B));
        assert_eq!(drag.active_pointer(), A);
        assert!(!drag.remove_pointer(A));
        assert_eq!(drag.pointer_count(), 0);
    }
}
