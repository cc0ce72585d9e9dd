// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// Identifier of one pointer (finger, pen, or mouse) for the length of a
/// gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// What happened to a pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// The pointer went down.
    Down,
    /// The pointer moved while down.
    Move,
    /// The pointer went up.
    Up,
    /// The whole gesture was taken away, for example by an ancestor.
    Cancel,
}

/// A pointer event in the container's local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Event kind.
    pub kind: PointerEventKind,
    /// Pointer the event belongs to.
    pub pointer: PointerId,
    /// Position in local coordinates.
    pub position: Point,
    /// Timestamp in milliseconds.
    pub time_ms: u64,
    /// `true` for a down that started on the edge of the screen.
    ///
    /// Edge touches may belong to a descendant and are not handled.
    pub edge: bool,
}

impl PointerEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(kind: PointerEventKind, pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self {
            kind,
            pointer,
            position,
            time_ms,
            edge: false,
        }
    }

    /// Creates a [`PointerEventKind::Down`] event.
    #[must_use]
    pub fn down(pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(PointerEventKind::Down, pointer, position, time_ms)
    }

    /// Creates a [`PointerEventKind::Move`] event.
    #[must_use]
    pub fn moved(pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(PointerEventKind::Move, pointer, position, time_ms)
    }

    /// Creates a [`PointerEventKind::Up`] event.
    #[must_use]
    pub fn up(pointer: PointerId, position: Point, time_ms: u64) -> Self {
        Self::new(PointerEventKind::Up, pointer, position, time_ms)
    }

    /// Creates a [`PointerEventKind::Cancel`] event.
    #[must_use]
    pub fn cancel(pointer: PointerId, time_ms: u64) -> Self {
        Self::new(PointerEventKind::Cancel, pointer, Point::ZERO, time_ms)
    }

    /// Marks the event as an edge touch.
    #[must_use]
    pub fn with_edge(mut self) -> Self {
        self.edge = true;
        self
    }
}
