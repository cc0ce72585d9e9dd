// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits the container drives: element measurement and capture,
//! and a drawing surface.

use kurbo::{Point, Rect, Size};
use peniko::Color;

use crate::style::{GeneratedHeader, StyleContext};

/// Constraint on one axis of a measurement.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Constraint {
    /// Any size the element wants.
    #[default]
    Unbounded,
    /// No larger than the given extent.
    AtMost(f64),
    /// Exactly the given extent.
    Exactly(f64),
}

impl Constraint {
    /// Clamps a desired extent to this constraint.
    #[must_use]
    pub fn resolve(self, desired: f64) -> f64 {
        match self {
            Self::Unbounded => desired,
            Self::AtMost(max) => desired.min(max),
            Self::Exactly(extent) => extent,
        }
    }
}

/// The view system hosting a panorama.
///
/// Elements are opaque handles the host knows how to measure and capture. The
/// container never looks inside them.
pub trait ViewHost {
    /// Handle to a host element.
    type Element: Clone;
    /// A captured image of an element.
    type Snapshot;
    /// Handle to a loaded typeface.
    type Typeface;

    /// Measures `element` against a constraint per axis and returns its size.
    ///
    /// Implementations should respect the constraints; the container resolves
    /// the returned size against them again.
    fn measure(&mut self, element: &Self::Element, width: Constraint, height: Constraint) -> Size;

    /// Captures the part of `element` inside `clip`, in the element's local
    /// coordinates.
    fn capture(&mut self, element: &Self::Element, clip: Rect) -> Self::Snapshot;

    /// Creates an element for a generated header.
    fn create_header(
        &mut self,
        header: &GeneratedHeader<Self::Element>,
        style: &StyleContext<Self::Typeface>,
    ) -> Self::Element;
}

/// A drawing surface for one frame.
///
/// Coordinates are the container's local coordinates, with the viewport's left
/// edge at `x = 0`.
pub trait Canvas<E, S> {
    /// Draws `element` filling `rect`.
    fn draw_element(&mut self, element: &E, rect: Rect);

    /// Draws `element` mapped onto a projected quad, corners clockwise from the
    /// top left, at opacity `alpha`.
    fn draw_element_quad(&mut self, element: &E, quad: [Point; 4], alpha: f64);

    /// Draws a captured snapshot mapped onto a projected quad at opacity
    /// `alpha`.
    fn draw_snapshot(&mut self, snapshot: &S, quad: [Point; 4], alpha: f64);

    /// Strokes a rectangle outline.
    fn draw_debug_rect(&mut self, rect: Rect, color: Color);

    /// Strokes a line.
    fn draw_debug_line(&mut self, from: Point, to: Point, color: Color);

    /// Draws a line of text with its baseline starting at `origin`.
    fn draw_debug_text(&mut self, text: &str, origin: Point, color: Color);

    /// Fills a circle marking a pointer.
    fn draw_touch(&mut self, center: Point, radius: f64, color: Color);
}
