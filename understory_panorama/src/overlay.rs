// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;

use kurbo::{Point, Rect};
use peniko::Color;

use crate::config::PanoramaFlags;
use crate::host::Canvas;
use crate::view::PanoramaView;

const EDGE_COLOR: Color = Color::from_rgba8(255, 64, 64, 255);
const SEAM_COLOR: Color = Color::from_rgba8(64, 160, 255, 255);
const TEXT_COLOR: Color = Color::from_rgba8(255, 255, 0, 255);
const TOUCH_COLOR: Color = Color::from_rgba8(255, 255, 255, 96);

/// Radius of the demo touch indicator.
pub(crate) const TOUCH_RADIUS: f64 = 24.0;

const LINE_HEIGHT: f64 = 16.0;

pub(crate) fn draw<E, S, C: Canvas<E, S>>(view: &PanoramaView<E, S>, canvas: &mut C) {
    let flags = view.config().flags;
    if flags.contains(PanoramaFlags::DEBUG_OVERLAY) {
        draw_debug(view, canvas);
    }
    if flags.contains(PanoramaFlags::TOUCH_INDICATOR) {
        for &(_, position) in view.touches() {
            canvas.draw_touch(position, TOUCH_RADIUS, TOUCH_COLOR);
        }
    }
}

fn draw_debug<E, S, C: Canvas<E, S>>(view: &PanoramaView<E, S>, canvas: &mut C) {
    let x = view.scroll_offset();
    let height = view.size().height;
    let top = view.header().size().height;

    for placement in &view.layout().sections {
        let rect = Rect::new(placement.left - x, top, placement.right - x, height);
        let color = if placement.wrapped { SEAM_COLOR } else { EDGE_COLOR };
        canvas.draw_debug_rect(rect, color);
    }
    // Content origin, which moves with the strip.
    canvas.draw_debug_line(Point::new(-x, 0.0), Point::new(-x, height), SEAM_COLOR);

    let gestures = view.gestures();
    let mut origin = Point::new(8.0, LINE_HEIGHT);
    let mut line = |text: &str| {
        canvas.draw_debug_text(text, origin, TEXT_COLOR);
        origin.y += LINE_HEIGHT;
    };
    line(&format!("offset {x:.1}"));
    line(&format!("state {}", gestures.state().name()));
    if let Some(progress) = gestures.viewport().debug_info().wrap_progress {
        line(&format!("wrap {:.0}%", progress * 100.0));
    }
    if let Some(id) = view.committed_section() {
        line(&format!("section {}", id.index()));
    }
}
