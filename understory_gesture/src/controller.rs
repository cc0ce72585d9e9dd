// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_scroll::{PhysicsConfig, ScrollPhysics, Viewport, WrapDirection};
use understory_sections::{Section, SectionId, SectionIndex};

use crate::drag::DragSession;
use crate::pointer::{PointerEvent, PointerEventKind};

/// Where the controller is in a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GestureState {
    /// At rest.
    #[default]
    Idle,
    /// A pointer is down and drives the offset.
    Dragging,
    /// Settling after a fast release.
    Flinging,
    /// Settling after a slow release.
    SnappingBack,
    /// Animating past the last section towards the first.
    WrappingToHead,
    /// Animating before the first section towards the last.
    WrappingToTail,
}

impl GestureState {
    /// A short human-readable name, for overlays and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Flinging => "flinging",
            Self::SnappingBack => "snapping back",
            Self::WrappingToHead => "wrapping to head",
            Self::WrappingToTail => "wrapping to tail",
        }
    }

    /// Returns `true` while an animation owns the offset.
    #[must_use]
    pub const fn is_animating(self) -> bool {
        matches!(
            self,
            Self::Flinging | Self::SnappingBack | Self::WrappingToHead | Self::WrappingToTail
        )
    }
}

/// Tuning for [`GestureController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Distance a pointer must travel before a drag moves content.
    pub touch_slop: f64,
    /// Release speed, in pixels per second, above which a release is a fling.
    pub fling_threshold: f64,
    /// Cap on measured release speed.
    pub max_velocity: f64,
    /// Net drag distance that commits a slow release to the next or previous
    /// section.
    pub scroll_trigger: f64,
    /// Distance from a wide section's edge within which a slow release snaps
    /// to that edge.
    pub trapping_radius: f64,
    /// Width of the next section kept peeking in at the end of a wide section.
    pub peeking_width: f64,
    /// Duration of snap animations.
    pub snap_duration_ms: u64,
    /// Duration of wrap animations.
    pub wrap_duration_ms: u64,
    /// Physics for flings and snaps.
    pub physics: PhysicsConfig,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            fling_threshold: 600.0,
            max_velocity: 8000.0,
            scroll_trigger: 200.0,
            trapping_radius: 128.0,
            peeking_width: 48.0,
            snap_duration_ms: 300,
            wrap_duration_ms: 400,
            physics: PhysicsConfig::default(),
        }
    }
}

/// Turns pointer events into scroll offsets for a section strip.
///
/// The controller owns the [`Viewport`] and the [`ScrollPhysics`] driving it.
/// Hosts feed it pointer events with [`GestureController::handle`] and call
/// [`GestureController::advance`] once per frame. Whenever the offset changes
/// the controller raises a layout flag, read with
/// [`GestureController::take_needs_layout`].
#[derive(Clone, Debug)]
pub struct GestureController {
    config: GestureConfig,
    state: GestureState,
    viewport: Viewport,
    viewport_width: f64,
    physics: ScrollPhysics,
    drag: Option<DragSession>,
    committed: Option<SectionId>,
    needs_layout: bool,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureController {
    /// Creates an idle controller at offset zero.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: GestureState::Idle,
            viewport: Viewport::new(),
            viewport_width: 0.0,
            physics: ScrollPhysics::new(config.physics),
            drag: None,
            committed: None,
            needs_layout: false,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Returns the scroll state.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Returns the drag in progress, if any.
    #[must_use]
    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Section the offset last settled on.
    #[must_use]
    pub fn committed_section(&self) -> Option<SectionId> {
        self.committed
    }

    /// Width of the visible window onto the strip.
    #[must_use]
    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Sets the width of the visible window onto the strip.
    pub fn set_viewport_width(&mut self, width: f64) {
        if width.is_finite() && width != self.viewport_width {
            self.viewport_width = width.max(0.0);
            self.needs_layout = true;
        }
    }

    /// Returns `true` while the current gesture is moving content, meaning
    /// children should stop receiving it.
    #[must_use]
    pub fn intercepts(&self) -> bool {
        self.drag.as_ref().is_some_and(DragSession::is_moving)
    }

    /// Returns and clears the layout flag.
    pub fn take_needs_layout(&mut self) -> bool {
        core::mem::take(&mut self.needs_layout)
    }

    /// Feeds one pointer event. Returns `true` if the controller consumed it.
    pub fn handle<H>(&mut self, event: &PointerEvent, sections: &SectionIndex<H>) -> bool {
        match event.kind {
            PointerEventKind::Down => self.pointer_down(event, sections),
            PointerEventKind::Move => self.pointer_move(event),
            PointerEventKind::Up => self.pointer_up(event, sections),
            PointerEventKind::Cancel => self.cancel(event.time_ms, sections),
        }
    }

    /// Steps any animation to `now_ms`. Returns `true` if the offset changed.
    pub fn advance<H>(&mut self, now_ms: u64, sections: &SectionIndex<H>) -> bool {
        if !self.state.is_animating() {
            return false;
        }
        let next = self.physics.advance(now_ms);
        let changed = self.set_offset(next);
        if self.physics.is_finished() {
            self.complete(sections);
        }
        changed
    }

    /// Moves to `offset`, cancelling any animation and wrap.
    ///
    /// With `animate`, the move runs as a snap starting at `now_ms`.
    pub fn scroll_to<H>(
        &mut self,
        offset: f64,
        animate: bool,
        now_ms: u64,
        sections: &SectionIndex<H>,
    ) {
        if !offset.is_finite() {
            return;
        }
        self.drag = None;
        self.end_wrap();
        if animate {
            self.settle(offset, GestureState::SnappingBack, now_ms, sections);
        } else {
            self.physics.jump_to(offset);
            self.set_offset(offset);
            self.finish(sections);
        }
    }

    /// Brings `id` to the left edge of the viewport.
    ///
    /// Returns `false` if `id` is unknown or not visible.
    pub fn scroll_to_section<H>(
        &mut self,
        id: SectionId,
        animate: bool,
        now_ms: u64,
        sections: &SectionIndex<H>,
    ) -> bool {
        match sections.get(id) {
            Some(section) if section.visibility().is_visible() => {
                self.scroll_to(section.left(), animate, now_ms, sections);
                true
            }
            _ => false,
        }
    }

    fn pointer_down<H>(&mut self, event: &PointerEvent, sections: &SectionIndex<H>) -> bool {
        if event.edge {
            log::trace!("ignoring edge touch from {:?}", event.pointer);
            return false;
        }
        if let Some(drag) = &mut self.drag {
            drag.add_pointer(event.pointer, event.position);
            return true;
        }
        if !sections.is_scrollable(self.viewport_width) {
            return false;
        }

        let interrupted = self.state.is_animating();
        if interrupted {
            let offset = self.physics.abort();
            self.end_wrap();
            self.set_offset(offset);
            log::debug!("drag interrupted {} at {offset}", self.state.name());
        }

        let original = sections
            .section_under_offset(self.viewport.offset())
            .or(self.committed);
        let mut drag = DragSession::new(
            event.pointer,
            event.position,
            event.time_ms,
            original,
            self.config.max_velocity,
        );
        if interrupted {
            drag.start_moving();
        }
        self.drag = Some(drag);
        self.state = GestureState::Dragging;
        true
    }

    fn pointer_move(&mut self, event: &PointerEvent) -> bool {
        let slop = self.config.touch_slop;
        let Some(drag) = &mut self.drag else {
            return false;
        };
        let Some(delta) = drag.update(event.pointer, event.position, event.time_ms) else {
            return true;
        };
        if drag.is_moving() {
            self.scroll_by(-delta.x);
        } else if (event.position.x - drag.first().x).abs() > slop {
            drag.start_moving();
        }
        true
    }

    fn pointer_up<H>(&mut self, event: &PointerEvent, sections: &SectionIndex<H>) -> bool {
        if self.drag.is_none() {
            return false;
        }
        self.pointer_move(event);
        let Some(drag) = &mut self.drag else {
            return false;
        };
        if drag.remove_pointer(event.pointer) {
            return true;
        }
        let Some(drag) = self.drag.take() else {
            return false;
        };
        let moved = drag.is_moving();
        if moved {
            self.release(&drag, event.time_ms, sections);
        } else {
            self.finish(sections);
        }
        moved
    }

    fn cancel<H>(&mut self, now_ms: u64, sections: &SectionIndex<H>) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        let x = self.viewport.offset();
        log::debug!("drag cancelled at {x}");
        // An overscroll has no section to rest on; return to where the drag began.
        let stranded = x < 0.0 || sections.section_under_offset(x).is_none();
        let home = drag
            .original_section()
            .or(self.committed)
            .and_then(|id| sections.get(id));
        match home {
            Some(section) if stranded => {
                self.settle(section.left(), GestureState::SnappingBack, now_ms, sections);
            }
            _ => self.state = GestureState::Idle,
        }
        true
    }

    fn release<H>(&mut self, drag: &DragSession, now_ms: u64, sections: &SectionIndex<H>) {
        let x = self.viewport.offset();
        let velocity = drag.scroll_velocity();
        let Some(current) = sections
            .section_under_offset(x)
            .or(drag.original_section())
            .or(self.committed)
            .or_else(|| sections.first_visible())
        else {
            self.settle(0.0, GestureState::SnappingBack, now_ms, sections);
            return;
        };
        log::debug!(
            "release at {x} v={velocity} d={} over {current:?}",
            drag.drag_distance()
        );
        if velocity.abs() > self.config.fling_threshold {
            self.release_fast(current, x, velocity, now_ms, sections);
        } else {
            let original = drag.original_section().unwrap_or(current);
            self.release_slow(original, x, drag.drag_distance(), now_ms, sections);
        }
    }

    fn release_fast<H>(
        &mut self,
        current: SectionId,
        x: f64,
        velocity: f64,
        now_ms: u64,
        sections: &SectionIndex<H>,
    ) {
        let can_wrap = sections.visible_count() > 1;
        let last_width = edge_section(sections, WrapDirection::ToTail).map_or(0.0, Section::width);
        if velocity > 0.0 && can_wrap && x > sections.content_width() - last_width {
            self.wrap(WrapDirection::ToHead, now_ms, sections);
            return;
        }
        if velocity < 0.0 && can_wrap && x < 0.0 {
            self.wrap(WrapDirection::ToTail, now_ms, sections);
            return;
        }
        let Some(section) = sections.get(current) else {
            return;
        };

        if section.is_wide(self.viewport_width) {
            let min = section.left();
            let max = self.wide_end(section);
            let decel = self.config.physics.deceleration.max(f64::MIN_POSITIVE);
            let natural = x + velocity * velocity.abs() / (2.0 * decel);
            if velocity > 0.0 && natural > max && x >= max - self.config.trapping_radius {
                self.go_forward(current, now_ms, sections);
            } else {
                self.physics.fling(x, velocity, min, max, now_ms);
                self.state = GestureState::Flinging;
            }
        } else if velocity > 0.0 {
            self.go_forward(current, now_ms, sections);
        } else if x <= section.left() {
            self.go_backward(current, now_ms, sections);
        } else {
            self.settle(section.left(), GestureState::Flinging, now_ms, sections);
        }
    }

    /// Slow releases are judged against the section the drag started on, even
    /// when the offset has crossed into a neighbour.
    fn release_slow<H>(
        &mut self,
        original: SectionId,
        x: f64,
        distance: f64,
        now_ms: u64,
        sections: &SectionIndex<H>,
    ) {
        let trigger = self.config.scroll_trigger;
        let radius = self.config.trapping_radius;
        let Some(section) = sections.get(original) else {
            return;
        };

        if !section.is_wide(self.viewport_width) {
            if distance > trigger {
                self.go_forward(original, now_ms, sections);
            } else if distance < -trigger {
                self.go_backward(original, now_ms, sections);
            } else {
                self.settle(section.left(), GestureState::SnappingBack, now_ms, sections);
            }
            return;
        }

        let left = section.left();
        let end = self.wide_end(section);
        if x < left {
            if distance < -trigger {
                self.go_backward(original, now_ms, sections);
            } else {
                self.settle(left, GestureState::SnappingBack, now_ms, sections);
            }
        } else if x - left < radius {
            self.settle(left, GestureState::SnappingBack, now_ms, sections);
        } else if x > end {
            if distance > trigger {
                self.go_forward(original, now_ms, sections);
            } else {
                self.settle(end, GestureState::SnappingBack, now_ms, sections);
            }
        } else if end - x < radius {
            self.settle(end, GestureState::SnappingBack, now_ms, sections);
        } else {
            // Free scrolling inside a wide section.
            self.finish(sections);
        }
    }

    fn go_forward<H>(&mut self, from: SectionId, now_ms: u64, sections: &SectionIndex<H>) {
        if let Some(next) = sections.next_visible(from).and_then(|id| sections.get(id)) {
            self.settle(next.left(), GestureState::SnappingBack, now_ms, sections);
        } else if sections.visible_count() > 1 {
            self.wrap(WrapDirection::ToHead, now_ms, sections);
        } else if let Some(section) = sections.get(from) {
            self.settle(section.left(), GestureState::SnappingBack, now_ms, sections);
        }
    }

    fn go_backward<H>(&mut self, from: SectionId, now_ms: u64, sections: &SectionIndex<H>) {
        if let Some(prev) = sections.previous_visible(from).and_then(|id| sections.get(id)) {
            // Entering a wide section from the right shows its end.
            let target = if prev.is_wide(self.viewport_width) {
                self.wide_end(prev)
            } else {
                prev.left()
            };
            self.settle(target, GestureState::SnappingBack, now_ms, sections);
        } else if sections.visible_count() > 1 {
            self.wrap(WrapDirection::ToTail, now_ms, sections);
        } else if let Some(section) = sections.get(from) {
            self.settle(section.left(), GestureState::SnappingBack, now_ms, sections);
        }
    }

    /// Resting offset that shows the end of a wide section with the next
    /// section peeking in.
    fn wide_end<H>(&self, section: &Section<H>) -> f64 {
        (section.right() + self.config.peeking_width - self.viewport_width).max(section.left())
    }

    fn wrap<H>(&mut self, direction: WrapDirection, now_ms: u64, sections: &SectionIndex<H>) {
        let destination = match direction {
            WrapDirection::ToHead => sections.content_width(),
            WrapDirection::ToTail => {
                let width = edge_section(sections, direction).map_or(0.0, Section::width);
                -(width + sections.margin())
            }
        };
        let x = self.viewport.offset();
        self.viewport.begin_wrap(direction, destination);
        self.physics
            .animate_to(x, destination, self.config.wrap_duration_ms, now_ms);
        self.state = match direction {
            WrapDirection::ToHead => GestureState::WrappingToHead,
            WrapDirection::ToTail => GestureState::WrappingToTail,
        };
        self.needs_layout = true;
        if self.physics.is_finished() {
            self.complete(sections);
        }
    }

    fn settle<H>(
        &mut self,
        target: f64,
        state: GestureState,
        now_ms: u64,
        sections: &SectionIndex<H>,
    ) {
        let x = self.viewport.offset();
        self.physics
            .animate_to(x, target, self.config.snap_duration_ms, now_ms);
        self.state = state;
        if self.physics.is_finished() {
            let offset = self.physics.current_offset();
            self.set_offset(offset);
            self.finish(sections);
        }
    }

    /// Ends an animation, applying the corrective jump after a wrap.
    fn complete<H>(&mut self, sections: &SectionIndex<H>) {
        let corrected = match self.state {
            GestureState::WrappingToHead => Some(0.0),
            GestureState::WrappingToTail => {
                Some(edge_section(sections, WrapDirection::ToTail).map_or(0.0, Section::left))
            }
            _ => None,
        };
        if let Some(offset) = corrected {
            self.end_wrap();
            self.physics.jump_to(offset);
            self.set_offset(offset);
        }
        self.finish(sections);
    }

    fn finish<H>(&mut self, sections: &SectionIndex<H>) {
        self.state = GestureState::Idle;
        if let Some(id) = sections.section_under_offset(self.viewport.offset()) {
            self.committed = Some(id);
        }
    }

    fn end_wrap(&mut self) {
        if self.viewport.end_wrap().is_some() {
            self.needs_layout = true;
        }
    }

    fn scroll_by(&mut self, delta: f64) -> bool {
        self.set_offset(self.viewport.offset() + delta)
    }

    fn set_offset(&mut self, offset: f64) -> bool {
        let changed = self.viewport.set_offset(offset);
        self.needs_layout |= changed;
        changed
    }
}

/// The section placed at the head or tail of the strip.
fn edge_section<H>(sections: &SectionIndex<H>, direction: WrapDirection) -> Option<&Section<H>> {
    let id = match direction {
        WrapDirection::ToHead => sections.first_placed(),
        WrapDirection::ToTail => sections.last_placed(),
    }?;
    sections.get(id)
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};
    use understory_sections::{SectionId, SectionIndex};

    use super::{GestureController, GestureState};
    use crate::{PointerEvent, PointerId};

    const P: PointerId = PointerId(7);

    fn strip(widths: &[f64]) -> (SectionIndex<()>, alloc::vec::Vec<SectionId>) {
        let mut index = SectionIndex::new(12.0);
        let ids = widths
            .iter()
            .map(|w| {
                let id = index.push(());
                index.set_measured_size(id, Size::new(*w, 400.0));
                id
            })
            .collect();
        (index, ids)
    }

    fn controller() -> GestureController {
        let mut c = GestureController::default();
        c.set_viewport_width(320.0);
        c
    }

    fn at(x: f64) -> Point {
        Point::new(x, 100.0)
    }

    /// Drags from screen x 400 by `-distance` in 5px steps every 20ms, then
    /// releases. Returns the release time.
    fn slow_drag(c: &mut GestureController, sections: &SectionIndex<()>, distance: f64) -> u64 {
        assert!(c.handle(&PointerEvent::down(P, at(400.0), 0), sections));
        let step = if distance >= 0.0 { -5.0 } else { 5.0 };
        let mut x = 400.0;
        let mut t = 0;
        while (400.0 - x - distance).abs() > 1e-9 {
            x += step;
            t += 20;
            c.handle(&PointerEvent::moved(P, at(x), t), sections);
        }
        c.handle(&PointerEvent::up(P, at(x), t), sections);
        t
    }

    /// Drags by `-distance` in 25px steps every 10ms, then releases.
    fn fast_drag(c: &mut GestureController, sections: &SectionIndex<()>, distance: f64) -> u64 {
        c.handle(&PointerEvent::down(P, at(400.0), 0), sections);
        let step = if distance >= 0.0 { -25.0 } else { 25.0 };
        let mut x = 400.0;
        let mut t = 0;
        while (400.0 - x - distance).abs() > 1e-9 {
            x += step;
            t += 10;
            c.handle(&PointerEvent::moved(P, at(x), t), sections);
        }
        c.handle(&PointerEvent::up(P, at(x), t), sections);
        t
    }

    fn run(c: &mut GestureController, sections: &SectionIndex<()>, from: u64) {
        for now in (from..from + 1000).step_by(16) {
            c.advance(now, sections);
        }
        c.advance(from + 1000, sections);
    }

    #[test]
    fn slow_drag_past_trigger_goes_to_next_section() {
        let (sections, ids) = strip(&[300.0, 300.0, 300.0]);
        let mut c = controller();
        let t = slow_drag(&mut c, &sections, 250.0);
        assert_eq!(c.state(), GestureState::SnappingBack);
        run(&mut c, &sections, t);
        assert_eq!(c.state(), GestureState::Idle);
        assert_eq!(c.viewport().offset(), 312.0);
        assert_eq!(c.committed_section(), Some(ids[1]));
    }

    #[test]
    fn slow_drag_back_past_trigger_goes_to_previous_section() {
        let (sections, ids) = strip(&[300.0, 300.0, 300.0]);
        let mut c = controller();
        assert!(c.scroll_to_section(ids[1], false, 0, &sections));
        let t = slow_drag(&mut c, &sections, -250.0);
        run(&mut c, &sections, t);
        assert_eq!(c.viewport().offset(), 0.0);
        assert_eq!(c.committed_section(), Some(ids[0]));
    }

    #[test]
    fn short_slow_drag_snaps_back() {
        let (sections, ids) = strip(&[300.0, 300.0, 300.0]);
        let mut c = controller();
        c.scroll_to_section(ids[1], false, 0, &sections);
        let t = slow_drag(&mut c, &sections, 50.0);
        assert!(c.viewport().offset() > 312.0);
        run(&mut c, &sections, t);
        assert_eq!(c.viewport().offset(), 312.0);
        assert_eq!(c.committed_section(), Some(ids[1]));
    }

    #[test]
    fn touch_slop_swallows_first_pixels() {
        let (sections, _) = strip(&[300.0, 300.0, 300.0]);
        let mut c = controller();
        c.handle(&PointerEvent::down(P, at(400.0), 0), &sections);
        c.handle(&PointerEvent::moved(P, at(395.0), 10), &sections);
        assert!(!c.intercepts());
        assert_eq!(c.viewport().offset(), 0.0);
        c.handle(&PointerEvent::moved(P, at(390.0), 20), &sections);
        assert!(c.intercepts());
        assert_eq!(c.viewport().offset(), 0.0);
        c.handle(&PointerEvent::moved(P, at(380.0), 30), &sections);
        assert_eq!(c.viewport().offset(), 10.0);
        assert!(c.take_needs_layout());
        assert!(!c.take_needs_layout());
    }

    #[test]
    fn overscroll_is_not_clamped_while_dragging() {
        let (sections, _) = strip(&[300.0, 300.0, 300.0]);
        let mut c = controller();
        c.handle(&PointerEvent::down(P, at(100.0), 0), &sections);
        c.handle(&PointerEvent::moved(P, at(120.0), 100), &sections);
        c.handle(&PointerEvent::moved(P, at(180.0), 200), &sections);
        assert_eq!(c.viewport().offset(), -60.0);
    }

    #[test]
    fn fast_forward_fling_goes_to_next_section() {
        let (sections, ids) = strip(&[300.0, 300.0, 300.0]);
        let mut c = controller();
        let t = fast_drag(&mut c, &sections, 100.0);
        assert_eq!(c.state(), GestureState::SnappingBack);
        run(&mut c, &sections, t);
        assert_eq!(c.viewport().offset(), 312.0);
        assert_eq!(c.committed_section(), Some(ids[1]));
    }

    #[test]
    fn fast_fling_past_the_end_wraps_to_head() {
        let (sections, ids) = strip(&[300.0, 300.0, 300.0]);
        let mut c = controller();
        c.scroll_to(700.0, false, 0, &sections);
        let t = fast_drag(&mut c, &sections, 100.0);
        assert_eq!(c.state(), GestureState::WrappingToHead);
        let wrap = c.viewport().wrap().copied().unwrap();
        assert_eq!(wrap.destination_offset, 936.0);

        c.advance(t + 200, &sections);
        assert!(c.viewport().offset() > 790.0);
        assert!(c.viewport().is_wrapping());

        c.advance(t + 400, &sections);
        assert_eq!(c.state(), GestureState::Idle);
        assert_eq!(c.viewport().offset(), 0.0);
        assert!(!c.viewport().is_wrapping());
        assert_eq!(c.committed_section(), Some(ids[0]));
    }

    #[test]
    fn fast_fling_before_the_start_wraps_to_tail() {
        let (sections, ids) = strip(&[300.0, 300.0, 300.0]);
        let mut c = controller();
        let t = fast_drag(&mut c, &sections, -100.0);
        assert!(c.viewport().offset() < 0.0);
        assert_eq!(c.state(), GestureState::WrappingToTail);
        assert_eq!(
            c.viewport().wrap().map(|w| w.destination_offset),
            Some(-312.0)
        );
        run(&mut c, &sections, t);
        assert_eq!(c.viewport().offset(), 624.0);
        assert_eq!(c.committed_section(), Some(ids[2]));
    }

    #[test]
    fn single_section_never_wraps() {
        let (sections, _) = strip(&[600.0]);
        let mut c = controller();
        let t = fast_drag(&mut c, &sections, -100.0);
        assert_eq!(c.state(), GestureState::Flinging);
        run(&mut c, &sections, t);
        assert_eq!(c.viewport().offset(), 0.0);
    }

    #[test]
    fn wide_section_settles_freely_in_the_middle() {
        let (sections, _) = strip(&[1200.0, 300.0]);
        let mut c = controller();
        c.scroll_to(300.0, false, 0, &sections);
        slow_drag(&mut c, &sections, 100.0);
        assert_eq!(c.state(), GestureState::Idle);
        assert_eq!(c.viewport().offset(), 390.0);
    }

    #[test]
    fn wide_section_traps_near_left_edge() {
        let (sections, _) = strip(&[1200.0, 300.0]);
        let mut c = controller();
        let t = slow_drag(&mut c, &sections, 100.0);
        assert_eq!(c.state(), GestureState::SnappingBack);
        run(&mut c, &sections, t);
        assert_eq!(c.viewport().offset(), 0.0);
    }

    #[test]
    fn wide_section_traps_near_right_edge() {
        let (sections, _) = strip(&[1200.0, 300.0]);
        let mut c = controller();
        // Resting end: 1200 + 48 - 320.
        c.scroll_to(800.0, false, 0, &sections);
        let t = slow_drag(&mut c, &sections, 60.0);
        run(&mut c, &sections, t);
        assert_eq!(c.viewport().offset(), 928.0);
    }

    #[test]
    fn new_drag_aborts_animation_and_keeps_offset() {
        let (sections, _) = strip(&[300.0, 300.0, 300.0]);
        let mut c = controller();
        c.scroll_to(312.0, true, 0, &sections);
        assert_eq!(c.state(), GestureState::SnappingBack);
        c.advance(100, &sections);
        let mid = c.viewport().offset();
        assert!(mid > 0.0 && mid < 312.0);

        assert!(c.handle(&PointerEvent::down(P, at(200.0), 110), &sections));
        assert_eq!(c.state(), GestureState::Dragging);
        assert_eq!(c.viewport().offset(), mid);
        // The interrupted animation already moved content; no slop applies.
        assert!(c.intercepts());
        assert!(!c.advance(500, &sections));
        assert_eq!(c.viewport().offset(), mid);
    }

    #[test]
    fn new_drag_aborts_wrap() {
        let (sections, _) = strip(&[300.0, 300.0, 300.0]);
        let mut c = controller();
        c.scroll_to(700.0, false, 0, &sections);
        let t = fast_drag(&mut c, &sections, 100.0);
        c.advance(t + 100, &sections);
        assert!(c.viewport().is_wrapping());
        c.handle(&PointerEvent::down(P, at(200.0), t + 110), &sections);
        assert!(!c.viewport().is_wrapping());
        assert_eq!(c.state(), GestureState::Dragging);
    }

    #[test]
    fn multi_touch_reanchors_without_resetting() {
        let (sections, _) = strip(&[300.0, 300.0, 300.0]);
        let mut c = controller();
        let q = PointerId(8);
        c.handle(&PointerEvent::down(P, at(400.0), 0), &sections);
        c.handle(&PointerEvent::down(q, at(200.0), 5), &sections);
        c.handle(&PointerEvent::moved(P, at(390.0), 10), &sections);
        c.handle(&PointerEvent::moved(P, at(350.0), 20), &sections);
        assert_eq!(c.viewport().offset(), 40.0);

        assert!(c.handle(&PointerEvent::up(P, at(350.0), 30), &sections));
        assert_eq!(c.state(), GestureState::Dragging);
        c.handle(&PointerEvent::moved(q, at(180.0), 40), &sections);
        assert_eq!(c.viewport().offset(), 60.0);
        assert_eq!(c.drag().map(|d| d.drag_distance()), Some(70.0));
    }

    #[test]
    fn cancel_returns_to_idle_in_place() {
        let (sections, _) = strip(&[300.0, 300.0, 300.0]);
        let mut c = controller();
        c.handle(&PointerEvent::down(P, at(400.0), 0), &sections);
        c.handle(&PointerEvent::moved(P, at(380.0), 10), &sections);
        c.handle(&PointerEvent::moved(P, at(300.0), 20), &sections);
        assert!(c.handle(&PointerEvent::cancel(P, 30), &sections));
        assert_eq!(c.state(), GestureState::Idle);
        assert!(c.drag().is_none());
        assert_eq!(c.viewport().offset(), 80.0);
    }

    #[test]
    fn edge_touches_and_unscrollable_strips_are_ignored() {
        let (sections, _) = strip(&[300.0, 300.0]);
        let mut c = controller();
        assert!(!c.handle(&PointerEvent::down(P, at(0.0), 0).with_edge(), &sections));
        assert_eq!(c.state(), GestureState::Idle);

        let (small, _) = strip(&[200.0]);
        assert!(!c.handle(&PointerEvent::down(P, at(50.0), 0), &small));
        assert_eq!(c.state(), GestureState::Idle);
    }

    /// Starts at `start`, slow-drags by `distance`, and returns where the
    /// strip settles.
    fn settle_after_slow_drag(widths: &[f64], start: f64, distance: f64) -> f64 {
        let (sections, _) = strip(widths);
        let mut c = controller();
        c.scroll_to(start, false, 0, &sections);
        let t = slow_drag(&mut c, &sections, distance);
        run(&mut c, &sections, t);
        assert_eq!(c.state(), GestureState::Idle);
        c.viewport().offset()
    }

    #[test]
    fn short_backward_drag_after_wide_section_snaps_back() {
        let (sections, ids) = strip(&[1200.0, 300.0]);
        let mut c = controller();
        c.scroll_to_section(ids[1], false, 0, &sections);
        let t = slow_drag(&mut c, &sections, -40.0);
        // The offset now sits inside the wide section's range.
        assert_eq!(sections.section_under_offset(c.viewport().offset()), Some(ids[0]));
        run(&mut c, &sections, t);
        assert_eq!(c.viewport().offset(), 1212.0);
        assert_eq!(c.committed_section(), Some(ids[1]));
    }

    #[test]
    fn long_backward_drag_enters_wide_section_at_its_end() {
        let (sections, ids) = strip(&[1200.0, 300.0]);
        let mut c = controller();
        c.scroll_to_section(ids[1], false, 0, &sections);
        let t = slow_drag(&mut c, &sections, -250.0);
        run(&mut c, &sections, t);
        assert_eq!(c.viewport().offset(), 928.0);
        assert_eq!(c.committed_section(), Some(ids[0]));
    }

    #[test]
    fn slow_drags_around_a_wide_section_in_the_middle() {
        let widths = [300.0, 1200.0, 300.0];
        // Lefts are 0, 312 and 1524; the wide section rests at 1240 to show
        // its end.
        let cases = [
            (0.0, 100.0, 0.0),
            (0.0, 250.0, 312.0),
            (312.0, 100.0, 312.0),
            (312.0, -100.0, 312.0),
            (312.0, -250.0, 0.0),
            (1240.0, 100.0, 1240.0),
            (1240.0, 250.0, 1524.0),
            (1524.0, -100.0, 1524.0),
            (1524.0, -250.0, 1240.0),
        ];
        for (start, distance, expected) in cases {
            assert_eq!(
                settle_after_slow_drag(&widths, start, distance),
                expected,
                "start {start} drag {distance}"
            );
        }
    }

    #[test]
    fn section_as_wide_as_the_viewport_is_standard() {
        // Standard rules snap back to the left edge.
        assert_eq!(settle_after_slow_drag(&[320.0, 300.0], 0.0, 150.0), 0.0);
        // Wide rules snap to the end, 321 + 48 - 320.
        assert_eq!(settle_after_slow_drag(&[321.0, 300.0], 0.0, 150.0), 49.0);
    }

    #[test]
    fn fast_forward_fling_from_standard_into_wide_section() {
        let (sections, ids) = strip(&[300.0, 1200.0, 300.0]);
        let mut c = controller();
        let t = fast_drag(&mut c, &sections, 100.0);
        run(&mut c, &sections, t);
        assert_eq!(c.viewport().offset(), 312.0);
        assert_eq!(c.committed_section(), Some(ids[1]));
    }

    #[test]
    fn cancel_during_overscroll_snaps_back() {
        let (sections, ids) = strip(&[300.0, 300.0, 300.0]);
        let mut c = controller();
        c.handle(&PointerEvent::down(P, at(100.0), 0), &sections);
        c.handle(&PointerEvent::moved(P, at(120.0), 100), &sections);
        c.handle(&PointerEvent::moved(P, at(180.0), 200), &sections);
        assert_eq!(c.viewport().offset(), -60.0);

        assert!(c.handle(&PointerEvent::cancel(P, 300), &sections));
        assert!(c.drag().is_none());
        assert_eq!(c.state(), GestureState::SnappingBack);
        run(&mut c, &sections, 300);
        assert_eq!(c.state(), GestureState::Idle);
        assert_eq!(c.viewport().offset(), 0.0);
        assert_eq!(c.committed_section(), Some(ids[0]));
    }

    #[test]
    fn tap_does_not_consume_up() {
        let (sections, _) = strip(&[300.0, 300.0]);
        let mut c = controller();
        c.handle(&PointerEvent::down(P, at(50.0), 0), &sections);
        assert!(!c.handle(&PointerEvent::up(P, at(52.0), 50), &sections));
        assert_eq!(c.state(), GestureState::Idle);
    }
}
