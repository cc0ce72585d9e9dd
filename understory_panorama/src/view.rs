// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;
use understory_flip::{FlipFrame, Mirage, MirageClip, Stage, TransitionAnimator, TransitionEvent};
use understory_gesture::{
    GestureController, GestureState, PointerEvent, PointerEventKind, PointerId,
};
use understory_parallax::{LayerLayout, LayerMetrics, ParallaxLayoutEngine, SlidingStyle};
use understory_sections::{SectionId, SectionIndex, Visibility};

use crate::config::{HeaderVisibility, PanoramaConfig};
use crate::error::PanoramaError;
use crate::host::{Canvas, Constraint, ViewHost};
use crate::overlay;

/// The container's header element and its measured size.
#[derive(Clone, Debug)]
pub struct HeaderSlot<E> {
    element: E,
    size: Size,
    visibility: HeaderVisibility,
}

impl<E> HeaderSlot<E> {
    pub(crate) fn new(element: E, visibility: HeaderVisibility) -> Self {
        Self {
            element,
            size: Size::ZERO,
            visibility,
        }
    }

    /// The header element.
    #[must_use]
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Measured size; zero while collapsed.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Current visibility.
    #[must_use]
    pub fn visibility(&self) -> HeaderVisibility {
        self.visibility
    }
}

/// Elements of one section and their measured sizes.
#[derive(Clone, Debug)]
pub struct SectionSlot<E> {
    header: E,
    content: Option<E>,
    header_size: Size,
    content_size: Size,
    sliding_style: Option<SlidingStyle>,
}

impl<E> SectionSlot<E> {
    pub(crate) fn new(header: E, content: Option<E>, sliding_style: Option<SlidingStyle>) -> Self {
        Self {
            header,
            content,
            header_size: Size::ZERO,
            content_size: Size::ZERO,
            sliding_style,
        }
    }

    /// The section's header element, custom or generated.
    #[must_use]
    pub fn header(&self) -> &E {
        &self.header
    }

    /// The content element, if the section has one.
    #[must_use]
    pub fn content(&self) -> Option<&E> {
        self.content.as_ref()
    }

    /// Measured header size; its width is the section width.
    #[must_use]
    pub fn header_size(&self) -> Size {
        self.header_size
    }

    /// Measured content size.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Sliding style declared on the section.
    ///
    /// Only the container's style drives layout.
    #[must_use]
    pub fn sliding_style(&self) -> Option<SlidingStyle> {
        self.sliding_style
    }
}

#[derive(Clone, Debug)]
struct BackgroundSlot<E> {
    element: E,
    size: Size,
}

/// What one call to [`PanoramaView::frame`] did.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    /// `true` if an animation moved the scroll offset.
    pub scrolled: bool,
    /// Gesture state after the frame.
    pub state: GestureState,
    /// Transition boundaries crossed during the frame, in order.
    pub transition_events: SmallVec<[TransitionEvent; 4]>,
}

/// A horizontally scrolling panorama.
///
/// The view owns typed slots for its header, background, and sections, and
/// the three collaborators that animate them: a [`GestureController`] for the
/// scroll offset, a [`ParallaxLayoutEngine`] for layer positions, and a
/// [`TransitionAnimator`] for flips. `E` is the host's element handle and `S`
/// its snapshot type.
///
/// Each frame runs in a fixed order:
///
/// 1. [`PanoramaView::handle_pointer`] for every pending pointer event.
/// 2. [`PanoramaView::frame`]: scroll animations step first, then transitions,
///    then the layout is recomputed from the settled offset.
/// 3. [`PanoramaView::draw`].
///
/// Call [`PanoramaView::measure`] whenever the viewport size or any element's
/// desired size changes.
#[derive(Clone, Debug)]
pub struct PanoramaView<E, S> {
    config: PanoramaConfig,
    header: HeaderSlot<E>,
    background: Option<BackgroundSlot<E>>,
    sections: SectionIndex<SectionSlot<E>>,
    engine: ParallaxLayoutEngine,
    gestures: GestureController,
    transitions: TransitionAnimator<E, S>,
    flip_target: Option<SectionId>,
    size: Size,
    layout: LayerLayout,
    touches: SmallVec<[(PointerId, Point); 4]>,
    now_ms: u64,
}

impl<E, S> PanoramaView<E, S> {
    pub(crate) fn from_parts(
        config: PanoramaConfig,
        header: HeaderSlot<E>,
        background: Option<E>,
        slots: Vec<SectionSlot<E>>,
    ) -> Self {
        let metrics = config.metrics;
        let mut sections = SectionIndex::new(metrics.section_margin);
        for slot in slots {
            sections.push(slot);
        }
        Self {
            engine: ParallaxLayoutEngine::new(metrics.parallax_params(config.sliding_style)),
            gestures: GestureController::new(metrics.gesture_config()),
            config,
            header,
            background: background.map(|element| BackgroundSlot {
                element,
                size: Size::ZERO,
            }),
            sections,
            transitions: TransitionAnimator::new(),
            flip_target: None,
            size: Size::ZERO,
            layout: LayerLayout::default(),
            touches: SmallVec::new(),
            now_ms: 0,
        }
    }

    /// The configuration the view was built with.
    #[must_use]
    pub fn config(&self) -> &PanoramaConfig {
        &self.config
    }

    /// Viewport size from the last measure.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// The container's header.
    #[must_use]
    pub fn header(&self) -> &HeaderSlot<E> {
        &self.header
    }

    /// Scaled background size, if there is a background.
    #[must_use]
    pub fn background_size(&self) -> Option<Size> {
        self.background.as_ref().map(|b| b.size)
    }

    /// The section strip.
    #[must_use]
    pub fn sections(&self) -> &SectionIndex<SectionSlot<E>> {
        &self.sections
    }

    /// The gesture state machine.
    #[must_use]
    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    /// The flip animator.
    #[must_use]
    pub fn transitions(&self) -> &TransitionAnimator<E, S> {
        &self.transitions
    }

    /// Section targeted by the running or last transition.
    #[must_use]
    pub fn flip_target(&self) -> Option<SectionId> {
        self.flip_target
    }

    /// Layout from the last frame.
    #[must_use]
    pub fn layout(&self) -> &LayerLayout {
        &self.layout
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.gestures.viewport().offset()
    }

    /// Section the offset last settled on.
    #[must_use]
    pub fn committed_section(&self) -> Option<SectionId> {
        self.gestures.committed_section()
    }

    /// Pointers currently down and where they are.
    #[must_use]
    pub fn touches(&self) -> &[(PointerId, Point)] {
        &self.touches
    }

    /// Returns `true` while the current gesture scrolls content, meaning
    /// children should stop receiving it.
    #[must_use]
    pub fn intercepts(&self) -> bool {
        self.gestures.intercepts()
    }

    /// Sizes every element for a viewport of `size`.
    ///
    /// The background is scaled per the configured scaling. Sections get the
    /// height left under the header and are at least as wide as the viewport
    /// minus the peeking width; each section header is then stretched to its
    /// section's width.
    pub fn measure<H>(&mut self, host: &mut H, size: Size)
    where
        H: ViewHost<Element = E>,
    {
        self.size = size;
        let metrics = self.config.metrics;

        if let Some(background) = &mut self.background {
            let intrinsic =
                host.measure(&background.element, Constraint::Unbounded, Constraint::Unbounded);
            background.size = self
                .config
                .background_scaling
                .scaled_size(intrinsic, size.height);
        }

        self.header.size = match self.header.visibility {
            HeaderVisibility::Collapsed => Size::ZERO,
            HeaderVisibility::Visible | HeaderVisibility::Invisible => {
                host.measure(&self.header.element, Constraint::Unbounded, Constraint::Unbounded)
            }
        };

        let min_width = (size.width - metrics.peeking_width).max(0.0);
        let available = (size.height - self.header.size.height).max(0.0);
        let ids: Vec<SectionId> = self.sections.iter().map(|(id, _)| id).collect();
        for id in ids {
            let Some(slot) = self.sections.header_mut(id) else {
                continue;
            };
            let title = host.measure(&slot.header, Constraint::Unbounded, Constraint::Unbounded);
            let content_height = Constraint::AtMost((available - title.height).max(0.0));
            slot.content_size = slot.content.as_ref().map_or(Size::ZERO, |content| {
                let desired = host.measure(content, Constraint::Unbounded, content_height);
                Size::new(desired.width, content_height.resolve(desired.height).max(0.0))
            });
            let width = title.width.max(slot.content_size.width).max(min_width);
            let stretched = host.measure(
                &slot.header,
                Constraint::Exactly(width),
                Constraint::Exactly(title.height),
            );
            slot.header_size = Size::new(
                Constraint::Exactly(width).resolve(stretched.width),
                title.height,
            );
            let height = slot.header_size.height + slot.content_size.height;
            self.sections.set_measured_size(id, Size::new(width, height));
        }

        self.gestures.set_viewport_width(size.width);
        log::debug!(
            "measured panorama at {size:?}: content width {}",
            self.sections.content_width()
        );
        self.relayout();
    }

    /// Feeds one pointer event. Returns `true` if the view consumed it.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down | PointerEventKind::Move => {
                match self.touches.iter_mut().find(|(p, _)| *p == event.pointer) {
                    Some(touch) => touch.1 = event.position,
                    None if event.kind == PointerEventKind::Down => {
                        self.touches.push((event.pointer, event.position));
                    }
                    None => {}
                }
            }
            PointerEventKind::Up => self.touches.retain(|(p, _)| *p != event.pointer),
            PointerEventKind::Cancel => self.touches.clear(),
        }
        let consumed = self.gestures.handle(event, &self.sections);
        if self.gestures.take_needs_layout() {
            self.relayout();
        }
        consumed
    }

    /// Advances animations to `now_ms` and recomputes the layout.
    pub fn frame(&mut self, now_ms: u64) -> FrameReport {
        self.now_ms = now_ms;
        let scrolled = self.gestures.advance(now_ms, &self.sections);
        let transition_events = self.transitions.advance(now_ms);
        self.gestures.take_needs_layout();
        self.relayout();
        FrameReport {
            scrolled,
            state: self.gestures.state(),
            transition_events,
        }
    }

    /// Scrolls to `offset`, cancelling any gesture animation.
    pub fn scroll_to(&mut self, offset: f64, animate: bool, now_ms: u64) {
        self.gestures
            .scroll_to(offset, animate, now_ms, &self.sections);
        self.gestures.take_needs_layout();
        self.relayout();
    }

    /// Brings `id` to the left edge of the viewport.
    ///
    /// Returns `false` if `id` is unknown or not visible.
    pub fn scroll_to_section(&mut self, id: SectionId, animate: bool, now_ms: u64) -> bool {
        let moved = self
            .gestures
            .scroll_to_section(id, animate, now_ms, &self.sections);
        if moved {
            self.gestures.take_needs_layout();
            self.relayout();
        }
        moved
    }

    /// Changes a section's visibility. Returns `false` if nothing changed.
    pub fn set_section_visibility(&mut self, id: SectionId, visibility: Visibility) -> bool {
        let changed = self.sections.set_visibility(id, visibility);
        if changed {
            log::debug!("section {id:?} is now {visibility:?}");
            self.relayout();
        }
        changed
    }

    /// Changes the header's visibility.
    ///
    /// Collapsing or expanding the header changes the height left for
    /// sections, so call [`PanoramaView::measure`] afterwards.
    pub fn set_header_visibility(&mut self, visibility: HeaderVisibility) {
        self.header.visibility = visibility;
    }

    /// Drops any flip transition and releases its mirage.
    pub fn reset_transition(&mut self) {
        self.transitions.reset();
        self.flip_target = None;
    }

    fn relayout(&mut self) {
        let metrics = LayerMetrics {
            viewport_width: self.size.width,
            header_width: self.header.size.width,
            background_width: self.background.as_ref().map_or(0.0, |b| b.size.width),
        };
        self.layout = self
            .engine
            .layout(&self.sections, self.gestures.viewport(), &metrics);

        if let Some(target) = self.flip_target {
            let rect = self.section_header_rect(target);
            if let (Some(rect), Some(mirage)) = (rect, self.transitions.mirage_mut()) {
                mirage.set_layout(rect);
            }
        }
    }

    /// Content-space rectangle of a section's header in the current layout.
    fn section_header_rect(&self, id: SectionId) -> Option<Rect> {
        let slot = self.sections.get(id)?;
        let left = self
            .layout
            .sections
            .iter()
            .find(|p| p.id == id)
            .map_or_else(|| slot.left(), |p| p.left);
        Some(Rect::from_origin_size(
            (left, self.header.size.height),
            slot.header().header_size,
        ))
    }

    fn stage_frame(&self, stage: Stage) -> Option<FlipFrame> {
        self.transitions.frame(stage, self.now_ms)
    }

    /// Draws the last computed layout.
    ///
    /// Layers are drawn back to front: background, header (and its wrap
    /// duplicate), sections, the section-title mirage, then the debug overlay
    /// if enabled.
    pub fn draw<C: Canvas<E, S>>(&self, canvas: &mut C) {
        let x = self.scroll_offset();
        let pivot = self.transitions.pivot();

        if let Some(background) = &self.background {
            let rect =
                Rect::from_origin_size((self.layout.background_left - x, 0.0), background.size);
            canvas.draw_element(&background.element, rect);
        }

        if self.header.visibility == HeaderVisibility::Visible {
            let frame = self.stage_frame(Stage::Header);
            let margin = self.config.metrics.header_margin_left;
            let lefts = [Some(self.layout.header_left), self.layout.header_mirage_left];
            for left in lefts.into_iter().flatten() {
                let rect = Rect::from_origin_size((left - x + margin, 0.0), self.header.size);
                draw_posed::<E, S, C>(canvas, &self.header.element, rect, frame, pivot);
            }
        }

        let top = self.header.size.height;
        for placement in &self.layout.sections {
            let Some(section) = self.sections.get(placement.id) else {
                continue;
            };
            if !section.visibility().is_visible() {
                continue;
            }
            let left = placement.left - x;
            if left >= self.size.width || left + section.width() <= 0.0 {
                continue;
            }
            let slot = section.header();
            let target = self.flip_target == Some(placement.id);
            if !(target && self.transitions.live_header_hidden()) {
                let rect = Rect::from_origin_size((left, top), slot.header_size);
                canvas.draw_element(&slot.header, rect);
            }
            if let Some(content) = &slot.content {
                let origin = (left, top + slot.header_size.height);
                let rect = Rect::from_origin_size(origin, slot.content_size);
                let frame = if target {
                    self.stage_frame(Stage::Content)
                } else {
                    None
                };
                draw_posed::<E, S, C>(canvas, content, rect, frame, pivot);
            }
        }

        if let Some(mirage) = self.transitions.mirage() {
            draw_mirage::<E, S, C>(canvas, mirage, self.stage_frame(Stage::SectionTitle), x, pivot);
        }

        overlay::draw(self, canvas);
    }
}

impl<E: Clone, S> PanoramaView<E, S> {
    /// Flips the panorama away towards section `id`.
    ///
    /// The section's header is captured through `host` into a mirage that
    /// stands in for it while the container header, the title, and the
    /// section's content flip out in turn.
    pub fn flip_out<H>(
        &mut self,
        host: &mut H,
        id: SectionId,
        now_ms: u64,
    ) -> Result<(), PanoramaError>
    where
        H: ViewHost<Element = E, Snapshot = S>,
    {
        let (mirage, header_size) = self.prepare_flip(id)?;
        self.transitions
            .flip_out(mirage, header_size, now_ms, |element, clip| host.capture(element, clip))?;
        self.flip_target = Some(id);
        self.now_ms = now_ms;
        Ok(())
    }

    /// Flips the panorama back in from section `id`.
    pub fn flip_in<H>(
        &mut self,
        host: &mut H,
        id: SectionId,
        now_ms: u64,
    ) -> Result<(), PanoramaError>
    where
        H: ViewHost<Element = E, Snapshot = S>,
    {
        let (mirage, header_size) = self.prepare_flip(id)?;
        self.transitions
            .flip_in(mirage, header_size, now_ms, |element, clip| host.capture(element, clip))?;
        self.flip_target = Some(id);
        self.now_ms = now_ms;
        Ok(())
    }

    fn prepare_flip(&mut self, id: SectionId) -> Result<(Mirage<E, S>, Size), PanoramaError> {
        let rect = self
            .section_header_rect(id)
            .ok_or(PanoramaError::UnknownSection(id))?;
        let slot = self
            .sections
            .get(id)
            .ok_or(PanoramaError::UnknownSection(id))?
            .header();
        let mut mirage = Mirage::new(slot.header.clone(), MirageClip::None);
        mirage.set_layout(rect);
        self.transitions
            .set_pivot(TransitionAnimator::<E, S>::pivot_for(self.size));
        Ok((mirage, slot.header_size))
    }
}

fn draw_posed<E, S, C: Canvas<E, S>>(
    canvas: &mut C,
    element: &E,
    rect: Rect,
    frame: Option<FlipFrame>,
    pivot: Point,
) {
    match frame {
        None => canvas.draw_element(element, rect),
        Some(frame) if frame.alpha > 0.0 => {
            canvas.draw_element_quad(element, frame.project_rect(rect, pivot), frame.alpha);
        }
        Some(_) => {}
    }
}

fn draw_mirage<E, S, C: Canvas<E, S>>(
    canvas: &mut C,
    mirage: &Mirage<E, S>,
    frame: Option<FlipFrame>,
    x: f64,
    pivot: Point,
) {
    let Ok(snapshot) = mirage.snapshot() else {
        return;
    };
    let frame = frame.unwrap_or_default();
    if frame.alpha <= 0.0 {
        return;
    }
    let layout = mirage.layout();
    let rect = layout.with_origin((layout.x0 - x, layout.y0));
    canvas.draw_snapshot(snapshot, frame.project_rect(rect, pivot), frame.alpha);
}
