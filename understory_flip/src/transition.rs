// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;
use understory_timing::Timeline;

use crate::flip::{FlipFrame, FlipSpec};
use crate::mirage::{Mirage, MirageError};

/// Delay between the starts of consecutive stages.
pub const STAGE_STAGGER_MS: u64 = 150;

/// One of the three elements a transition flips.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// The container's own header.
    Header,
    /// The mirage of the target section's header.
    SectionTitle,
    /// The target section's content.
    Content,
}

/// Which way a transition runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlipDirection {
    /// Header, then section title, then content flip away.
    Out,
    /// Content, then section title, then header flip back.
    In,
}

impl FlipDirection {
    /// The flip every stage of this direction plays.
    #[must_use]
    pub const fn spec(self) -> FlipSpec {
        match self {
            Self::Out => FlipSpec::OUT,
            Self::In => FlipSpec::IN,
        }
    }

    /// Stages in the order they start.
    #[must_use]
    pub const fn stages(self) -> [Stage; 3] {
        match self {
            Self::Out => [Stage::Header, Stage::SectionTitle, Stage::Content],
            Self::In => [Stage::Content, Stage::SectionTitle, Stage::Header],
        }
    }

    /// Offset of `stage` from the start of the transition.
    #[must_use]
    pub fn stage_offset_ms(self, stage: Stage) -> u64 {
        let slot = self.stages().iter().position(|s| *s == stage).unwrap_or(0);
        slot as u64 * STAGE_STAGGER_MS
    }

    /// Total length of the transition: the last stage's start plus one flip.
    #[must_use]
    pub const fn duration_ms(self) -> u64 {
        2 * STAGE_STAGGER_MS + self.spec().duration_ms
    }
}

/// Something that happened during [`TransitionAnimator::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionEvent {
    /// A stage began flipping.
    Started(Stage),
    /// A stage reached its final pose.
    Finished(Stage),
    /// Every stage finished and the mirage was released.
    Completed(FlipDirection),
}

/// Why a transition could not start.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum TransitionError {
    /// Another transition is still running.
    #[error("a transition is already running")]
    Busy,
    /// The section title could not be captured.
    #[error(transparent)]
    Mirage(#[from] MirageError),
}

#[derive(Clone, Copy, Debug)]
enum Cue {
    Start(Stage),
    Finish(Stage),
    Complete,
}

#[derive(Clone, Debug)]
struct Sequence {
    direction: FlipDirection,
    start_ms: u64,
    timeline: Timeline<Cue>,
    completed: bool,
}

impl Sequence {
    fn new(direction: FlipDirection, start_ms: u64) -> Self {
        let mut timeline = Timeline::new(start_ms);
        let flip = direction.spec().duration_ms;
        for stage in direction.stages() {
            let offset = direction.stage_offset_ms(stage);
            timeline.push(offset, Cue::Start(stage));
            timeline.push(offset + flip, Cue::Finish(stage));
        }
        timeline.push(direction.duration_ms(), Cue::Complete);
        Self {
            direction,
            start_ms,
            timeline,
            completed: false,
        }
    }

    fn frame(&self, stage: Stage, now_ms: u64) -> FlipFrame {
        let spec = self.direction.spec();
        let begin = self.start_ms + self.direction.stage_offset_ms(stage);
        let elapsed = now_ms.saturating_sub(begin);
        if spec.duration_ms == 0 || elapsed >= spec.duration_ms {
            return spec.frame(1.0);
        }
        let t = elapsed as f64 / spec.duration_ms as f64;
        spec.frame(t)
    }
}

/// Runs staged flip transitions between a panorama and a detail view.
///
/// A flip-out hides the target section's live header behind a frozen
/// [`Mirage`] and then flips three elements away, [`STAGE_STAGGER_MS`] apart:
/// the container header at `0`, the section-title mirage at `150`, and the
/// section content at `300`. When the content finishes (at `700`) the mirage
/// is unfrozen and the live header is shown again. A flip-in plays the same
/// sequence in reverse order with [`FlipSpec::IN`].
///
/// Stage poses are a pure function of time, so [`TransitionAnimator::frame`]
/// can be sampled at any timestamp. Discrete effects, such as releasing the
/// mirage, happen in [`TransitionAnimator::advance`], which hosts call once per
/// frame.
///
/// Starting a transition while another is running is rejected with
/// [`TransitionError::Busy`]. After a transition completes its final poses
/// hold until the next transition or [`TransitionAnimator::reset`].
#[derive(Clone, Debug)]
pub struct TransitionAnimator<E, S> {
    pivot: Point,
    sequence: Option<Sequence>,
    mirage: Option<Mirage<E, S>>,
}

impl<E, S> Default for TransitionAnimator<E, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, S> TransitionAnimator<E, S> {
    /// Creates an idle animator pivoting about the origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pivot: Point::ZERO,
            sequence: None,
            mirage: None,
        }
    }

    /// Pivot for a container of `size`: a quarter width to its left, half way
    /// down.
    #[must_use]
    pub fn pivot_for(size: Size) -> Point {
        Point::new(-size.width / 4.0, size.height / 2.0)
    }

    /// The point every stage rotates about, in container coordinates.
    #[must_use]
    pub fn pivot(&self) -> Point {
        self.pivot
    }

    /// Sets the rotation pivot.
    pub fn set_pivot(&mut self, pivot: Point) {
        self.pivot = pivot;
    }

    /// Returns `true` while a transition is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.sequence.as_ref().is_some_and(|s| !s.completed)
    }

    /// Direction of the running or last completed transition.
    #[must_use]
    pub fn direction(&self) -> Option<FlipDirection> {
        self.sequence.as_ref().map(|s| s.direction)
    }

    /// Returns `true` while the live section header must stay hidden behind
    /// the mirage.
    #[must_use]
    pub fn live_header_hidden(&self) -> bool {
        self.is_active() && self.mirage.as_ref().is_some_and(Mirage::is_frozen)
    }

    /// The section-title mirage of the running transition.
    #[must_use]
    pub fn mirage(&self) -> Option<&Mirage<E, S>> {
        self.mirage.as_ref()
    }

    /// The section-title mirage, mutably, for layout.
    pub fn mirage_mut(&mut self) -> Option<&mut Mirage<E, S>> {
        self.mirage.as_mut()
    }

    /// Starts flipping away from the section whose header `mirage` copies.
    ///
    /// The mirage is frozen immediately with `capture`; `header_size` is the
    /// measured size of its source.
    pub fn flip_out(
        &mut self,
        mirage: Mirage<E, S>,
        header_size: Size,
        now_ms: u64,
        capture: impl FnOnce(&E, Rect) -> S,
    ) -> Result<(), TransitionError> {
        self.start(FlipDirection::Out, mirage, header_size, now_ms, capture)
    }

    /// Starts flipping back to the section whose header `mirage` copies.
    pub fn flip_in(
        &mut self,
        mirage: Mirage<E, S>,
        header_size: Size,
        now_ms: u64,
        capture: impl FnOnce(&E, Rect) -> S,
    ) -> Result<(), TransitionError> {
        self.start(FlipDirection::In, mirage, header_size, now_ms, capture)
    }

    fn start(
        &mut self,
        direction: FlipDirection,
        mut mirage: Mirage<E, S>,
        header_size: Size,
        now_ms: u64,
        capture: impl FnOnce(&E, Rect) -> S,
    ) -> Result<(), TransitionError> {
        if self.is_active() {
            log::warn!("rejecting flip {direction:?} while another transition runs");
            return Err(TransitionError::Busy);
        }
        mirage.freeze(header_size, capture)?;
        if let Some(mut old) = self.mirage.replace(mirage) {
            old.unfreeze();
        }
        self.sequence = Some(Sequence::new(direction, now_ms));
        log::debug!("flip {direction:?} started at {now_ms}");
        Ok(())
    }

    /// Fires every stage boundary due at `now_ms`.
    pub fn advance(&mut self, now_ms: u64) -> SmallVec<[TransitionEvent; 4]> {
        let mut events = SmallVec::new();
        let Some(sequence) = &mut self.sequence else {
            return events;
        };
        if sequence.completed {
            return events;
        }
        for (_, cue) in sequence.timeline.poll(now_ms) {
            events.push(match cue {
                Cue::Start(stage) => TransitionEvent::Started(stage),
                Cue::Finish(stage) => TransitionEvent::Finished(stage),
                Cue::Complete => TransitionEvent::Completed(sequence.direction),
            });
        }
        if sequence.timeline.is_exhausted() {
            sequence.completed = true;
            if let Some(mirage) = &mut self.mirage {
                mirage.unfreeze();
            }
            log::debug!("flip {:?} completed at {now_ms}", sequence.direction);
        }
        events
    }

    /// Pose of `stage` at `now_ms`.
    ///
    /// Stages that have not started hold their first pose; finished stages
    /// hold their last. Returns `None` when no transition has run.
    #[must_use]
    pub fn frame(&self, stage: Stage, now_ms: u64) -> Option<FlipFrame> {
        self.sequence.as_ref().map(|s| s.frame(stage, now_ms))
    }

    /// Returns `true` if `stage` is mid-flip at `now_ms`.
    #[must_use]
    pub fn is_stage_running(&self, stage: Stage, now_ms: u64) -> bool {
        self.sequence.as_ref().is_some_and(|s| {
            let begin = s.start_ms + s.direction.stage_offset_ms(stage);
            now_ms >= begin && now_ms < begin + s.direction.spec().duration_ms
        })
    }

    /// Drops any transition and releases the mirage.
    pub fn reset(&mut self) {
        self.sequence = None;
        if let Some(mut mirage) = self.mirage.take() {
            mirage.unfreeze();
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Size;

    use super::{FlipDirection, Stage, TransitionAnimator, TransitionError, TransitionEvent};
    use crate::{FlipFrame, Mirage, MirageClip, MirageError};

    type Animator = TransitionAnimator<&'static str, u32>;

    fn title() -> Mirage<&'static str, u32> {
        Mirage::new("photos", MirageClip::None)
    }

    const TITLE: Size = Size::new(180.0, 48.0);

    #[test]
    fn flip_out_timeline() {
        let mut a = Animator::new();
        a.flip_out(title(), TITLE, 0, |_, _| 1).unwrap();
        assert!(a.is_active());
        assert!(a.live_header_hidden());
        assert_eq!(
            a.advance(0).into_iter().collect::<Vec<_>>(),
            [TransitionEvent::Started(Stage::Header)]
        );

        // t=150: the mirage starts while the header is mid-flip.
        assert_eq!(
            a.advance(150).into_iter().collect::<Vec<_>>(),
            [TransitionEvent::Started(Stage::SectionTitle)]
        );
        assert!(a.is_stage_running(Stage::Header, 150));
        assert!(a.is_stage_running(Stage::SectionTitle, 150));
        assert!(!a.is_stage_running(Stage::Content, 150));
        let header = a.frame(Stage::Header, 150).unwrap();
        assert!(header.alpha > 0.0 && header.alpha < 1.0);

        // t=300: content begins.
        assert_eq!(
            a.advance(300).into_iter().collect::<Vec<_>>(),
            [TransitionEvent::Started(Stage::Content)]
        );
        assert!(a.mirage().unwrap().is_frozen());

        // t=700: content done, mirage released, header restored.
        let events: Vec<_> = a.advance(700).into_iter().collect();
        assert_eq!(
            events,
            [
                TransitionEvent::Finished(Stage::Header),
                TransitionEvent::Finished(Stage::SectionTitle),
                TransitionEvent::Finished(Stage::Content),
                TransitionEvent::Completed(FlipDirection::Out),
            ]
        );
        assert!(!a.is_active());
        assert!(!a.live_header_hidden());
        assert_eq!(
            a.mirage().unwrap().snapshot(),
            Err(MirageError::NotFrozen)
        );
        // Final poses hold.
        assert_eq!(a.frame(Stage::Content, 900).unwrap().alpha, 0.0);
        assert!(a.advance(900).is_empty());
    }

    #[test]
    fn coarse_polling_still_fires_everything_once() {
        let mut a = Animator::new();
        a.flip_out(title(), TITLE, 1000, |_, _| 1).unwrap();
        assert!(a.advance(999).is_empty());
        let events = a.advance(5000);
        assert_eq!(events.len(), 7);
        assert_eq!(
            events.last(),
            Some(&TransitionEvent::Completed(FlipDirection::Out))
        );
    }

    #[test]
    fn overlapping_trigger_is_rejected() {
        let mut a = Animator::new();
        a.flip_out(title(), TITLE, 0, |_, _| 1).unwrap();
        let mut captured = false;
        let err = a.flip_out(Mirage::new("people", MirageClip::None), TITLE, 100, |_, _| {
            captured = true;
            2
        });
        assert_eq!(err, Err(TransitionError::Busy));
        assert!(!captured);
        assert_eq!(a.mirage().unwrap().source(), &"photos");
        assert_eq!(a.mirage().unwrap().snapshot(), Ok(&1));
    }

    #[test]
    fn unmeasured_title_does_not_start() {
        let mut a = Animator::new();
        let err = a.flip_out(title(), Size::ZERO, 0, |_, _| 1);
        assert_eq!(err, Err(TransitionError::Mirage(MirageError::NotMeasured)));
        assert!(!a.is_active());
        assert_eq!(a.frame(Stage::Header, 0), None);
    }

    #[test]
    fn flip_in_runs_in_reverse() {
        let mut a = Animator::new();
        a.flip_out(title(), TITLE, 0, |_, _| 1).unwrap();
        a.advance(700);
        a.flip_in(title(), TITLE, 1000, |_, _| 2).unwrap();
        assert_eq!(a.direction(), Some(FlipDirection::In));

        // The header waits, invisible, until its turn at 300ms.
        assert_eq!(a.frame(Stage::Header, 1100).unwrap().alpha, 0.0);
        assert!(a.is_stage_running(Stage::Content, 1100));
        assert!(!a.is_stage_running(Stage::Header, 1100));

        assert!(a.is_active());
        a.advance(1799);
        assert!(a.is_active());
        let events = a.advance(1800);
        assert_eq!(
            events.last(),
            Some(&TransitionEvent::Completed(FlipDirection::In))
        );
        assert_eq!(a.frame(Stage::Header, 1800), Some(FlipFrame::IDENTITY));
        assert!(!a.mirage().unwrap().is_frozen());
    }

    #[test]
    fn durations() {
        assert_eq!(FlipDirection::Out.duration_ms(), 700);
        assert_eq!(FlipDirection::In.duration_ms(), 800);
        assert_eq!(FlipDirection::In.stage_offset_ms(Stage::Header), 300);
        assert_eq!(
            Animator::pivot_for(Size::new(480.0, 800.0)),
            kurbo::Point::new(-120.0, 400.0)
        );
    }

    #[test]
    fn reset_releases_the_mirage() {
        let mut a = Animator::new();
        a.flip_out(title(), TITLE, 0, |_, _| 1).unwrap();
        a.reset();
        assert!(!a.is_active());
        assert!(a.mirage().is_none());
        assert!(a.flip_out(title(), TITLE, 10, |_, _| 1).is_ok());
    }
}
