// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cue timeline: fire payloads at fixed offsets from a start timestamp.
//!
//! A [`Timeline`] replaces "post this closure after N ms" with an explicit queue
//! the owner polls once per frame. Cues fire in offset order (ties keep push
//! order), each exactly once, no matter how coarse the polling is.

use alloc::vec::Vec;

/// A queue of cues at fixed offsets from a start timestamp.
#[derive(Clone, Debug)]
pub struct Timeline<T> {
    start_ms: u64,
    cues: Vec<(u64, T)>,
    next: usize,
}

impl<T: Copy> Timeline<T> {
    /// Creates an empty timeline anchored at `start_ms`.
    #[must_use]
    pub fn new(start_ms: u64) -> Self {
        Self {
            start_ms,
            cues: Vec::new(),
            next: 0,
        }
    }

    /// Returns the anchor timestamp.
    #[must_use]
    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    /// Adds a cue `offset_ms` after the start.
    ///
    /// Cues may be pushed in any order. Pushing a cue whose offset has already
    /// been polled past makes it fire on the next poll.
    pub fn push(&mut self, offset_ms: u64, cue: T) {
        let pending = &self.cues[self.next..];
        let at = self.next + pending.partition_point(|(o, _)| *o <= offset_ms);
        self.cues.insert(at, (offset_ms, cue));
    }

    /// Drains every cue due at `now_ms`, returning `(offset_ms, cue)` pairs.
    ///
    /// Nothing is due before the start, not even cues at offset zero.
    pub fn poll(&mut self, now_ms: u64) -> impl Iterator<Item = (u64, T)> + '_ {
        let begin = self.next;
        let due = match now_ms.checked_sub(self.start_ms) {
            Some(elapsed) => self.cues[begin..].partition_point(|(o, _)| *o <= elapsed),
            None => 0,
        };
        self.next = begin + due;
        self.cues[begin..begin + due].iter().copied()
    }

    /// Returns the offset of the next pending cue, if any.
    #[must_use]
    pub fn next_offset(&self) -> Option<u64> {
        self.cues.get(self.next).map(|(o, _)| *o)
    }

    /// Returns `true` once every cue has fired.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.next >= self.cues.len()
    }
}
