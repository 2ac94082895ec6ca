//! `ActivationQueue`: samples of one state that have not been introduced yet.
//!
//! Kept sorted by activation time at all times; samples with equal times
//! leave in the order they were queued.

use std::collections::VecDeque;

use sb_core::NodeId;

#[derive(Clone, Debug, Default)]
pub struct ActivationQueue {
    inner: VecDeque<(f64, NodeId)>,
}

impl ActivationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `lineage` at `time`, after any entries with the same time.
    ///
    /// `time` must not be NaN; the pool checks this before calling.
    pub fn push(&mut self, time: f64, lineage: NodeId) {
        let at = self.inner.partition_point(|&(t, _)| t <= time);
        self.inner.insert(at, (time, lineage));
    }

    /// The earliest entry without removing it.
    pub fn peek(&self) -> Option<(f64, NodeId)> {
        self.inner.front().copied()
    }

    pub fn pop(&mut self) -> Option<(f64, NodeId)> {
        self.inner.pop_front()
    }

    /// Earliest activation time, or `+inf` if empty.
    pub fn next_time(&self) -> f64 {
        self.peek().map_or(f64::INFINITY, |(t, _)| t)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(f64, NodeId)> {
        self.inner.iter()
    }
}
