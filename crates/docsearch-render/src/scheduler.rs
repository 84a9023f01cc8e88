//! Timer queue for render batch continuations.

use std::{collections::VecDeque, time::Instant};

use crate::batch::RenderBatch;

/// Batches waiting for their tick, ordered by due time.
///
/// Batches due at the same instant run in scheduling order.
#[derive(Debug, Default)]
pub struct Scheduler {
    /// Pending `(due, batch)` pairs, sorted by due time.
    queue: VecDeque<(Instant, RenderBatch)>,
}

impl Scheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `batch` to run at `due`.
    pub fn schedule(&mut self, due: Instant, batch: RenderBatch) {
        let at = self.queue.partition_point(|(other, _)| *other <= due);
        self.queue.insert(at, (due, batch));
    }

    /// Removes and returns the earliest batch due at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<RenderBatch> {
        match self.queue.front() {
            Some((due, _)) if *due <= now => self.queue.pop_front().map(|(_, batch)| batch),
            _ => None,
        }
    }

    /// Due time of the earliest pending batch.
    pub fn next_due(&self) -> Option<Instant> {
        self.queue.front().map(|(due, _)| *due)
    }

    /// Number of pending batches, stale ones included.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
