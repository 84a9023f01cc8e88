//! Generation counting, cancellation, and batched result rendering.
//!
//! Every keystroke that changes the query advances a shared generation counter. Work
//! scheduled for an older generation holds a [`CancellationToken`] that notices the change
//! and stops before touching the results list.

use std::{cell::Cell, rc::Rc};

use docsearch_index::SearchHit;

/// Shared, monotonically increasing query generation.
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    /// Live generation.
    live: Rc<Cell<u64>>,
}

impl GenerationCounter {
    /// Creates a counter at generation zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live generation.
    pub fn current(&self) -> u64 {
        self.live.get()
    }

    /// Advances the generation, cancelling every outstanding token, and returns a token
    /// for the new generation.
    pub fn advance(&self) -> CancellationToken {
        self.live.set(self.live.get() + 1);
        self.token()
    }

    /// Returns a token for the live generation.
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            live: Rc::clone(&self.live),
            generation: self.live.get(),
        }
    }
}

/// Captures the generation that was live when some work was scheduled.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    /// Counter shared with the session.
    live: Rc<Cell<u64>>,
    /// Generation captured at creation.
    generation: u64,
}

impl CancellationToken {
    /// Generation this token belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once the live generation has moved past this token's.
    pub fn is_cancelled(&self) -> bool {
        self.live.get() != self.generation
    }
}

/// What happened when a batch ran.
#[derive(Debug)]
pub enum BatchStep {
    /// The token was cancelled; nothing was appended.
    Cancelled,
    /// The last hits were appended.
    Finished {
        /// Hits appended by this step.
        appended: usize,
    },
    /// Some hits were appended and more remain.
    Pending {
        /// Hits appended by this step.
        appended: usize,
        /// Continuation to schedule for the next tick.
        next: RenderBatch,
    },
}

/// Ranked hits still to be appended, with the token live when the query ran.
#[derive(Debug)]
pub struct RenderBatch {
    /// Every hit of the query, best first.
    hits: Vec<SearchHit>,
    /// Index of the next hit to append.
    cursor: usize,
    /// Token of the query's generation.
    token: CancellationToken,
}

impl RenderBatch {
    /// Creates a batch starting at the first hit.
    pub fn new(hits: Vec<SearchHit>, token: CancellationToken) -> Self {
        Self {
            hits,
            cursor: 0,
            token,
        }
    }

    /// Token this batch checks before appending.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Hits not yet appended.
    pub fn remaining(&self) -> usize {
        self.hits.len() - self.cursor
    }

    /// Appends up to `batch_size` hits through `append` unless the token was cancelled.
    ///
    /// A zero `batch_size` still appends one hit so the batch always makes progress.
    pub fn run<F>(mut self, batch_size: usize, mut append: F) -> BatchStep
    where
        F: FnMut(&SearchHit),
    {
        if self.token.is_cancelled() {
            return BatchStep::Cancelled;
        }

        let end = (self.cursor + batch_size.max(1)).min(self.hits.len());
        for hit in &self.hits[self.cursor..end] {
            append(hit);
        }
        let appended = end - self.cursor;
        self.cursor = end;

        if self.remaining() == 0 {
            BatchStep::Finished { appended }
        } else {
            BatchStep::Pending {
                appended,
                next: self,
            }
        }
    }
}
