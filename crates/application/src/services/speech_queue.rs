//! Pending speech requests in arrival order
//!
//! The queue itself is not synchronized. It lives inside the orchestrator's
//! lock together with the orchestrator state and the music focus, so a
//! dequeue and the `Idle -> Speaking` transition happen as one step.

use std::collections::VecDeque;

use domain::SpeechRequest;

/// Strict FIFO of speech requests, unbounded, no reordering or deduplication
#[derive(Debug, Default)]
pub struct SpeechQueue {
    pending: VecDeque<SpeechRequest>,
}

impl SpeechQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request to the tail
    pub fn enqueue(&mut self, request: SpeechRequest) {
        self.pending.push_back(request);
    }

    /// Remove and return the head, if any
    pub fn try_dequeue(&mut self) -> Option<SpeechRequest> {
        self.pending.pop_front()
    }

    /// Number of requests waiting
    #[must_use]
    pub fn depth(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending request, returning how many were discarded
    pub fn clear(&mut self) -> usize {
        let discarded = self.pending.len();
        self.pending.clear();
        discarded
    }
}
