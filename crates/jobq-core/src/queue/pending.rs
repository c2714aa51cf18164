//! FIFO of job ids waiting for a consumer.

use std::collections::VecDeque;

use crate::domain::JobId;

/// Ordered ids of jobs awaiting dequeue.
///
/// Holds ids only; records live in [`super::JobStore`]. Whether a popped id is
/// still eligible is the engine's call, not the queue's.
#[derive(Debug, Default)]
pub struct PendingQueue {
    entries: VecDeque<JobId>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the tail.
    pub fn insert(&mut self, id: JobId) {
        self.entries.push_back(id);
    }

    /// Remove and return the head.
    pub fn poll(&mut self) -> Option<JobId> {
        self.entries.pop_front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
