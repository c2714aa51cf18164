use serde::{Deserialize, Serialize};

/// Snapshot of the store, taken under the engine lock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueCounts {
    pub queued: usize,
    pub in_progress: usize,
    pub concluded: usize,
    /// Jobs with the cancel flag set, whatever their status.
    pub cancelled: usize,
    /// Queued jobs that Dequeue dropped as cancelled or expired.
    pub discarded: usize,
    /// Entries currently in the pending queue.
    pub pending: usize,
}
