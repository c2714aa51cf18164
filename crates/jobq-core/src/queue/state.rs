//! Job status state machine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Job status.
///
/// State transitions:
/// - Queued -> InProgress -> Concluded
/// - InProgress -> Queued (Retry, or lease reaped)
///
/// Concluded is terminal. Cancellation is a separate sticky flag on the
/// record, not a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Waiting for a consumer.
    Queued,

    /// Handed to a consumer by Dequeue.
    InProgress,

    /// Finished; no further transitions.
    Concluded,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Concluded)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Queued => "QUEUED",
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::Concluded => "CONCLUDED",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why Dequeue dropped a job from the pending path without handing it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscardReason {
    Cancelled,
    Expired,
}
