use std::fmt;

use thiserror::Error;

use crate::domain::JobId;

/// Why a state transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    /// Conclude on a job that is still QUEUED.
    NotYetDequeued,
    /// Conclude or Retry on a CONCLUDED job.
    AlreadyConcluded,
    /// Conclude or Retry after Cancel.
    Cancelled,
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConflictReason::NotYetDequeued => "not yet dequeued",
            ConflictReason::AlreadyConcluded => "already concluded",
            ConflictReason::Cancelled => "cancelled",
        })
    }
}

/// Errors returned by lifecycle operations.
///
/// A failed operation never leaves a partial mutation behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid QUEUE_CONSUMER: {0}")]
    InvalidConsumer(String),

    #[error("no job available")]
    NoJobAvailable,

    #[error("job {} not found", .0.get())]
    NotFound(JobId),

    #[error("job {} {reason}", .id.get())]
    Conflict { id: JobId, reason: ConflictReason },
}

impl QueueError {
    pub(crate) fn conflict(id: JobId, reason: ConflictReason) -> Self {
        QueueError::Conflict { id, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_job_and_reason() {
        let err = QueueError::conflict(JobId::new(1), ConflictReason::AlreadyConcluded);
        assert_eq!(err.to_string(), "job 1 already concluded");

        let err = QueueError::NotFound(JobId::new(999));
        assert_eq!(err.to_string(), "job 999 not found");
    }
}
