//! Job record: the single source of truth for one job.

use chrono::{DateTime, Utc};

use super::{DiscardReason, JobStatus};
use crate::domain::{ConsumerId, JobId, JobKind, JobSpec, Payload};

/// Metadata + payload for a job in the store.
///
/// - The pending queue holds `JobId` only.
/// - All status changes go through the methods below; the engine checks
///   preconditions before calling them.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub id: JobId,
    pub kind: JobKind,
    pub status: JobStatus,

    /// Consumer holding the job. Only set while IN_PROGRESS or after conclusion.
    pub consumed_by: Option<ConsumerId>,

    pub payload: Option<Payload>,
    pub result: Option<Payload>,

    /// Sticky once set.
    pub cancel_requested: bool,

    /// Most recent enqueue or retry.
    pub enqueued_at: DateTime<Utc>,

    /// Most recent dequeue (lease start).
    pub dequeued_at: Option<DateTime<Utc>>,

    /// Set when Dequeue dropped the job from the pending path.
    pub discarded: Option<DiscardReason>,
}

impl JobRecord {
    pub fn new(id: JobId, spec: JobSpec, now: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: spec.kind,
            status: JobStatus::Queued,
            consumed_by: None,
            payload: spec.payload,
            result: None,
            cancel_requested: false,
            enqueued_at: now,
            dequeued_at: None,
            discarded: None,
        }
    }

    /// Hand the job to a consumer.
    pub fn start_lease(&mut self, consumer: ConsumerId, now: DateTime<Utc>) {
        self.status = JobStatus::InProgress;
        self.consumed_by = Some(consumer);
        self.dequeued_at = Some(now);
    }

    pub fn conclude(&mut self, result: Option<Payload>) {
        self.status = JobStatus::Concluded;
        if result.is_some() {
            self.result = result;
        }
    }

    pub fn request_cancel(&mut self) {
        self.cancel_requested = true;
    }

    /// Put the job back in QUEUED with a fresh enqueue time.
    pub fn requeue(&mut self, now: DateTime<Utc>) {
        self.status = JobStatus::Queued;
        self.consumed_by = None;
        self.enqueued_at = now;
        self.discarded = None;
    }

    pub fn discard(&mut self, reason: DiscardReason) {
        self.discarded = Some(reason);
    }

    /// Is the job sitting in the pending queue right now?
    pub fn is_pending(&self) -> bool {
        self.status == JobStatus::Queued && self.discarded.is_none()
    }
}
