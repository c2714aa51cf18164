//! Queue module: job records, the pending queue, and the lifecycle engine.

mod engine;
mod lease;
mod pending;
mod record;
mod state;
mod store;

pub use engine::LifecycleEngine;
pub use lease::LeaseConfig;
pub use pending::PendingQueue;
pub use record::JobRecord;
pub use state::{DiscardReason, JobStatus};
pub use store::JobStore;

use async_trait::async_trait;

use crate::domain::{ConsumerId, JobId, JobSpec, Payload};
use crate::error::QueueError;
use crate::observability::QueueCounts;

/// Lifecycle port (interface).
///
/// Every call is atomic: it validates, mutates and copies out the record it
/// returns under one lock, and leaves state untouched when it fails.
/// Returned records are copies; mutating them changes nothing.
#[async_trait]
pub trait JobLifecycle: Send + Sync {
    /// Store a new QUEUED job and append it to the pending queue.
    async fn enqueue(&self, spec: JobSpec) -> Result<JobId, QueueError>;

    /// Hand the oldest eligible job to `consumer`.
    ///
    /// Cancelled and expired entries met on the way are dropped from the
    /// pending queue and stay in the store.
    async fn dequeue(&self, consumer: ConsumerId) -> Result<JobRecord, QueueError>;

    /// Mark an IN_PROGRESS job CONCLUDED, optionally attaching a result.
    async fn conclude(&self, id: JobId, result: Option<Payload>) -> Result<JobRecord, QueueError>;

    /// Set the cancel flag. Idempotent.
    async fn cancel(&self, id: JobId) -> Result<JobRecord, QueueError>;

    /// Put a job back in the pending queue with a fresh enqueue time.
    async fn retry(&self, id: JobId) -> Result<JobRecord, QueueError>;

    async fn fetch(&self, id: JobId) -> Result<JobRecord, QueueError>;

    async fn counts(&self) -> QueueCounts;

    /// Requeue IN_PROGRESS jobs held longer than the dequeue timeout.
    async fn reap_expired_leases(&self) -> Vec<JobId>;
}
