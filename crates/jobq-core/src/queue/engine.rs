//! In-memory lifecycle engine.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{DiscardReason, JobLifecycle, JobRecord, JobStatus, JobStore, LeaseConfig, PendingQueue};
use crate::domain::{ConsumerId, JobId, JobSpec, Payload};
use crate::error::{ConflictReason, QueueError};
use crate::observability::QueueCounts;
use crate::ports::{Clock, SystemClock};

/// Shared state guarded by the engine lock.
struct EngineState {
    /// All job records (single source of truth).
    store: JobStore,

    /// Ids awaiting dequeue.
    pending: PendingQueue,

    /// Next job ID to assign.
    next_job_id: u64,
}

impl EngineState {
    fn new() -> Self {
        Self {
            store: JobStore::new(),
            pending: PendingQueue::new(),
            next_job_id: 1,
        }
    }

    fn allocate_job_id(&mut self) -> JobId {
        let id = JobId::new(self.next_job_id);
        self.next_job_id += 1;
        id
    }

    fn record(&self, id: JobId) -> Result<&JobRecord, QueueError> {
        self.store.get(id).ok_or(QueueError::NotFound(id))
    }

    fn record_mut(&mut self, id: JobId) -> Result<&mut JobRecord, QueueError> {
        self.store.get_mut(id).ok_or(QueueError::NotFound(id))
    }

    fn counts(&self) -> QueueCounts {
        let mut counts = QueueCounts {
            pending: self.pending.len(),
            ..QueueCounts::default()
        };
        for record in self.store.records() {
            match record.status {
                JobStatus::Queued => counts.queued += 1,
                JobStatus::InProgress => counts.in_progress += 1,
                JobStatus::Concluded => counts.concluded += 1,
            }
            if record.cancel_requested {
                counts.cancelled += 1;
            }
            if record.discarded.is_some() {
                counts.discarded += 1;
            }
        }
        counts
    }
}

/// The job lifecycle engine.
///
/// Owns the store, the pending queue and the id counter behind one
/// `tokio::sync::Mutex`; every operation holds it from validation to the
/// copy of the returned record, so operations never interleave.
pub struct LifecycleEngine {
    state: Mutex<EngineState>,
    clock: Arc<dyn Clock>,
    lease: LeaseConfig,
}

impl LifecycleEngine {
    pub fn new(lease: LeaseConfig) -> Self {
        Self::with_clock(lease, Arc::new(SystemClock))
    }

    pub fn with_clock(lease: LeaseConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(EngineState::new()),
            clock,
            lease,
        }
    }

    pub fn lease_config(&self) -> LeaseConfig {
        self.lease
    }
}

impl Default for LifecycleEngine {
    fn default() -> Self {
        Self::new(LeaseConfig::default())
    }
}

#[async_trait]
impl JobLifecycle for LifecycleEngine {
    async fn enqueue(&self, spec: JobSpec) -> Result<JobId, QueueError> {
        let mut state = self.state.lock().await;
        let id = state.allocate_job_id();
        let kind = spec.kind;

        state.store.insert(JobRecord::new(id, spec, self.clock.now()));
        state.pending.insert(id);

        tracing::info!(job_id = id.get(), %kind, "job enqueued");
        Ok(id)
    }

    async fn dequeue(&self, consumer: ConsumerId) -> Result<JobRecord, QueueError> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();
        let EngineState { store, pending, .. } = &mut *state;

        while let Some(id) = pending.poll() {
            let Some(record) = store.get_mut(id) else {
                continue;
            };
            if record.status != JobStatus::Queued {
                continue;
            }

            if record.cancel_requested {
                record.discard(DiscardReason::Cancelled);
                tracing::debug!(job_id = id.get(), "skipped cancelled job");
                continue;
            }
            if self.lease.queue_expired(record, now) {
                record.discard(DiscardReason::Expired);
                tracing::info!(job_id = id.get(), "dropped job past enqueue timeout");
                continue;
            }

            record.start_lease(consumer, now);
            tracing::info!(job_id = id.get(), consumer = consumer.get(), "job dequeued");
            return Ok(record.clone());
        }

        Err(QueueError::NoJobAvailable)
    }

    async fn conclude(&self, id: JobId, result: Option<Payload>) -> Result<JobRecord, QueueError> {
        let mut state = self.state.lock().await;
        let record = state.record_mut(id)?;

        let reason = match record.status {
            JobStatus::Concluded => Some(ConflictReason::AlreadyConcluded),
            _ if record.cancel_requested => Some(ConflictReason::Cancelled),
            JobStatus::Queued => Some(ConflictReason::NotYetDequeued),
            JobStatus::InProgress => None,
        };
        if let Some(reason) = reason {
            tracing::info!(job_id = id.get(), %reason, "conclude refused");
            return Err(QueueError::conflict(id, reason));
        }

        record.conclude(result);
        tracing::info!(job_id = id.get(), "job concluded");
        Ok(record.clone())
    }

    async fn cancel(&self, id: JobId) -> Result<JobRecord, QueueError> {
        let mut state = self.state.lock().await;
        let record = state.record_mut(id)?;

        if !record.cancel_requested {
            record.request_cancel();
            tracing::info!(job_id = id.get(), status = %record.status, "job cancelled");
        }
        Ok(record.clone())
    }

    async fn retry(&self, id: JobId) -> Result<JobRecord, QueueError> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();
        let EngineState { store, pending, .. } = &mut *state;
        let record = store.get_mut(id).ok_or(QueueError::NotFound(id))?;

        if record.status.is_terminal() {
            return Err(QueueError::conflict(id, ConflictReason::AlreadyConcluded));
        }
        if record.cancel_requested {
            return Err(QueueError::conflict(id, ConflictReason::Cancelled));
        }

        // A job still waiting in the queue keeps its slot; only the clock resets.
        let already_pending = record.is_pending();
        record.requeue(now);
        if !already_pending {
            pending.insert(id);
        }

        tracing::info!(job_id = id.get(), already_pending, "job requeued for retry");
        Ok(record.clone())
    }

    async fn fetch(&self, id: JobId) -> Result<JobRecord, QueueError> {
        let state = self.state.lock().await;
        state.record(id).cloned()
    }

    async fn counts(&self) -> QueueCounts {
        let state = self.state.lock().await;
        state.counts()
    }

    async fn reap_expired_leases(&self) -> Vec<JobId> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();
        let EngineState { store, pending, .. } = &mut *state;

        let mut expired: Vec<JobId> = store
            .records()
            .filter(|r| r.status == JobStatus::InProgress && !r.cancel_requested)
            .filter(|r| self.lease.lease_expired(r, now))
            .map(|r| r.id)
            .collect();
        // Store iteration order is arbitrary; requeue oldest first.
        expired.sort();

        for &id in &expired {
            if let Some(record) = store.get_mut(id) {
                tracing::warn!(
                    job_id = id.get(),
                    consumer = record.consumed_by.map(|c| c.get()),
                    "lease expired, requeueing job"
                );
                record.requeue(now);
                pending.insert(id);
            }
        }
        expired
    }
}
