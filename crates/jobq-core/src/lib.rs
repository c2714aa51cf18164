//! jobq-core
//!
//! Lifecycle engine for a single-process job queue.
//!
//! # Modules
//! - **domain**: ids, job kinds, enqueue specs, opaque payloads
//! - **queue**: job records, pending queue, store, the `JobLifecycle` port and
//!   its in-memory `LifecycleEngine`
//! - **ports**: clock abstraction
//! - **app**: background loops (lease reaper)
//! - **observability**: status counts
//! - **error**: `QueueError`

pub mod app;
pub mod domain;
pub mod error;
pub mod observability;
pub mod ports;
pub mod queue;

pub use domain::{ConsumerId, JobId, JobKind, JobSpec, Payload};
pub use error::{ConflictReason, QueueError};
pub use observability::QueueCounts;
pub use queue::{
    DiscardReason, JobLifecycle, JobRecord, JobStatus, LeaseConfig, LifecycleEngine,
};
