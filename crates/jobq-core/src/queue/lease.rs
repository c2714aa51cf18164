//! Lease timeouts.

use std::time::Duration;

use chrono::{DateTime, Utc};

use super::JobRecord;

/// How long a job may wait and how long it may be worked.
///
/// Both are whole milliseconds end to end; the defaults are
/// 60s queued and 30s in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaseConfig {
    /// Max time in QUEUED before Dequeue treats the job as stale.
    pub enqueue_timeout: Duration,

    /// Max time in IN_PROGRESS before the reaper hands the job out again.
    pub dequeue_timeout: Duration,
}

impl LeaseConfig {
    pub fn from_millis(enqueue_timeout_ms: u64, dequeue_timeout_ms: u64) -> Self {
        Self {
            enqueue_timeout: Duration::from_millis(enqueue_timeout_ms),
            dequeue_timeout: Duration::from_millis(dequeue_timeout_ms),
        }
    }

    /// Has the job waited in the queue longer than `enqueue_timeout`?
    pub fn queue_expired(&self, record: &JobRecord, now: DateTime<Utc>) -> bool {
        elapsed(record.enqueued_at, now) > self.enqueue_timeout
    }

    /// Has the consumer held the job longer than `dequeue_timeout`?
    pub fn lease_expired(&self, record: &JobRecord, now: DateTime<Utc>) -> bool {
        record
            .dequeued_at
            .is_some_and(|at| elapsed(at, now) > self.dequeue_timeout)
    }
}

impl Default for LeaseConfig {
    fn default() -> Self {
        Self::from_millis(60_000, 30_000)
    }
}

/// Time from `since` to `now`; zero if the clock went backwards.
fn elapsed(since: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - since).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConsumerId, JobId, JobKind, JobSpec};
    use chrono::TimeZone;
    use rstest::rstest;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[rstest]
    #[case::fresh(0, false)]
    #[case::at_limit(1_000, false)]
    #[case::past_limit(1_001, true)]
    fn queue_expiry_is_strictly_after_timeout(#[case] waited_ms: i64, #[case] expired: bool) {
        let lease = LeaseConfig::from_millis(1_000, 1_000);
        let record = JobRecord::new(JobId::new(1), JobSpec::new(JobKind::TimeCritical), t0());
        let now = t0() + chrono::Duration::milliseconds(waited_ms);

        assert_eq!(lease.queue_expired(&record, now), expired);
    }

    #[test]
    fn lease_expiry_needs_a_dequeue() {
        let lease = LeaseConfig::from_millis(1_000, 500);
        let mut record = JobRecord::new(JobId::new(1), JobSpec::new(JobKind::TimeCritical), t0());
        let late = t0() + chrono::Duration::seconds(10);
        assert!(!lease.lease_expired(&record, late));

        record.start_lease(ConsumerId::new(1), t0());
        assert!(lease.lease_expired(&record, late));
    }

    #[test]
    fn clock_going_backwards_is_not_expiry() {
        let lease = LeaseConfig::from_millis(0, 0);
        let record = JobRecord::new(JobId::new(1), JobSpec::new(JobKind::TimeCritical), t0());
        let earlier = t0() - chrono::Duration::seconds(1);
        assert!(!lease.queue_expired(&record, earlier));
    }
}
