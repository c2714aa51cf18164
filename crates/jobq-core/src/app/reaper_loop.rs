//! ReaperLoop - recovers jobs whose lease ran out.
//!
//! Nothing else revisits IN_PROGRESS jobs, so without this loop the dequeue
//! timeout is informational only.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::queue::JobLifecycle;

/// Periodically calls [`JobLifecycle::reap_expired_leases`].
///
/// # Flow
/// 1. Sleep for `interval` (or stop if cancelled)
/// 2. Requeue every IN_PROGRESS job past its dequeue timeout
/// 3. Repeat
pub struct ReaperLoop {
    engine: Arc<dyn JobLifecycle>,
    interval: Duration,
}

impl ReaperLoop {
    pub fn new(engine: Arc<dyn JobLifecycle>, interval: Duration) -> Self {
        Self { engine, interval }
    }

    /// Run until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(interval_ms = self.interval.as_millis() as u64, "lease reaper started");
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let reaped = self.engine.reap_expired_leases().await;
                    if !reaped.is_empty() {
                        tracing::info!(count = reaped.len(), "requeued jobs with expired leases");
                    }
                }
            }
        }

        tracing::info!("lease reaper stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConsumerId, JobKind, JobSpec};
    use crate::queue::{JobStatus, LeaseConfig, LifecycleEngine};

    #[tokio::test]
    async fn reaper_requeues_and_stops_on_cancel() {
        let engine = Arc::new(LifecycleEngine::new(LeaseConfig::from_millis(60_000, 0)));
        let id = engine.enqueue(JobSpec::new(JobKind::NotTimeCritical)).await.unwrap();
        engine.dequeue(ConsumerId::new(1)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(2)).await;

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(
            ReaperLoop::new(engine.clone(), Duration::from_millis(10)).run(cancel.clone()),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(engine.fetch(id).await.unwrap().status, JobStatus::Queued);

        cancel.cancel();
        handle.await.unwrap();
    }
}
