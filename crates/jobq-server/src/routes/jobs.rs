//! Route definitions for the `/jobs` resource.

use axum::Router;
use axum::routing::{get, post, put};

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// ```text
/// POST   /enqueue              -> enqueue
/// GET    /dequeue              -> dequeue      (QUEUE_CONSUMER header)
/// GET    /stats                -> stats
/// GET    /{job_id}             -> get_job
/// PUT    /{job_id}/conclude    -> conclude
/// PUT    /{job_id}/cancel      -> cancel
/// PUT    /{job_id}/retry       -> retry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/enqueue", post(jobs::enqueue))
        .route("/dequeue", get(jobs::dequeue))
        .route("/stats", get(jobs::stats))
        .route("/{job_id}", get(jobs::get_job))
        .route("/{job_id}/conclude", put(jobs::conclude))
        .route("/{job_id}/cancel", put(jobs::cancel))
        .route("/{job_id}/retry", put(jobs::retry))
}
