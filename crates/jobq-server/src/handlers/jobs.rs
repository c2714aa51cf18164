//! Handlers for the `/jobs` resource.
//!
//! Each handler decodes the request, makes exactly one engine call and
//! renders the result. All lifecycle rules live in `jobq_core`.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use jobq_core::{
    ConsumerId, DiscardReason, JobId, JobKind, JobRecord, JobSpec, JobStatus, Payload,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Header carrying the dequeuing consumer's id.
pub const CONSUMER_HEADER: &str = "queue_consumer";

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request body for POST /jobs/enqueue.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnqueueRequest {
    #[serde(rename = "Type")]
    pub job_type: Option<String>,
    pub status: Option<String>,
    pub payload: Option<serde_json::Value>,
}

/// Response for POST /jobs/enqueue.
#[derive(Debug, Serialize)]
pub struct EnqueueResponse {
    pub id: u64,
}

/// Optional request body for PUT /jobs/{job_id}/conclude.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConcludeRequest {
    pub result: Option<serde_json::Value>,
}

/// `{ "status": ... }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Wire view of a job record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobView {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Type")]
    pub kind: JobKind,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_by: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Payload>,
    pub cancel: bool,
    pub enqueue_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dequeue_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discarded: Option<DiscardReason>,
}

impl From<JobRecord> for JobView {
    fn from(record: JobRecord) -> Self {
        Self {
            id: record.id.get(),
            kind: record.kind,
            status: record.status,
            consumed_by: record.consumed_by.map(|c| c.get()),
            payload: record.payload,
            result: record.result,
            cancel: record.cancel_requested,
            enqueue_time: record.enqueued_at,
            dequeue_time: record.dequeued_at,
            discarded: record.discarded,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Decode a JSON body. An empty body decodes to `T::default()`.
fn decode_body<T: DeserializeOwned + Default>(body: &Bytes) -> AppResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))
}

// ---------------------------------------------------------------------------
// Enqueue / Dequeue
// ---------------------------------------------------------------------------

/// POST /jobs/enqueue
///
/// Body `{ "Type": ..., "Status": ..., "Payload"?: ... }`. Returns `{ "id": n }`.
pub async fn enqueue(State(state): State<AppState>, body: Bytes) -> AppResult<impl IntoResponse> {
    // An empty body falls through to the missing-fields check.
    let input: EnqueueRequest = decode_body(&body)?;
    let spec = JobSpec::parse(
        input.job_type.as_deref(),
        input.status.as_deref(),
        input.payload.map(Payload::new),
    )?;

    let id = state.engine.enqueue(spec).await?;
    Ok(Json(EnqueueResponse { id: id.get() }))
}

/// GET /jobs/dequeue
///
/// Requires the `QUEUE_CONSUMER` header. Returns the job now IN_PROGRESS.
pub async fn dequeue(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let raw = headers
        .get(CONSUMER_HEADER)
        .map(|v| v.to_str().unwrap_or_default());
    let consumer = ConsumerId::parse_header(raw)?;

    let job = state.engine.dequeue(consumer).await?;
    Ok(Json(JobView::from(job)))
}

// ---------------------------------------------------------------------------
// Per-job transitions
// ---------------------------------------------------------------------------

/// PUT /jobs/{job_id}/conclude
///
/// Optional body `{ "Result": ... }` is stored on the job.
pub async fn conclude(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let id = JobId::parse_param(&job_id)?;
    let input: ConcludeRequest = decode_body(&body)?;

    state
        .engine
        .conclude(id, input.result.map(Payload::new))
        .await?;
    Ok(Json(StatusResponse {
        status: "Job concluded successfully",
    }))
}

/// PUT /jobs/{job_id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = JobId::parse_param(&job_id)?;
    state.engine.cancel(id).await?;
    Ok(Json(StatusResponse {
        status: "Job cancelled successfully",
    }))
}

/// PUT /jobs/{job_id}/retry
pub async fn retry(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = JobId::parse_param(&job_id)?;
    state.engine.retry(id).await?;
    Ok(Json(StatusResponse {
        status: "Job enqueued for retry",
    }))
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /jobs/{job_id}
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = JobId::parse_param(&job_id)?;
    let job = state.engine.fetch(id).await?;
    Ok(Json(JobView::from(job)))
}

/// GET /jobs/stats
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.engine.counts().await)
}
