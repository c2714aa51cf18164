//! Input spec for a new job.
//!
//! Payloads are opaque: the queue stores and returns them but never looks
//! inside.

use serde::{Deserialize, Serialize};

use super::kind::JobKind;
use crate::error::QueueError;

/// Caller-supplied data carried by a job (payload or result).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(serde_json::Value);

impl Payload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// A validated enqueue request.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSpec {
    pub kind: JobKind,
    pub payload: Option<Payload>,
}

impl JobSpec {
    pub fn new(kind: JobKind) -> Self {
        Self {
            kind,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: impl Into<Payload>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Validate raw enqueue fields.
    ///
    /// Both `kind` and `status` must be present and non-empty. The status value
    /// itself is ignored: every new job starts QUEUED.
    pub fn parse(
        kind: Option<&str>,
        status: Option<&str>,
        payload: Option<Payload>,
    ) -> Result<Self, QueueError> {
        let (Some(kind), Some(_status)) = (
            kind.filter(|k| !k.is_empty()),
            status.filter(|s| !s.is_empty()),
        ) else {
            return Err(QueueError::InvalidInput("missing required fields".into()));
        };

        let kind = kind
            .parse::<JobKind>()
            .map_err(|e| QueueError::InvalidInput(e.to_string()))?;

        Ok(Self { kind, payload })
    }
}
