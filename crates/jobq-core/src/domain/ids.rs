//! Domain identifiers (strongly-typed IDs).
//!
//! `Id<T>` wraps a plain integer and carries a zero-sized marker type, so a
//! `JobId` and a `ConsumerId` can never be mixed up even though both are
//! integers on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use crate::error::QueueError;

/// Marker trait for each ID flavour.
///
/// Provides the prefix used by `Display` ("job-", "consumer-").
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// Generic integer ID.
///
/// Serializes as the bare integer.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    value: u64,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub const fn new(value: u64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn get(self) -> u64 {
        self.value
    }
}

impl<T: IdMarker> From<u64> for Id<T> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.value)
    }
}

/// The input was not a non-negative decimal integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid id {input:?}: expected a non-negative integer")]
pub struct ParseIdError {
    pub input: String,
}

impl<T: IdMarker> FromStr for Id<T> {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self::new)
            .map_err(|_| ParseIdError {
                input: s.to_string(),
            })
    }
}

// ========================================
// Marker types
// ========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Job {}

impl IdMarker for Job {
    fn prefix() -> &'static str {
        "job-"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Consumer {}

impl IdMarker for Consumer {
    fn prefix() -> &'static str {
        "consumer-"
    }
}

/// Identifier of a job, assigned by the engine on enqueue.
pub type JobId = Id<Job>;

/// Identifier of an external worker pulling jobs.
pub type ConsumerId = Id<Consumer>;

impl Id<Job> {
    /// Parse a job id taken from a request path.
    pub fn parse_param(raw: &str) -> Result<Self, QueueError> {
        raw.parse()
            .map_err(|e: ParseIdError| QueueError::InvalidInput(e.to_string()))
    }
}

impl Id<Consumer> {
    /// Parse the consumer id a worker sends with Dequeue. Absent counts as malformed.
    pub fn parse_header(raw: Option<&str>) -> Result<Self, QueueError> {
        let raw = raw.unwrap_or_default();
        raw.parse()
            .map_err(|_| QueueError::InvalidConsumer(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn display_uses_prefix() {
        assert_eq!(JobId::new(7).to_string(), "job-7");
        assert_eq!(ConsumerId::new(3).to_string(), "consumer-3");
    }

    #[test]
    fn serializes_as_bare_integer() {
        let id = JobId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let back: JobId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 17 ", 17)]
    #[case("0", 0)]
    fn parses_valid_ids(#[case] input: &str, #[case] expected: u64) {
        let id: ConsumerId = input.parse().unwrap();
        assert_eq!(id.get(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("ID3")]
    #[case("-1")]
    #[case("1.5")]
    fn rejects_malformed_ids(#[case] input: &str) {
        let err = input.parse::<JobId>().unwrap_err();
        assert_eq!(err.input, input);
    }

    #[test]
    fn consumer_header_errors_are_invalid_consumer() {
        assert_eq!(
            ConsumerId::parse_header(None).unwrap_err(),
            QueueError::InvalidConsumer(String::new())
        );
        assert_eq!(
            ConsumerId::parse_header(Some("abc")).unwrap_err(),
            QueueError::InvalidConsumer("abc".into())
        );
        assert_eq!(ConsumerId::parse_header(Some("7")).unwrap(), ConsumerId::new(7));
    }

    #[test]
    fn job_param_errors_are_invalid_input() {
        let err = JobId::parse_param("ID3").unwrap_err();
        assert!(matches!(err, QueueError::InvalidInput(msg) if msg.contains("ID3")));
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        use std::mem::size_of;
        assert_eq!(size_of::<JobId>(), size_of::<u64>());
        assert_eq!(size_of::<ConsumerId>(), size_of::<u64>());
    }
}
