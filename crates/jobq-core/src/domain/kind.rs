//! Job kind: the caller-declared urgency class of a job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Urgency class of a job. Fixed at enqueue time.
///
/// No scheduling decision depends on it; it is recorded and reported back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobKind {
    TimeCritical,
    NotTimeCritical,
}

impl JobKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JobKind::TimeCritical => "TIME_CRITICAL",
            JobKind::NotTimeCritical => "NOT_TIME_CRITICAL",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid Type value {0:?}")]
pub struct UnknownKind(pub String);

impl FromStr for JobKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TIME_CRITICAL" => Ok(JobKind::TimeCritical),
            "NOT_TIME_CRITICAL" => Ok(JobKind::NotTimeCritical),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::time_critical("TIME_CRITICAL", JobKind::TimeCritical)]
    #[case::not_time_critical("NOT_TIME_CRITICAL", JobKind::NotTimeCritical)]
    fn parses_wire_names(#[case] input: &str, #[case] expected: JobKind) {
        assert_eq!(input.parse::<JobKind>().unwrap(), expected);
        assert_eq!(expected.to_string(), input);
    }

    #[rstest]
    #[case("time_critical")]
    #[case("URGENT")]
    #[case("")]
    fn rejects_unknown_names(#[case] input: &str) {
        assert!(input.parse::<JobKind>().is_err());
    }

    #[test]
    fn serde_matches_display() {
        let json = serde_json::to_string(&JobKind::NotTimeCritical).unwrap();
        assert_eq!(json, "\"NOT_TIME_CRITICAL\"");
    }
}
