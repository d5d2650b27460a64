use serde::{Deserialize, Serialize};

use crate::Username;

/// Terminal classification of one probed username.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeKind {
    /// The remote service holds a real record for the name.
    Taken,
    /// No record exists; the name is free.
    Available,
    /// The per-name retry budget was exhausted against transient failures.
    Error,
    /// The batch was cancelled before this name's probe concluded.
    Cancelled,
}

impl OutcomeKind {
    /// Returns `true` if the name was classified as taken.
    pub fn is_taken(&self) -> bool {
        matches!(self, OutcomeKind::Taken)
    }

    /// Returns `true` if the probe reached a real classification
    /// (as opposed to being cut short by errors or cancellation).
    pub fn is_classified(&self) -> bool {
        matches!(self, OutcomeKind::Taken | OutcomeKind::Available)
    }
}

/// One username's terminal probe result.
///
/// Immutable once produced; appended exactly once to the session's
/// result log by the worker (or by the orchestrator on worker failure).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeOutcome {
    /// The probed name.
    pub username: Username,
    /// Terminal classification.
    pub kind: OutcomeKind,
    /// Human-readable result line.
    pub message: String,
}

impl ProbeOutcome {
    /// Build an outcome with the conventional `[KIND] username` message.
    pub fn new(username: impl Into<Username>, kind: OutcomeKind, message: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_helpers() {
        assert!(OutcomeKind::Taken.is_taken());
        assert!(!OutcomeKind::Available.is_taken());

        assert!(OutcomeKind::Taken.is_classified());
        assert!(OutcomeKind::Available.is_classified());
        assert!(!OutcomeKind::Error.is_classified());
        assert!(!OutcomeKind::Cancelled.is_classified());
    }

    #[test]
    fn kind_serializes_camel_case() {
        let json = serde_json::to_string(&OutcomeKind::Available).unwrap();
        assert_eq!(json, r#""available""#);

        let back: OutcomeKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OutcomeKind::Available);
    }

    #[test]
    fn outcome_serde_roundtrip() {
        let outcome = ProbeOutcome::new("alice", OutcomeKind::Taken, "[TAKEN] alice");
        let json = serde_json::to_string(&outcome).unwrap();
        let back: ProbeOutcome = serde_json::from_str(&json).unwrap();

        assert_eq!(back.username, outcome.username);
        assert_eq!(back.kind, outcome.kind);
        assert_eq!(back.message, outcome.message);
    }
}
