use serde::{Deserialize, Serialize};

use crate::{AccountRecord, BatchStats, ProbeOutcome, StatusLine};

/// Incremental progress snapshot returned by one poll.
///
/// `status_lines` and `outcomes` are drained from the session's pending
/// logs: each item is delivered to exactly one poll and never repeated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdate {
    /// True once every worker of the batch has reported.
    pub completed: bool,
    /// Progress lines appended since the previous poll.
    pub status_lines: Vec<StatusLine>,
    /// Terminal outcomes appended since the previous poll.
    pub outcomes: Vec<ProbeOutcome>,
    /// Current tallies (authoritative once `completed` is true).
    pub stats: BatchStats,
}

/// Final download payload for a completed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReport {
    /// Suggested download file name (`final_<stem>.json`).
    pub filename: String,
    /// Full records for taken usernames, deduplicated, in input order.
    pub accounts: Vec<AccountRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutcomeKind;

    #[test]
    fn update_serde_roundtrip() {
        let update = SessionUpdate {
            completed: false,
            status_lines: vec![StatusLine::new("a", "[RETRY 1/10] a")],
            outcomes: vec![ProbeOutcome::new("b", OutcomeKind::Available, "[AVAILABLE] b")],
            stats: BatchStats::for_batch(2),
        };

        let json = serde_json::to_string(&update).unwrap();
        let back: SessionUpdate = serde_json::from_str(&json).unwrap();

        assert!(!back.completed);
        assert_eq!(back.status_lines.len(), 1);
        assert_eq!(back.outcomes.len(), 1);
        assert_eq!(back.stats.total_count, 2);
    }

    #[test]
    fn report_carries_opaque_records() {
        let report = FinalReport {
            filename: "final_dump.json".to_string(),
            accounts: vec![serde_json::json!({"username": "a", "followers": 12})],
        };

        let json = serde_json::to_string(&report).unwrap();
        let back: FinalReport = serde_json::from_str(&json).unwrap();

        assert_eq!(back.filename, report.filename);
        assert_eq!(back.accounts[0]["followers"], 12);
    }
}
