use serde::{Deserialize, Serialize};

use crate::OutcomeKind;

/// Per-batch outcome tallies.
///
/// `total_count` is fixed at submission time and always equals the input
/// batch size; the per-kind counters are authoritative only once the
/// session has completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    pub taken_count: usize,
    pub available_count: usize,
    pub error_count: usize,
    pub cancelled_count: usize,
    pub total_count: usize,
}

impl BatchStats {
    /// Zeroed counters for a batch of `total` usernames.
    pub fn for_batch(total: usize) -> Self {
        Self {
            total_count: total,
            ..Self::default()
        }
    }

    /// Increment the counter for one terminal outcome.
    pub fn record(&mut self, kind: OutcomeKind) {
        match kind {
            OutcomeKind::Taken => self.taken_count += 1,
            OutcomeKind::Available => self.available_count += 1,
            OutcomeKind::Error => self.error_count += 1,
            OutcomeKind::Cancelled => self.cancelled_count += 1,
        }
    }

    /// Sum of the per-kind counters.
    ///
    /// Equals `total_count` once every worker has reported.
    pub fn accounted(&self) -> usize {
        self.taken_count + self.available_count + self.error_count + self.cancelled_count
    }
}
