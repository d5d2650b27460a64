use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use sweep_model::{
    AccountRecord, BatchStats, FinalReport, ProbeOutcome, SessionId, SessionUpdate, StatusLine,
};

use crate::error::EngineError;

/// Process-wide session state storage.
///
/// One mutable aggregation record per in-flight or just-completed batch,
/// keyed by session id. Cloning shares the underlying map; all mutation
/// happens under a single lock, which is also what serializes the many
/// probe workers of a batch against the polling caller.
#[derive(Clone)]
pub struct SessionRegistry {
    inner: Arc<RwLock<HashMap<SessionId, SessionRecord>>>,
}

struct SessionRecord {
    /// False once cancellation was requested or the batch finished.
    active: bool,
    /// Set exactly once, by `finalize`.
    completed: bool,
    /// Terminal outcomes not yet delivered to a poller.
    results: Vec<ProbeOutcome>,
    /// Progress lines not yet delivered to a poller.
    status_log: Vec<StatusLine>,
    stats: BatchStats,
    accounts: Vec<AccountRecord>,
    filename: String,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a fresh record for a batch of `total` usernames.
    pub fn create(&self, id: &SessionId, total: usize, filename: &str) {
        let mut inner = self.inner.write().unwrap();

        inner.insert(
            id.clone(),
            SessionRecord {
                active: true,
                completed: false,
                results: Vec::new(),
                status_log: Vec::new(),
                stats: BatchStats::for_batch(total),
                accounts: Vec::new(),
                filename: filename.to_string(),
            },
        );
    }

    /// Whether the session exists and has not been cancelled.
    ///
    /// Absence counts as cancelled: workers of a removed session must
    /// wind down, not resurrect it.
    pub fn is_active(&self, id: &SessionId) -> bool {
        let inner = self.inner.read().unwrap();
        inner.get(id).map(|rec| rec.active).unwrap_or(false)
    }

    /// Append a terminal outcome; no-op if the session is gone.
    pub fn append_result(&self, id: &SessionId, outcome: ProbeOutcome) {
        let mut inner = self.inner.write().unwrap();

        if let Some(rec) = inner.get_mut(id) {
            rec.results.push(outcome);
        }
    }

    /// Append a progress line; no-op if the session is gone.
    pub fn append_status(&self, id: &SessionId, line: StatusLine) {
        let mut inner = self.inner.write().unwrap();

        if let Some(rec) = inner.get_mut(id) {
            rec.status_log.push(line);
        }
    }

    /// Atomically read and clear the pending logs.
    ///
    /// Each appended item is delivered to exactly one caller.
    pub fn drain_updates(&self, id: &SessionId) -> Result<SessionUpdate, EngineError> {
        let mut inner = self.inner.write().unwrap();

        let rec = inner
            .get_mut(id)
            .ok_or_else(|| EngineError::SessionNotFound(id.clone()))?;

        Ok(SessionUpdate {
            completed: rec.completed,
            status_lines: std::mem::take(&mut rec.status_log),
            outcomes: std::mem::take(&mut rec.results),
            stats: rec.stats,
        })
    }

    /// Store the final accounts and stats and mark the session complete.
    ///
    /// Called exactly once per batch, after every worker has reported.
    /// Also clears the active flag, which is idempotent with an earlier
    /// explicit cancel.
    pub fn finalize(&self, id: &SessionId, accounts: Vec<AccountRecord>, stats: BatchStats) {
        let mut inner = self.inner.write().unwrap();

        if let Some(rec) = inner.get_mut(id) {
            rec.completed = true;
            rec.active = false;
            rec.accounts = accounts;
            rec.stats = stats;
        }
    }

    /// Request cancellation of a running batch.
    ///
    /// Workers observe the cleared flag at their next attempt boundary.
    /// The record stays pollable until the final download removes it.
    /// A completed session is no longer cancellable and reads as not
    /// found, matching the submit-side active set.
    pub fn cancel(&self, id: &SessionId) -> Result<(), EngineError> {
        let mut inner = self.inner.write().unwrap();

        let rec = inner
            .get_mut(id)
            .ok_or_else(|| EngineError::SessionNotFound(id.clone()))?;
        if rec.completed {
            return Err(EngineError::SessionNotFound(id.clone()));
        }
        rec.active = false;
        Ok(())
    }

    /// Remove a completed session and hand back its final report.
    ///
    /// Fails with `SessionNotCompleted` while workers may still reference
    /// the record; a second call fails with `SessionNotFound`.
    pub fn take_final(&self, id: &SessionId) -> Result<FinalReport, EngineError> {
        let mut inner = self.inner.write().unwrap();

        let completed = inner
            .get(id)
            .map(|rec| rec.completed)
            .ok_or_else(|| EngineError::SessionNotFound(id.clone()))?;
        if !completed {
            return Err(EngineError::SessionNotCompleted(id.clone()));
        }

        let rec = inner.remove(id).expect("record checked above");
        Ok(FinalReport {
            filename: rec.filename,
            accounts: rec.accounts,
        })
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
