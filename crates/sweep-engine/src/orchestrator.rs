use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use tracing::{debug, info, warn};
use uuid::Uuid;

use sweep_model::{AccountRecord, BatchStats, OutcomeKind, ProbeOutcome, SessionId, Username};

use crate::{
    backoff::{BackoffPolicy, JitterSource, RandomJitter},
    gate::ProbeGate,
    lookup::UsernameLookup,
    probe::probe_username,
    registry::SessionRegistry,
};

/// Tunables for one batch run.
#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    /// Retry budget per username.
    pub max_retries: u32,
    /// Simultaneous in-flight lookups per batch.
    pub concurrent_limit: usize,
    /// Retry delay policy.
    pub backoff: BackoffPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_retries: 10,
            concurrent_limit: 5,
            backoff: BackoffPolicy::default(),
        }
    }
}

/// One submitted batch: the names to probe plus their opaque records.
///
/// Duplicates are allowed in `usernames`; they are resolved at
/// aggregation time, not at input.
#[derive(Debug, Clone)]
pub struct BatchInput {
    pub usernames: Vec<Username>,
    pub accounts: HashMap<Username, AccountRecord>,
    pub filename: String,
}

/// Fan-out/fan-in scheduler over the session registry.
///
/// Cheap to clone; all handles share the lookup client, the registry and
/// the jitter source.
#[derive(Clone)]
pub struct ProbeEngine {
    lookup: Arc<dyn UsernameLookup>,
    registry: SessionRegistry,
    jitter: Arc<dyn JitterSource>,
    config: BatchConfig,
}

impl ProbeEngine {
    pub fn new(lookup: Arc<dyn UsernameLookup>, registry: SessionRegistry, config: BatchConfig) -> Self {
        Self {
            lookup,
            registry,
            jitter: Arc::new(RandomJitter),
            config,
        }
    }

    /// Replace the jitter source (tests inject fixed draws).
    pub fn with_jitter(mut self, jitter: Arc<dyn JitterSource>) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Register a session and start the batch in the background.
    ///
    /// Returns as soon as the session exists; callers poll the registry
    /// for progress and completion.
    pub fn submit(&self, input: BatchInput) -> SessionId {
        let id = SessionId::from(Uuid::new_v4().to_string());
        self.registry.create(&id, input.usernames.len(), &input.filename);
        info!(%id, count = input.usernames.len(), "batch submitted");

        let engine = self.clone();
        let session = id.clone();
        tokio::spawn(async move {
            engine.run_batch(session, input).await;
        });

        id
    }

    /// Drive one batch to completion.
    ///
    /// Spawns one worker per username behind a batch-scoped gate, awaits
    /// them in input order, aggregates, and finalizes the session. A
    /// panicked worker is recorded as an `Error` outcome and never blocks
    /// finalization.
    pub(crate) async fn run_batch(&self, id: SessionId, input: BatchInput) {
        let gate = ProbeGate::new(self.config.concurrent_limit);

        let mut handles = Vec::with_capacity(input.usernames.len());
        for username in &input.usernames {
            let lookup = Arc::clone(&self.lookup);
            let registry = self.registry.clone();
            let jitter = Arc::clone(&self.jitter);
            let gate = gate.clone();
            let config = self.config;
            let session = id.clone();
            let name = username.clone();

            let handle = tokio::spawn(async move {
                probe_username(
                    lookup.as_ref(),
                    &registry,
                    &gate,
                    &config.backoff,
                    jitter.as_ref(),
                    config.max_retries,
                    &session,
                    &name,
                )
                .await
            });
            handles.push((username.clone(), handle));
        }

        let mut outcomes: Vec<(Username, OutcomeKind)> = Vec::with_capacity(handles.len());
        for (username, handle) in handles {
            let kind = match handle.await {
                Ok(kind) => kind,
                Err(err) => {
                    warn!(%username, error = %err, "probe worker failed");
                    self.registry.append_result(
                        &id,
                        ProbeOutcome::new(
                            username.as_str(),
                            OutcomeKind::Error,
                            format!("[ERROR] {username} - worker failed"),
                        ),
                    );
                    OutcomeKind::Error
                }
            };
            outcomes.push((username, kind));
        }

        let (accounts, stats) = aggregate(&outcomes, &input.accounts);
        debug!(
            %id,
            taken = stats.taken_count,
            available = stats.available_count,
            errors = stats.error_count,
            cancelled = stats.cancelled_count,
            "batch finished"
        );
        self.registry.finalize(&id, accounts, stats);
    }
}

/// Partition outcomes into stats and the deduplicated taken accounts.
///
/// First occurrence wins when the same username appears twice.
fn aggregate(
    outcomes: &[(Username, OutcomeKind)],
    records: &HashMap<Username, AccountRecord>,
) -> (Vec<AccountRecord>, BatchStats) {
    let mut stats = BatchStats::for_batch(outcomes.len());
    let mut accounts = Vec::new();
    let mut saved: HashSet<&str> = HashSet::new();

    for (username, kind) in outcomes {
        stats.record(*kind);
        if kind.is_taken() && saved.insert(username.as_str()) {
            let record = records
                .get(username)
                .cloned()
                .unwrap_or_else(|| serde_json::json!({ "username": username }));
            accounts.push(record);
        }
    }

    (accounts, stats)
}
