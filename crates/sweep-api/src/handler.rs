use async_trait::async_trait;

use sweep_engine::BatchInput;
use sweep_model::{FinalReport, SessionId, SessionUpdate};

use crate::error::ApiError;

/// Receipt returned for an accepted batch.
#[derive(Debug, Clone)]
pub struct SubmitReceipt {
    pub session_id: SessionId,
    pub count: usize,
}

/// Batch probing API handler.
///
/// Abstracts the backend so the router can sit on the bundled
/// `EngineHandler` or on a custom implementation (auth, quotas, ...).
#[async_trait]
pub trait ApiHandler: Send + Sync + 'static {
    /// Accept a batch and begin asynchronous execution.
    async fn submit_batch(&self, input: BatchInput) -> Result<SubmitReceipt, ApiError>;

    /// Drain pending progress for a session.
    async fn poll_session(&self, id: &SessionId) -> Result<SessionUpdate, ApiError>;

    /// Request cancellation of a running session.
    async fn cancel_session(&self, id: &SessionId) -> Result<(), ApiError>;

    /// Retrieve the final report and destroy the session.
    async fn download_results(&self, id: &SessionId) -> Result<FinalReport, ApiError>;
}
