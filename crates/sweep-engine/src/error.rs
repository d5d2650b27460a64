use thiserror::Error;

use sweep_model::SessionId;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("session not completed: {0}")]
    SessionNotCompleted(SessionId),
}
