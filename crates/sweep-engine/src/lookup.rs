use async_trait::async_trait;
use thiserror::Error;

/// Classified reply from the remote lookup endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupReply {
    /// The service reports no such username.
    NotFound,
    /// Success payload carrying a real record.
    Exists,
    /// Success payload without a record.
    Empty,
    /// Any other status code; treated as transient by the worker.
    Status(u16),
}

/// Failure of a single lookup attempt.
///
/// Both variants are transient from the worker's point of view and feed
/// the retry loop rather than surfacing as faults.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

/// Remote lookup-by-username seam.
///
/// The engine only depends on this trait; the production implementation
/// lives in `sweep-client`, tests plug in scripted mocks.
#[async_trait]
pub trait UsernameLookup: Send + Sync + 'static {
    /// One lookup attempt for `username`.
    async fn lookup(&self, username: &str) -> Result<LookupReply, LookupError>;
}
