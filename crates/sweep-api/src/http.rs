use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use sweep_model::{AccountRecord, SessionId, SessionUpdate};

use crate::{error::ApiError, handler::ApiHandler, input};

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
}

impl<H> HttpApi<H>
where
    H: ApiHandler,
{
    /// Create new HTTP API with the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - POST /api/v1/batches - Submit a batch
    /// - GET /api/v1/batches/:id - Poll progress
    /// - POST /api/v1/batches/:id/cancel - Cancel a running batch
    /// - GET /api/v1/batches/:id/download - Retrieve final results
    pub fn router(self) -> Router {
        Router::new()
            .route("/api/v1/batches", post(submit_batch::<H>))
            .route("/api/v1/batches/{id}", get(poll_session::<H>))
            .route("/api/v1/batches/{id}/cancel", post(cancel_session::<H>))
            .route("/api/v1/batches/{id}/download", get(download_results::<H>))
            .with_state(self.handler)
    }
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitBatchRequest {
    /// Parsed contents of an uploaded JSON account dump.
    #[serde(default)]
    accounts: Option<Vec<AccountRecord>>,
    /// Newline-separated usernames (textarea input).
    #[serde(default)]
    usernames: Option<String>,
    /// Original upload file name; drives the download name.
    #[serde(default)]
    filename: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitBatchResponse {
    message: String,
    session_id: String,
    count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct CancelResponse {
    message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/batches
///
/// File uploads are parsed by the caller: the body carries the already
/// decoded JSON account array and/or the raw textarea text plus the
/// original file name, never the file itself.
async fn submit_batch<H>(
    State(handler): State<Arc<H>>,
    Json(req): Json<SubmitBatchRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let batch = input::build_batch(req.accounts, req.usernames.as_deref(), req.filename.as_deref())?;

    debug!(count = batch.usernames.len(), "submitting batch");
    let receipt = handler.submit_batch(batch).await?;

    let response = SubmitBatchResponse {
        message: format!("Processing {} usernames", receipt.count),
        session_id: receipt.session_id.to_string(),
        count: receipt.count,
    };

    Ok((axum::http::StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/batches/:id
async fn poll_session<H>(
    State(handler): State<Arc<H>>,
    Path(id): Path<String>,
) -> Result<Json<SessionUpdate>, ApiError>
where
    H: ApiHandler,
{
    let session_id = SessionId::from(id);
    let update = handler.poll_session(&session_id).await?;
    Ok(Json(update))
}

/// POST /api/v1/batches/:id/cancel
async fn cancel_session<H>(
    State(handler): State<Arc<H>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    if id.trim().is_empty() {
        return Err(ApiError::InvalidRequest("session id cannot be empty".into()));
    }

    let session_id = SessionId::from(id);
    handler.cancel_session(&session_id).await?;
    debug!(%session_id, "session cancelled");

    Ok(Json(CancelResponse {
        message: "Processing cancelled".to_string(),
    }))
}

/// GET /api/v1/batches/:id/download
///
/// Serves the deduplicated taken accounts as an attachment and destroys
/// the session; a second download returns 404.
async fn download_results<H>(
    State(handler): State<Arc<H>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let session_id = SessionId::from(id);
    let report = handler.download_results(&session_id).await?;

    let body = serde_json::to_string_pretty(&report.accounts)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let headers = [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", report.filename),
        ),
    ];

    Ok((headers, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_request_accepts_partial_bodies() {
        let req: SubmitBatchRequest =
            serde_json::from_str(r#"{"usernames": "a\nb"}"#).unwrap();
        assert!(req.accounts.is_none());
        assert_eq!(req.usernames.as_deref(), Some("a\nb"));
        assert!(req.filename.is_none());

        let req: SubmitBatchRequest =
            serde_json::from_str(r#"{"accounts": [{"username": "a"}], "filename": "d.json"}"#)
                .unwrap();
        assert_eq!(req.accounts.unwrap().len(), 1);
        assert_eq!(req.filename.as_deref(), Some("d.json"));
    }

    #[test]
    fn submit_response_uses_camel_case() {
        let response = SubmitBatchResponse {
            message: "Processing 2 usernames".to_string(),
            session_id: "s-1".to_string(),
            count: 2,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""sessionId":"s-1""#));
        assert!(json.contains(r#""count":2"#));
    }
}
