use async_trait::async_trait;
use tracing::debug;

use sweep_engine::{BatchInput, ProbeEngine};
use sweep_model::{FinalReport, SessionId, SessionUpdate};

use crate::{
    error::ApiError,
    handler::{ApiHandler, SubmitReceipt},
};

/// Default `ApiHandler` over a `ProbeEngine`.
#[derive(Clone)]
pub struct EngineHandler {
    engine: ProbeEngine,
}

impl EngineHandler {
    pub fn new(engine: ProbeEngine) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl ApiHandler for EngineHandler {
    async fn submit_batch(&self, input: BatchInput) -> Result<SubmitReceipt, ApiError> {
        let count = input.usernames.len();
        let session_id = self.engine.submit(input);
        Ok(SubmitReceipt { session_id, count })
    }

    async fn poll_session(&self, id: &SessionId) -> Result<SessionUpdate, ApiError> {
        Ok(self.engine.registry().drain_updates(id)?)
    }

    async fn cancel_session(&self, id: &SessionId) -> Result<(), ApiError> {
        debug!(%id, "cancel requested");
        Ok(self.engine.registry().cancel(id)?)
    }

    async fn download_results(&self, id: &SessionId) -> Result<FinalReport, ApiError> {
        Ok(self.engine.registry().take_final(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashMap, sync::Arc, time::Duration};

    use sweep_engine::{
        BatchConfig, LookupError, LookupReply, SessionRegistry, UsernameLookup,
    };

    struct AlwaysFree;

    #[async_trait]
    impl UsernameLookup for AlwaysFree {
        async fn lookup(&self, _username: &str) -> Result<LookupReply, LookupError> {
            Ok(LookupReply::NotFound)
        }
    }

    fn handler() -> EngineHandler {
        let engine = ProbeEngine::new(
            Arc::new(AlwaysFree),
            SessionRegistry::new(),
            BatchConfig::default(),
        );
        EngineHandler::new(engine)
    }

    fn batch(names: &[&str]) -> BatchInput {
        BatchInput {
            usernames: names.iter().map(|n| n.to_string()).collect(),
            accounts: HashMap::new(),
            filename: "final_test.json".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn submit_poll_download_lifecycle() {
        let handler = handler();

        let receipt = handler.submit_batch(batch(&["a", "b"])).await.unwrap();
        assert_eq!(receipt.count, 2);

        let completed = loop {
            let update = handler.poll_session(&receipt.session_id).await.unwrap();
            if update.completed {
                break update;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        };
        assert_eq!(completed.stats.available_count, 2);

        let report = handler.download_results(&receipt.session_id).await.unwrap();
        assert_eq!(report.filename, "final_test.json");

        // The session is gone after the download.
        let err = handler.poll_session(&receipt.session_id).await.unwrap_err();
        assert!(matches!(err, ApiError::Engine(_)));
    }

    #[tokio::test]
    async fn cancel_unknown_session_is_not_found() {
        let handler = handler();
        let err = handler
            .cancel_session(&SessionId::from("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Engine(_)));
    }
}
