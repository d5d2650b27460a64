use std::time::Duration;

use tracing::{debug, warn};

use sweep_model::{OutcomeKind, ProbeOutcome, SessionId, StatusLine};

use crate::{
    backoff::{BackoffPolicy, JitterSource},
    gate::ProbeGate,
    lookup::{LookupReply, UsernameLookup},
    registry::SessionRegistry,
};

/// Run one username's full retry loop to a terminal outcome.
///
/// Cancellation is checked at the top of each attempt, which bounds
/// cancellation latency to one in-flight lookup plus the current sleep.
/// The gate permit covers only the lookup itself, never the sleep.
/// The terminal outcome is appended to the session before returning.
pub(crate) async fn probe_username(
    lookup: &dyn UsernameLookup,
    registry: &SessionRegistry,
    gate: &ProbeGate,
    policy: &BackoffPolicy,
    jitter: &dyn JitterSource,
    max_retries: u32,
    session: &SessionId,
    username: &str,
) -> OutcomeKind {
    let mut delay: Duration = policy.first;
    let mut retries = 0u32;

    while retries < max_retries {
        if !registry.is_active(session) {
            debug!(%session, username, "cancelled before attempt");
            return finish(
                registry,
                session,
                username,
                OutcomeKind::Cancelled,
                format!("[CANCELLED] {username}"),
            );
        }

        let attempt = {
            let _permit = gate.acquire().await;
            lookup.lookup(username).await
        };

        let cause = match attempt {
            Ok(LookupReply::Exists) => {
                return finish(
                    registry,
                    session,
                    username,
                    OutcomeKind::Taken,
                    format!("[TAKEN] {username}"),
                );
            }
            Ok(LookupReply::NotFound) | Ok(LookupReply::Empty) => {
                return finish(
                    registry,
                    session,
                    username,
                    OutcomeKind::Available,
                    format!("[AVAILABLE] {username}"),
                );
            }
            Ok(LookupReply::Status(code)) => format!("status: {code}"),
            Err(err) => err.to_string(),
        };

        delay = policy.next_delay(delay, jitter.sample());
        retries += 1;

        let message = format!(
            "[RETRY {retries}/{max_retries}] {username} - {cause}, waiting {:.2}s",
            delay.as_secs_f64()
        );
        debug!(username, retries, "transient failure: {cause}");
        registry.append_status(session, StatusLine::new(username, message));

        tokio::time::sleep(delay).await;
    }

    warn!(username, max_retries, "retry budget exhausted");
    finish(
        registry,
        session,
        username,
        OutcomeKind::Error,
        format!("[ERROR] {username} - max retries exceeded"),
    )
}

fn finish(
    registry: &SessionRegistry,
    session: &SessionId,
    username: &str,
    kind: OutcomeKind,
    message: String,
) -> OutcomeKind {
    registry.append_result(session, ProbeOutcome::new(username, kind, message));
    kind
}
