//! Shared domain types for the namesweep probing pipeline.
//!
//! Everything that crosses a crate boundary (engine, client, API) lives
//! here: identifiers, probe outcomes, per-batch statistics and the
//! polling/download payloads.

mod session_id;
pub use session_id::SessionId;

mod outcome;
pub use outcome::{OutcomeKind, ProbeOutcome};

mod status_line;
pub use status_line::StatusLine;

mod stats;
pub use stats::BatchStats;

mod update;
pub use update::{FinalReport, SessionUpdate};

/// Candidate name probed against the remote lookup service.
pub type Username = String;

/// Opaque record attached to a username at submission time.
///
/// Carried through the pipeline untouched and returned verbatim in the
/// final report for usernames classified as taken.
pub type AccountRecord = serde_json::Value;
