//! Batch probing engine: bounded-concurrency fan-out of username probes
//! with per-name retry/backoff and cancellable session aggregation.

pub mod backoff;
pub use backoff::{BackoffPolicy, JitterSource, RandomJitter};

pub mod gate;
pub use gate::{GatePermit, ProbeGate};

pub mod lookup;
pub use lookup::{LookupError, LookupReply, UsernameLookup};

pub mod registry;
pub use registry::SessionRegistry;

mod probe;

pub mod orchestrator;
pub use orchestrator::{BatchConfig, BatchInput, ProbeEngine};

mod error;
pub use error::EngineError;
