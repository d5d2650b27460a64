//! Tracing subscriber setup shared by the daemon and tooling.

mod logger;
pub use logger::*;
