//! HTTP surface for the probing engine: a handler trait, the axum
//! router over it, input parsing and the API error type.

mod error;
pub use error::ApiError;

mod handler;
pub use handler::{ApiHandler, SubmitReceipt};

mod adapter;
pub use adapter::EngineHandler;

pub mod input;

mod http;
pub use http::HttpApi;
