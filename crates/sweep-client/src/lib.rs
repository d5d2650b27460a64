//! Reqwest-backed lookup client for the remote web-profile endpoint.

mod config;
pub use config::ClientConfig;

mod error;
pub use error::ClientError;

mod profile;
pub use profile::WebProfileClient;
