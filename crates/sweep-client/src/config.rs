/// Remote endpoint configuration.
///
/// The headers and the lookup path are a fixed protocol detail; only the
/// base endpoint is configurable (tests point it at a local stub).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the lookup service.
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://i.instagram.com".to_string(),
        }
    }
}
