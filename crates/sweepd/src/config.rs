use std::env;

use anyhow::Context;

use sweep_client::ClientConfig;
use sweep_observe::LoggerConfig;

/// Daemon configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Listen address (`SWEEPD_ADDR`).
    pub bind_addr: String,
    /// Remote lookup endpoint (`SWEEPD_ENDPOINT`).
    pub endpoint: String,
    /// Logger settings (`SWEEPD_LOG`, `SWEEPD_LOG_FORMAT`).
    pub logger: LoggerConfig,
}

impl DaemonConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mut logger = LoggerConfig::default();
        if let Ok(level) = env::var("SWEEPD_LOG") {
            logger.level = level;
        }
        if let Ok(format) = env::var("SWEEPD_LOG_FORMAT") {
            logger.format = format
                .parse()
                .map_err(anyhow::Error::msg)
                .context("SWEEPD_LOG_FORMAT")?;
        }

        Ok(Self {
            bind_addr: env::var("SWEEPD_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            endpoint: env::var("SWEEPD_ENDPOINT")
                .unwrap_or_else(|_| ClientConfig::default().endpoint),
            logger,
        })
    }
}
