use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("logger already initialized")]
    AlreadyInitialized,

    #[error("logger initialization failed: {0}")]
    InitializationFailed(String),
}
