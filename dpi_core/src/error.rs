use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LevelError {
    #[error("unsupported command: {0}")]
    InvalidCommand(String),
    #[error("sensor {0} not ready")]
    DeviceNotReady(String),
    #[error("failed to set CPI {cpi}: {cause}")]
    AdapterWriteFailed { cpi: u32, cause: String },
    #[error("configuration error: {0}")]
    ConfigurationInvalid(String),
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing sensor")]
    MissingSensor,
    #[error("missing step table")]
    MissingSteps,
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
