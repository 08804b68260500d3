use thiserror::Error;

#[derive(Debug, Error)]
pub enum HwError {
    #[error("sensor not ready")]
    NotReady,
    #[error("sensor rejected value {value} for attribute {attribute}")]
    Rejected { attribute: u32, value: u32 },
    #[error("cpi {0} outside supported range")]
    OutOfRange(u32),
    #[error("spi error: {0}")]
    Spi(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HwError>;
