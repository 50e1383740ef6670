use crate::allocator::ProcessId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid request from process {process_id}: size {size} must be positive")]
    InvalidRequest { process_id: ProcessId, size: u64 },

    #[error("Total block size {total} KB exceeds the main memory size of {ceiling} KB")]
    MemoryCeilingExceeded { total: u64, ceiling: u64 },

    #[error("Size overflow: {0}")]
    Overflow(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
