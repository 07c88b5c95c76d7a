//! Error types for loadorder-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] loadorder_core::Error),

    #[error("Invalid descriptor set: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Descriptor set not found at {path}")]
    NotFound { path: PathBuf },

    #[error("Descriptor set too large: {path} is {size} bytes (max {max})")]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid descriptor {id}: {reason}")]
    InvalidDescriptor { id: String, reason: String },
}
