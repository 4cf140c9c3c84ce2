//! Error types for the castdir ecosystem.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in castdir operations.
#[derive(Error, Debug)]
pub enum CastdirError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No studio found at {0} (run `castdir init` first)")]
    StudioNotFound(PathBuf),

    #[error("Content not found: {0}")]
    ContentNotFound(String),

    #[error("Title idea not found: {0}")]
    TitleNotFound(String),

    #[error("No calendar slot on {0}")]
    SlotNotFound(chrono::NaiveDate),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for castdir operations.
pub type CastdirResult<T> = Result<T, CastdirError>;
