//! Error types for option sources

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed source data: {0}")]
    Malformed(String),

    #[error("Unsupported location: {0}")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SourceError>;
