//! Error types for wsform-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Source error: {0}")]
    Source(#[from] wsform_sources::SourceError),

    #[error("Initialization task failed: {0}")]
    TaskFailed(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
