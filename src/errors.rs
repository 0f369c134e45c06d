use std::io;

use thiserror::Error;

use crate::types::SourceId;

/// Error type for session preconditions, source loading, and IO failures.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("row source '{source_id}' is unavailable: {reason}")]
    SourceUnavailable { source_id: SourceId, reason: String },
    #[error("row source '{source_id}' returned inconsistent state: {details}")]
    SourceInconsistent {
        source_id: SourceId,
        details: String,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("sampling session exhausted: {0}")]
    Exhausted(String),
}
