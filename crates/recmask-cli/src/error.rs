use std::path::PathBuf;
use thiserror::Error;

/// Fatal batch errors. Malformed payloads are not errors: they are repaired
/// or wrapped per row.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("input CSV must have columns: record_id, data_json (or data); found: {}", found.join(", "))]
    MissingColumns { found: Vec<String> },

    #[error("cannot open input {}: {source}", path.display())]
    OpenInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot create output {}: {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode redacted record {record_id}: {source}")]
    Encode {
        record_id: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BatchError>;
