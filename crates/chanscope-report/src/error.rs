use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize JSON export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid report basename {0:?}: must be a plain file name")]
    InvalidBasename(String),
}
