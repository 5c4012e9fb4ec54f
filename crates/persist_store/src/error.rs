use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while flushing or loading a preference backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access preference file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preference file {} is malformed: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
