use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing persisted orders. These never leave the
/// store: callers see an empty history or an unsaved append instead.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Could not read order history at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Order history at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not serialize order history: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Could not write order history to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
