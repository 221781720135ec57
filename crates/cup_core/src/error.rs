use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors from the flat-file stores. Missing optional inputs are not
/// errors (callers get `None`); everything here is fatal to the run.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {}", path.display(), source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {}", path.display(), source)]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {}", path.display(), source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {}: {}", path.display(), source)]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
