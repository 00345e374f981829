//! Store error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the flat-file store
///
/// A malformed document is fatal: the store never discards existing data to
/// recover from a parse failure.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
