//! Error types for corpus loading.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when loading a search corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Failed to read a corpus file.
    #[error("failed to read corpus file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The corpus is not a map of id to record objects.
    #[error("failed to parse corpus {origin}: {source}")]
    ParseJson {
        /// Where the corpus came from (a path or `<embedded>`).
        origin: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}
