//! Error types for the docsearch-index crate.

use std::io;

use thiserror::Error;

/// Errors that can occur when building or querying the search index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Failed to create the in-memory index or its writer.
    #[error("failed to create index: {0}")]
    Create(String),

    /// Failed to add a document to the index.
    #[error("failed to write to index: {0}")]
    Write(String),

    /// Failed to commit changes to the index.
    #[error("failed to commit index: {0}")]
    Commit(String),

    /// Failed to execute a query or load a matching document.
    #[error("search failed: {0}")]
    Search(String),

    /// I/O error while streaming a term dictionary.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid stemmer language.
    #[error("unsupported stemmer language: {0}")]
    InvalidLanguage(String),
}

impl IndexError {
    /// Creates a `Create` error from a Tantivy error.
    pub(crate) fn create(source: &tantivy::TantivyError) -> Self {
        Self::Create(source.to_string())
    }

    /// Creates a `Write` error from a Tantivy error.
    pub(crate) fn write(source: &tantivy::TantivyError) -> Self {
        Self::Write(source.to_string())
    }

    /// Creates a `Commit` error from a Tantivy error.
    pub(crate) fn commit(source: &tantivy::TantivyError) -> Self {
        Self::Commit(source.to_string())
    }

    /// Creates a `Search` error from a Tantivy error.
    pub(crate) fn search(source: &tantivy::TantivyError) -> Self {
        Self::Search(source.to_string())
    }
}
