//! Error types for the docsearch-render crate.

use docsearch_index::IndexError;
use thiserror::Error;

/// Errors raised while driving a search session.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The query could not be executed.
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Errors raised when reading or selecting a theme.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    /// The name is not one of the site's theme variants.
    #[error("unknown theme '{0}' (expected default, light or dark)")]
    Unknown(String),
}
