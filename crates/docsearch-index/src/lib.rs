//! Tantivy-based in-memory search index for docsearch.
//!
//! This crate indexes a [`Corpus`](docsearch_corpus::Corpus) once per session and answers
//! queries in up to three stages (exact, prefix wildcard, fuzzy). It handles:
//! - Text analysis with a whitespace/slash tokenizer and configurable stemming
//! - In-RAM index construction with per-field boosts
//! - Staged query execution with term-dictionary expansion
//! - Match span recovery for highlighting
//!
//! # Example
//!
//! ```no_run
//! use docsearch_corpus::Corpus;
//! use docsearch_index::{IndexOptions, SearchIndex};
//!
//! let corpus = Corpus::embedded().unwrap();
//! let index = SearchIndex::build(&corpus, &IndexOptions::default()).unwrap();
//! if let Some(outcome) = index.search("hardware setup").unwrap() {
//!     println!("{} hits from the {} stage", outcome.hits.len(), outcome.stage);
//! }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod error;
mod index;
mod options;
mod schema;
mod search;
mod tokenizer;

pub use analyzer::{
    DOC_TOKENIZER, build_analyzer, build_analyzer_from_name, build_query_analyzer, parse_language,
};
pub use error::IndexError;
pub use index::SearchIndex;
pub use options::{DEFAULT_MAX_FUZZY_TOKEN_LEN, FieldBoosts, IndexOptions};
pub use schema::{IndexSchema, boost};
pub use search::{MatchData, SearchHit, SearchOutcome, SearchStage, Span, fuzzy_edit_distance};
pub use tokenizer::{SeparatorTokenStream, SeparatorTokenizer};
