//! Search corpus loading for docsearch.
//!
//! The corpus is the fixed set of searchable records generated alongside the documentation
//! site: a JSON object mapping string ids (`"0"`, `"1"`, ...) to
//! `{doc, title, content, url, relUrl}`. The site's own corpus is compiled into this crate
//! and available through [`Corpus::embedded`].
//!
//! Record URLs are absolute at generation time; [`Corpus::with_rewritten_urls`] rewrites them
//! relative to the page that hosts the search box.

#![warn(missing_docs)]

mod error;
mod url;

use std::{cmp::Ordering, collections::HashMap, fs, path::Path};

pub use error::CorpusError;
use log::debug;
use serde::{Deserialize, Serialize};
pub use url::{SiteLayout, UrlRewriter, page_depth, relative_prefix};

/// The site corpus shipped with the documentation.
const EMBEDDED_CORPUS: &str = include_str!("../data/search-data.json");

/// One searchable section of a documentation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    /// Corpus key.
    pub id: String,
    /// Title of the page the section belongs to.
    #[serde(rename = "doc")]
    pub parent_title: String,
    /// Title of this section; equal to the parent title for single-section pages.
    #[serde(rename = "title")]
    pub section_title: String,
    /// Flattened plain-text body.
    pub content: String,
    /// Link target, rewritten relative to the hosting page once loaded.
    pub url: String,
    /// Site-root-relative URL.
    #[serde(rename = "relUrl")]
    pub relative_url: String,
}

impl DocumentRecord {
    /// Returns true when the section title adds information beyond the page title.
    pub fn has_distinct_section(&self) -> bool {
        self.parent_title != self.section_title
    }
}

/// Record shape in the corpus JSON.
#[derive(Deserialize)]
struct RawRecord {
    /// Page title.
    doc: String,
    /// Section title.
    title: String,
    /// Plain-text body.
    content: String,
    /// Absolute URL.
    url: String,
    /// Site-relative URL.
    #[serde(rename = "relUrl")]
    rel_url: String,
}

/// Immutable, ordered collection of document records.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Records in corpus order.
    records: Vec<DocumentRecord>,
    /// Corpus key -> position in `records`.
    by_id: HashMap<String, usize>,
}

impl Corpus {
    /// Loads the corpus compiled into this crate.
    pub fn embedded() -> Result<Self, CorpusError> {
        Self::parse(EMBEDDED_CORPUS, "<embedded>")
    }

    /// Loads a corpus from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, CorpusError> {
        let contents = fs::read_to_string(path).map_err(|source| CorpusError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, &path.display().to_string())
    }

    /// Parses a corpus from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, CorpusError> {
        Self::parse(json, "<inline>")
    }

    /// Builds a corpus from records already in corpus order.
    ///
    /// Later records with a duplicate id replace earlier ones in lookups.
    pub fn from_records(records: Vec<DocumentRecord>) -> Self {
        let by_id = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        Self { records, by_id }
    }

    /// Parses JSON, reporting errors against `origin`.
    fn parse(json: &str, origin: &str) -> Result<Self, CorpusError> {
        let raw: HashMap<String, RawRecord> =
            serde_json::from_str(json).map_err(|source| CorpusError::ParseJson {
                origin: origin.to_string(),
                source,
            })?;

        let mut records: Vec<DocumentRecord> = raw
            .into_iter()
            .map(|(id, r)| DocumentRecord {
                id,
                parent_title: r.doc,
                section_title: r.title,
                content: r.content,
                url: r.url,
                relative_url: r.rel_url,
            })
            .collect();
        records.sort_by(|a, b| compare_ids(&a.id, &b.id));

        debug!("loaded {} corpus records from {origin}", records.len());
        Ok(Self::from_records(records))
    }

    /// Returns a corpus whose URLs are rewritten for one hosting page.
    pub fn with_rewritten_urls(mut self, rewriter: &UrlRewriter) -> Self {
        for record in &mut self.records {
            record.url = rewriter.rewrite(&record.section_title, &record.url);
        }
        debug!(
            "rewrote corpus urls with prefix {} (depth {})",
            rewriter.relative_prefix(),
            rewriter.depth()
        );
        self
    }

    /// Looks up a record by corpus key.
    pub fn get(&self, id: &str) -> Option<&DocumentRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    /// Returns all records in corpus order.
    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    /// Iterates over records in corpus order.
    pub fn iter(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.records.iter()
    }

    /// Returns the position of a record in corpus order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the corpus has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Orders integer-like keys numerically, ahead of any other keys, which sort lexically.
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
