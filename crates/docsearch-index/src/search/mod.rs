//! Staged query execution for the docsearch index.
//!
//! A query runs in up to three stages, stopping at the first that yields a hit:
//!
//! 1. **Exact**: every analyzed input token is looked up as-is in every field, with
//!    clauses boosted by the field weight times the exact-match boost.
//! 2. **Wildcard**: every token is expanded to all indexed terms it prefixes.
//! 3. **Fuzzy**: when the trimmed input is longer than two characters, tokens shorter than
//!    the fuzzy cut-off are expanded to all indexed terms within an edit distance derived
//!    from the input length.
//!
//! Clauses are OR-combined; hits are ranked by BM25 score times boosts, ties broken by
//! corpus order. Match positions are recovered by re-analyzing the stored title and content.

mod expand;
mod positions;

use std::{cmp::Ordering, collections::BTreeSet, fmt};

use expand::{LevenshteinDfa, PrefixAutomaton, expand_terms};
use log::debug;
pub use positions::Span;
use positions::match_spans;
use serde::Serialize;
use tantivy::{
    Searcher, TantivyDocument, Term,
    collector::TopDocs,
    query::{BooleanQuery, BoostQuery, Occur, Query, TermQuery},
    schema::{Field, IndexRecordOption, Value},
};

use crate::{
    IndexError,
    analyzer::analyze,
    index::SearchIndex,
};

/// Inputs this many characters long or shorter never reach the fuzzy stage.
const MIN_FUZZY_INPUT_LEN: usize = 2;

/// The stage that produced a search outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum SearchStage {
    /// Tokens looked up verbatim.
    Exact,
    /// Tokens expanded to every term they prefix.
    Wildcard,
    /// Tokens expanded to every term within `distance` edits.
    Fuzzy {
        /// Maximum edit distance.
        distance: u8,
    },
}

impl fmt::Display for SearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Wildcard => write!(f, "wildcard"),
            Self::Fuzzy { distance } => write!(f, "fuzzy (distance {distance})"),
        }
    }
}

/// Terms and positions that made a document match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchData {
    /// Indexed terms matched in this document.
    pub terms: BTreeSet<String>,
    /// Spans of matched tokens in the title, in text order.
    pub title: Vec<Span>,
    /// Spans of matched tokens in the content, in text order.
    pub content: Vec<Span>,
}

/// One ranked document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// Corpus key of the matched record.
    pub id: String,
    /// Relevance score.
    pub score: f32,
    /// Match details for highlighting.
    pub matches: MatchData,
}

/// Result of running one input through the stages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Stage that produced the hits, or the last stage tried when there are none.
    pub stage: SearchStage,
    /// Ranked hits, best first.
    pub hits: Vec<SearchHit>,
}

impl SearchOutcome {
    /// Returns true if no document matched.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Edit distance allowed for fuzzy matching an input of `len` characters.
///
/// Computed as `round(sqrt(len / 2 - 1))`; lengths below two give zero.
pub fn fuzzy_edit_distance(len: usize) -> u8 {
    let half = len as f64 / 2.0 - 1.0;
    if half <= 0.0 {
        return 0;
    }
    half.sqrt().round().min(f64::from(u8::MAX)) as u8
}

/// One analyzed query token.
struct QueryToken {
    /// Analyzed term.
    term: String,
    /// Character length of the token as typed.
    surface_len: usize,
}

/// Indexed terms to query for each field, with the field's clause boost.
type FieldTerms = Vec<(Field, f32, BTreeSet<String>)>;

impl SearchIndex {
    /// Runs `input` through the exact, wildcard and fuzzy stages.
    ///
    /// Returns `None` when the input is empty after trimming; otherwise the outcome of the
    /// first stage yielding a hit, or an empty outcome.
    pub fn search(&self, input: &str) -> Result<Option<SearchOutcome>, IndexError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let tokens = self.query_tokens(trimmed);
        let searcher = self.reader.searcher();

        let exact = self.field_terms(self.options.exact_boost, |_| {
            Ok(tokens.iter().map(|t| t.term.clone()).collect())
        })?;
        let hits = self.run_stage(&searcher, &exact)?;
        if !hits.is_empty() {
            return Ok(Some(self.outcome(SearchStage::Exact, hits)));
        }

        let wildcard = self.field_terms(1.0, |field| {
            let mut expanded = BTreeSet::new();
            for token in &tokens {
                expanded.extend(expand_terms(&searcher, field, || {
                    PrefixAutomaton::new(&token.term)
                })?);
            }
            Ok(expanded)
        })?;
        let hits = self.run_stage(&searcher, &wildcard)?;
        if !hits.is_empty() {
            return Ok(Some(self.outcome(SearchStage::Wildcard, hits)));
        }

        let input_len = trimmed.chars().count();
        if input_len <= MIN_FUZZY_INPUT_LEN {
            return Ok(Some(self.outcome(SearchStage::Wildcard, hits)));
        }

        let fuzzy_tokens: Vec<&QueryToken> = tokens
            .iter()
            .filter(|t| t.surface_len < self.options.max_fuzzy_token_len)
            .collect();
        if fuzzy_tokens.is_empty() {
            debug!("every token of {trimmed:?} is too long for fuzzy matching");
            return Ok(Some(self.outcome(SearchStage::Wildcard, hits)));
        }

        let distance = fuzzy_edit_distance(input_len);
        let builder = self.lev_builder(distance);
        let fuzzy = self.field_terms(1.0, |field| {
            let mut expanded = BTreeSet::new();
            for token in &fuzzy_tokens {
                expanded.extend(expand_terms(&searcher, field, || {
                    LevenshteinDfa(builder.build_dfa(&token.term))
                })?);
            }
            Ok(expanded)
        })?;
        let hits = self.run_stage(&searcher, &fuzzy)?;
        Ok(Some(self.outcome(SearchStage::Fuzzy { distance }, hits)))
    }

    /// Analyzes trimmed input into query tokens.
    fn query_tokens(&self, trimmed: &str) -> Vec<QueryToken> {
        let mut analyzer = self.query_analyzer.clone();
        analyze(&mut analyzer, trimmed)
            .into_iter()
            .map(|(term, start, end)| QueryToken {
                term,
                surface_len: trimmed[start..end].chars().count(),
            })
            .collect()
    }

    /// Computes the terms to query for each field.
    ///
    /// `multiplier` scales every field boost.
    fn field_terms<F>(&self, multiplier: f32, mut terms_for: F) -> Result<FieldTerms, IndexError>
    where
        F: FnMut(Field) -> Result<BTreeSet<String>, IndexError>,
    {
        let boosts = self.options.boosts;
        [
            (self.schema.title, boosts.title),
            (self.schema.content, boosts.content),
            (self.schema.url, boosts.url),
        ]
        .into_iter()
        .map(|(field, boost)| Ok((field, boost * multiplier, terms_for(field)?)))
        .collect()
    }

    /// Executes one stage's query and converts the top documents into hits.
    fn run_stage(
        &self,
        searcher: &Searcher,
        field_terms: &FieldTerms,
    ) -> Result<Vec<SearchHit>, IndexError> {
        let clauses: Vec<(Occur, Box<dyn Query>)> = field_terms
            .iter()
            .flat_map(|(field, boost, terms)| {
                terms.iter().map(move |term| {
                    let query = TermQuery::new(
                        Term::from_field_text(*field, term),
                        IndexRecordOption::WithFreqs,
                    );
                    let boosted: Box<dyn Query> =
                        Box::new(BoostQuery::new(Box::new(query), *boost));
                    (Occur::Should, boosted)
                })
            })
            .collect();

        if clauses.is_empty() {
            return Ok(Vec::new());
        }

        let expanded: BTreeSet<String> = field_terms
            .iter()
            .flat_map(|(_, _, terms)| terms.iter().cloned())
            .collect();

        let query = BooleanQuery::new(clauses);
        let limit = usize::try_from(searcher.num_docs()).unwrap_or(usize::MAX).max(1);
        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(limit))
            .map_err(|e| IndexError::search(&e))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher.doc(address).map_err(|e| IndexError::search(&e))?;
            hits.push(self.doc_to_hit(&doc, score, &expanded));
        }

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| self.position(&a.id).cmp(&self.position(&b.id)))
        });

        Ok(hits)
    }

    /// Converts a retrieved document into a hit with match data.
    fn doc_to_hit(
        &self,
        doc: &TantivyDocument,
        score: f32,
        expanded: &BTreeSet<String>,
    ) -> SearchHit {
        let id = get_text_field(doc, self.schema.id);
        let title = get_text_field(doc, self.schema.title);
        let content = get_text_field(doc, self.schema.content);
        let url = get_text_field(doc, self.schema.url);

        let mut terms = BTreeSet::new();
        let title = match_spans(&self.analyzer, &title, expanded, &mut terms);
        let content = match_spans(&self.analyzer, &content, expanded, &mut terms);
        match_spans(&self.analyzer, &url, expanded, &mut terms);

        SearchHit {
            id,
            score,
            matches: MatchData {
                terms,
                title,
                content,
            },
        }
    }

    /// Corpus position of a record, unknown ids last.
    fn position(&self, id: &str) -> usize {
        self.positions.get(id).copied().unwrap_or(usize::MAX)
    }

    /// Wraps stage hits into an outcome, logging the stage.
    fn outcome(&self, stage: SearchStage, hits: Vec<SearchHit>) -> SearchOutcome {
        debug!("{stage} stage produced {} hits", hits.len());
        SearchOutcome { stage, hits }
    }
}

/// Reads a stored text field, empty when absent.
fn get_text_field(doc: &TantivyDocument, field: Field) -> String {
    doc.get_first(field)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}
