//! Recovery of match positions from stored field text.

use std::collections::BTreeSet;

use serde::Serialize;
use tantivy::tokenizer::TextAnalyzer;

use crate::analyzer::analyze;

/// Byte span of one matched token in a field's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    /// Byte offset of the token.
    pub start: usize,
    /// Byte length of the token.
    pub len: usize,
}

impl Span {
    /// Creates a span.
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Byte offset one past the token.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Re-analyzes `text` and returns the spans of tokens whose term is in `expanded`.
///
/// Every such term is also added to `found`. Spans come out in text order.
pub(super) fn match_spans(
    analyzer: &TextAnalyzer,
    text: &str,
    expanded: &BTreeSet<String>,
    found: &mut BTreeSet<String>,
) -> Vec<Span> {
    if expanded.is_empty() || text.is_empty() {
        return Vec::new();
    }

    let mut analyzer = analyzer.clone();
    analyze(&mut analyzer, text)
        .into_iter()
        .filter(|(term, _, _)| expanded.contains(term))
        .map(|(term, start, end)| {
            let span = Span::new(start, end - start);
            found.insert(term);
            span
        })
        .collect()
}
