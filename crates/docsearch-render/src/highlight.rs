//! Splicing match spans into text.

use docsearch_index::Span;
use serde::Serialize;

use crate::escape::escape_html;

/// Class applied to highlighted runs in result markup.
pub const HIGHLIGHT_CLASS: &str = "search-result-highlight";

/// A run of text that is either plain or a highlighted match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// The text of the run.
    pub text: String,
    /// True for matched tokens.
    pub highlighted: bool,
}

impl Segment {
    /// Creates a plain run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: false,
        }
    }

    /// Creates a highlighted run.
    pub fn highlighted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: true,
        }
    }
}

/// Splits `text[start..end]` into plain and highlighted runs.
///
/// `spans` must be sorted by start. Spans that overlap an earlier span or fall outside the
/// window are ignored. Empty plain runs are omitted.
pub fn splice_highlights(text: &str, start: usize, end: usize, spans: &[Span]) -> Vec<Segment> {
    let end = end.min(text.len());
    let mut segments = Vec::new();
    let mut index = start;

    for span in spans {
        if span.start < index || span.end() > end {
            continue;
        }
        let (Some(before), Some(matched)) =
            (text.get(index..span.start), text.get(span.start..span.end()))
        else {
            continue;
        };
        if !before.is_empty() {
            segments.push(Segment::plain(before));
        }
        segments.push(Segment::highlighted(matched));
        index = span.end();
    }

    if let Some(rest) = text.get(index..end)
        && !rest.is_empty()
    {
        segments.push(Segment::plain(rest));
    }

    segments
}

/// Concatenates segments back into their text.
pub fn segments_text(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

/// Renders segments as HTML, wrapping highlighted runs in a highlight span.
pub fn segments_to_html(segments: &[Segment]) -> String {
    let mut html = String::new();
    for segment in segments {
        let text = escape_html(&segment.text);
        if segment.highlighted {
            html.push_str(&format!("<span class=\"{HIGHLIGHT_CLASS}\">{text}</span>"));
        } else {
            html.push_str(&text);
        }
    }
    html
}
